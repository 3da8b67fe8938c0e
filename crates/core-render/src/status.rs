//! Status bar composition.
//!
//! Two stages: `compose_status` produces ordered left/right `StatusSegment`
//! lists from the editor state, `format_status` lays them out into a bar of
//! exactly `width` columns (left side truncated first so the position and
//! match count stay visible, right side dropped only when it cannot fit on
//! its own).
//!
//! Layout: ` NORMAL | name.rs [+] | 42 lines ` ... ` rust | 3/7 | Ln 4, Col 9 `

use core_state::{EditorState, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment {
    Mode(&'static str),
    FileName { name: String, modified: bool },
    LineCount(usize),
    Language(&'static str),
    /// Search matches; `current` is 0 before the first jump.
    Matches { current: usize, total: usize },
    Position { line_1: usize, col_1: usize },
}

impl StatusSegment {
    fn text(&self) -> String {
        match self {
            StatusSegment::Mode(m) => (*m).to_string(),
            StatusSegment::FileName { name, modified } => {
                if *modified {
                    format!("{name} [+]")
                } else {
                    name.clone()
                }
            }
            StatusSegment::LineCount(n) => format!("{n} lines"),
            StatusSegment::Language(l) => (*l).to_string(),
            StatusSegment::Matches { current, total } => {
                if *current > 0 {
                    format!("{current}/{total}")
                } else {
                    format!("{total} matches")
                }
            }
            StatusSegment::Position { line_1, col_1 } => format!("Ln {line_1}, Col {col_1}"),
        }
    }
}

pub struct StatusLine {
    pub left: Vec<StatusSegment>,
    pub right: Vec<StatusSegment>,
}

pub fn compose_status(state: &EditorState) -> StatusLine {
    let doc = &state.document;
    let left = vec![
        StatusSegment::Mode(state.mode.label()),
        StatusSegment::FileName {
            name: doc.display_name(),
            modified: doc.is_modified(),
        },
        StatusSegment::LineCount(doc.line_count()),
    ];
    let mut right = vec![StatusSegment::Language(doc.language().name())];
    if state.search.has_query() {
        right.push(StatusSegment::Matches {
            current: state.search.current_match(),
            total: state.search.match_count(),
        });
    }
    right.push(StatusSegment::Position {
        line_1: state.cursor.row + 1,
        col_1: state.cursor.render_col + 1,
    });
    StatusLine { left, right }
}

fn join(segments: &[StatusSegment]) -> String {
    let parts: Vec<String> = segments.iter().map(StatusSegment::text).collect();
    format!(" {} ", parts.join(" | "))
}

/// Render the bar to exactly `width` characters.
pub fn format_status(line: &StatusLine, width: usize) -> String {
    let left = join(&line.left);
    let right = join(&line.right);
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len <= width {
        let pad = width - left_len - right_len;
        return format!("{left}{}{right}", " ".repeat(pad));
    }
    let (keep_left, right) = if right_len <= width {
        (width - right_len, right)
    } else {
        (width, String::new())
    };
    let mut out: String = left.chars().take(keep_left).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', keep_left - len));
    out.push_str(&right);
    out
}

/// Prompt prefix drawn before the entry buffer, or `None` outside prompt
/// modes.
pub fn prompt_prefix(state: &EditorState) -> Option<&'static str> {
    match state.mode {
        Mode::Command => Some(":"),
        Mode::Search if state.search.forward => Some("/"),
        Mode::Search => Some("?"),
        Mode::Replace => Some("Replace with: "),
        Mode::Normal | Mode::Insert => None,
    }
}
