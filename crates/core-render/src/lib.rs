//! Screen composition for the editor.
//!
//! The renderer only reads `EditorState`. Each frame is laid out as:
//!
//! - `screen_rows` text rows (gutter + tab-expanded line text, `~` past EOF)
//! - one status bar row (reverse video)
//! - one message row (prompt entry or the last status message)
//!
//! Text rows are built as [`Cell`] vectors so the column arithmetic (tab
//! expansion, horizontal scroll, selection) is testable without a terminal.
//! [`render_engine::RenderEngine`] turns them into crossterm commands via
//! [`writer::Writer`].
//!
//! Every document byte occupies exactly one render column except a tab,
//! which fills up to the next tab stop. Bytes that are not printable ASCII
//! are shown as a single reversed placeholder so columns stay aligned with
//! the cursor's render column.

use bitflags::bitflags;
use core_state::EditorState;
use core_syntax::Highlight;
use core_text::column::tab_advance;

pub mod render_engine;
pub mod status;
pub mod style;
pub mod writer;

pub use render_engine::RenderEngine;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const SELECTED   = 0b0000_0001; // inside the active selection
        const CONTROL    = 0b0000_0010; // placeholder for a non-printable byte
        const WHITESPACE = 0b0000_0100; // visible whitespace marker (`:set list`)
        const GUTTER     = 0b0000_1000; // line-number column
        const FILLER     = 0b0001_0000; // `~` past end of file
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub highlight: Highlight,
    pub flags: CellFlags,
}

impl Cell {
    pub fn plain(ch: char, flags: CellFlags) -> Self {
        Self {
            ch,
            highlight: Highlight::Normal,
            flags,
        }
    }
}

const TAB_MARK: char = '→';
const SPACE_MARK: char = '·';

/// Display form of a single non-tab byte.
fn glyph(b: u8) -> (char, CellFlags) {
    match b {
        0x20..=0x7e => (char::from(b), CellFlags::empty()),
        0x00..=0x1f => (char::from(b'@' + b), CellFlags::CONTROL),
        _ => ('?', CellFlags::CONTROL),
    }
}

/// Cells of screen row `y` (0-based within the text area), clipped to
/// `state.screen_cols`.
pub fn compose_text_row(state: &EditorState, y: usize) -> Vec<Cell> {
    let width = state.screen_cols;
    let row = state.row_offset + y;
    let mut cells = Vec::with_capacity(width);
    let Some(line) = state.document.line(row) else {
        cells.push(Cell::plain('~', CellFlags::FILLER));
        return cells;
    };

    let gutter = state.gutter_width();
    if gutter > 0 {
        let label = format!("{:>w$} ", row + 1, w = gutter - 1);
        cells.extend(
            label
                .chars()
                .take(gutter)
                .map(|c| Cell::plain(c, CellFlags::GUTTER)),
        );
    }

    let tab_width = state.tab_width();
    let show_ws = state.options.show_whitespace;
    let highlights = if state.options.syntax_enabled {
        line.highlight()
    } else {
        None
    };
    let first = state.col_offset;
    let last = first + state.text_cols();
    let mut rc = 0;
    for (col, &b) in line.text().iter().enumerate() {
        if rc >= last {
            break;
        }
        let mut flags = CellFlags::empty();
        if state.selection.contains(state.cursor, row, col) {
            flags |= CellFlags::SELECTED;
        }
        let highlight = highlights
            .and_then(|h| h.get(col).copied())
            .unwrap_or_default();
        let next = if b == b'\t' {
            rc + tab_advance(rc, tab_width)
        } else {
            rc + 1
        };
        for pos in rc..next {
            if pos < first || pos >= last {
                continue;
            }
            let (ch, extra) = match b {
                b'\t' if show_ws && pos == rc => (TAB_MARK, CellFlags::WHITESPACE),
                b'\t' => (' ', CellFlags::empty()),
                b' ' if show_ws => (SPACE_MARK, CellFlags::WHITESPACE),
                _ => glyph(b),
            };
            cells.push(Cell {
                ch,
                highlight,
                flags: flags | extra,
            });
        }
        rc = next;
    }
    cells.truncate(width);
    cells
}

/// Text of the prompt / message row and, in prompt modes, the column the
/// cursor belongs at.
pub fn message_line(state: &EditorState) -> (String, Option<usize>) {
    match status::prompt_prefix(state) {
        Some(prefix) => {
            let text = format!("{prefix}{}", state.command_line.buffer());
            let col = text.chars().count();
            (text, Some(col))
        }
        None => (state.status_text().unwrap_or_default().to_string(), None),
    }
}

/// Terminal `(x, y)` of the cursor for the current frame.
pub fn cursor_position(state: &EditorState) -> (u16, u16) {
    if let (_, Some(col)) = message_line(state) {
        let y = state.screen_rows + 1;
        let x = col.min(state.screen_cols.saturating_sub(1));
        return (to_u16(x), to_u16(y));
    }
    let y = state.cursor.row.saturating_sub(state.row_offset);
    let x = state.gutter_width() + state.cursor.render_col.saturating_sub(state.col_offset);
    (
        to_u16(x.min(state.screen_cols.saturating_sub(1))),
        to_u16(y),
    )
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
