//! Search and replace commits: cursor jumps, scrolling and status text
//! around the pure lookups in `core-search`.

use super::DispatchResult;
use super::mode::set_mode;
use core_search::SearchOutcome;
use core_state::{EditorState, Mode, ReplaceScope};

/// Enter in Search mode: adopt the typed query if it changed, then jump in
/// the prompt's direction.
pub(crate) fn submit_search(raw: &str, state: &mut EditorState) -> DispatchResult {
    if raw.as_bytes() != state.search.query() {
        state.search.update_query(raw, &state.document);
    }
    let forward = state.search.forward;
    jump(state, forward)
}

/// `n` / `N`: next or previous match from the cursor.
pub(crate) fn jump(state: &mut EditorState, forward: bool) -> DispatchResult {
    let (row, col) = state.cursor.key();
    let outcome = if forward {
        state.search.find_next(&state.document, row, col)
    } else {
        state.search.find_prev(&state.document, row, col)
    };
    match outcome {
        SearchOutcome::Found { row, col, wrapped } => {
            state.selection.clear();
            state.jump_to(row, col);
            let msg = match (wrapped, forward) {
                (true, true) => "Search wrapped to beginning",
                (true, false) => "Search wrapped to end",
                (false, true) => "Match found",
                (false, false) => "Previous match found",
            };
            state.set_status(msg);
        }
        SearchOutcome::NotFound => {
            let query = String::from_utf8_lossy(state.search.query()).into_owned();
            state.set_status(format!("Pattern not found: {query}"));
        }
        SearchOutcome::NoQuery => state.set_status("No search pattern"),
    }
    DispatchResult::dirty()
}

/// Enter in Replace mode: act on the scope chosen when the mode was entered.
pub(crate) fn submit_replace(raw: &str, state: &mut EditorState) -> DispatchResult {
    match state.replace_scope {
        ReplaceScope::Current => replace_current(raw, state),
        ReplaceScope::All => replace_all(raw, state),
    }
}

/// Ctrl+A in Replace mode.
pub(crate) fn replace_all_from_prompt(state: &mut EditorState) -> DispatchResult {
    let raw = state.command_line.take();
    set_mode(state, Mode::Normal);
    replace_all(&raw, state)
}

fn replace_current(raw: &str, state: &mut EditorState) -> DispatchResult {
    if state.replace_match_at_cursor(raw.as_bytes()) {
        state.set_status("Replaced match");
    } else {
        state.set_status("No match at cursor position");
    }
    DispatchResult::dirty()
}

fn replace_all(raw: &str, state: &mut EditorState) -> DispatchResult {
    let count = state.replace_all_matches(raw.as_bytes());
    tracing::debug!(target: "search", count, "replace_all");
    state.set_status(format!("Replaced {count} occurrences"));
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Options;
    use core_text::{Cursor, Document};

    fn state(text: &[u8]) -> EditorState {
        let mut st = EditorState::new(Document::from_bytes(text), Options::default());
        st.resize(12, 80);
        st
    }

    #[test]
    fn submit_jumps_to_first_match_after_cursor() {
        let mut st = state(b"foo\nbar foo");
        submit_search("foo", &mut st);
        assert_eq!(st.cursor.key(), (1, 4));
        assert_eq!(st.status_text(), Some("Match found"));
        jump(&mut st, true);
        assert_eq!(st.cursor.key(), (0, 0));
        assert_eq!(st.status_text(), Some("Search wrapped to beginning"));
    }

    #[test]
    fn backward_search_wraps_to_end() {
        let mut st = state(b"foo\nbar foo");
        st.search.forward = false;
        submit_search("foo", &mut st);
        assert_eq!(st.cursor.key(), (1, 4));
        assert_eq!(st.status_text(), Some("Search wrapped to end"));
    }

    #[test]
    fn missing_pattern_reports_not_found() {
        let mut st = state(b"abc");
        submit_search("zzz", &mut st);
        assert_eq!(st.cursor.key(), (0, 0));
        assert_eq!(st.status_text(), Some("Pattern not found: zzz"));
    }

    #[test]
    fn replace_current_checks_cursor_position() {
        let mut st = state(b"one two one");
        st.search.update_query("one", &st.document);
        st.cursor = Cursor::new(0, 1);
        submit_replace("1", &mut st);
        assert_eq!(st.status_text(), Some("No match at cursor position"));
        st.cursor = Cursor::new(0, 8);
        submit_replace("1", &mut st);
        assert_eq!(st.document.get_line(0), b"one two 1");
        assert_eq!(st.status_text(), Some("Replaced match"));
    }

    #[test]
    fn replace_all_reports_count() {
        let mut st = state(b"aaa");
        st.search.update_query("a", &st.document);
        st.mode = Mode::Replace;
        st.command_line.begin("bb");
        replace_all_from_prompt(&mut st);
        assert_eq!(st.document.get_line(0), b"bbbbbb");
        assert_eq!(st.status_text(), Some("Replaced 3 occurrences"));
        assert_eq!(st.mode, Mode::Normal);
    }
}
