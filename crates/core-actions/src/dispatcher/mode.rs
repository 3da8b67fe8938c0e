//! Mode transitions. Every transition drops the selection.

use super::DispatchResult;
use crate::InsertAt;
use core_state::{EditorState, Mode, ReplaceScope};

pub(crate) fn enter_insert(at: InsertAt, state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    let len = state.document.line_len(state.cursor.row);
    match at {
        InsertAt::Cursor => {}
        InsertAt::After => {
            if state.cursor.col < len {
                state.cursor.col += 1;
            }
        }
        InsertAt::LineEnd => state.cursor.col = len,
    }
    state.sync_cursor();
    set_mode(state, Mode::Insert);
    state.set_status("-- INSERT --");
    DispatchResult::dirty()
}

/// Back to Normal; the cursor steps off the end of a non-empty line.
pub(crate) fn leave_insert(state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    let len = state.document.line_len(state.cursor.row);
    if state.cursor.col > 0 && state.cursor.col == len {
        state.cursor.col -= 1;
        state.sync_cursor();
    }
    set_mode(state, Mode::Normal);
    state.ephemeral_status = None;
    DispatchResult::dirty()
}

pub(crate) fn open_line(below: bool, state: &mut EditorState) -> DispatchResult {
    state.open_line(below);
    set_mode(state, Mode::Insert);
    state.set_status("-- INSERT --");
    DispatchResult::dirty()
}

pub(crate) fn start_command(prefill: &str, state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    state.command_line.begin(prefill);
    set_mode(state, Mode::Command);
    DispatchResult::dirty()
}

pub(crate) fn start_search(forward: bool, state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    state.search.forward = forward;
    state.command_line.begin("");
    set_mode(state, Mode::Search);
    DispatchResult::dirty()
}

/// Replace mode works on the active query; without one it is refused.
pub(crate) fn start_replace(state: &mut EditorState) -> DispatchResult {
    enter_replace(state, ReplaceScope::Current)
}

pub(crate) fn enter_replace(state: &mut EditorState, scope: ReplaceScope) -> DispatchResult {
    if !state.search.has_query() {
        state.set_status("No search pattern; use / first");
        return DispatchResult::dirty();
    }
    state.selection.clear();
    state.replace_scope = scope;
    state.command_line.begin("");
    set_mode(state, Mode::Replace);
    DispatchResult::dirty()
}

pub(crate) fn set_mode(state: &mut EditorState, mode: Mode) {
    if state.mode != mode {
        tracing::trace!(target: "actions.dispatch", from = ?state.mode, to = ?mode, "mode_change");
        state.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Options;
    use core_text::{Cursor, Document};

    fn state(text: &[u8]) -> EditorState {
        EditorState::new(Document::from_bytes(text), Options::default())
    }

    #[test]
    fn append_moves_past_cursor_byte() {
        let mut st = state(b"abc");
        enter_insert(InsertAt::After, &mut st);
        assert_eq!(st.cursor.col, 1);
        assert_eq!(st.mode, Mode::Insert);
        assert_eq!(st.status_text(), Some("-- INSERT --"));
    }

    #[test]
    fn leaving_insert_at_eol_steps_back() {
        let mut st = state(b"abc");
        enter_insert(InsertAt::LineEnd, &mut st);
        assert_eq!(st.cursor.col, 3);
        leave_insert(&mut st);
        assert_eq!(st.cursor.col, 2);
        assert_eq!(st.mode, Mode::Normal);
    }

    #[test]
    fn leaving_insert_mid_line_keeps_column() {
        let mut st = state(b"abc");
        st.cursor = Cursor::new(0, 1);
        enter_insert(InsertAt::Cursor, &mut st);
        leave_insert(&mut st);
        assert_eq!(st.cursor.col, 1);
    }

    #[test]
    fn replace_requires_query() {
        let mut st = state(b"abc");
        start_replace(&mut st);
        assert_eq!(st.mode, Mode::Normal);
        assert_eq!(st.status_text(), Some("No search pattern; use / first"));
        st.search.update_query("b", &st.document);
        start_replace(&mut st);
        assert_eq!(st.mode, Mode::Replace);
        assert_eq!(st.replace_scope, ReplaceScope::Current);
    }

    #[test]
    fn mode_change_drops_selection() {
        let mut st = state(b"abc");
        st.selection.start(Cursor::new(0, 0));
        st.cursor.col = 2;
        start_search(false, &mut st);
        assert!(!st.selection.is_active());
        assert!(!st.search.forward);
        assert_eq!(st.mode, Mode::Search);
    }
}
