//! Text mutation and clipboard actions.
//!
//! The undo bookkeeping lives in `EditorState`'s edit methods; this layer
//! only picks the method and writes the status line.

use super::DispatchResult;
use crate::Action;
use core_state::EditorState;

pub(crate) fn handle_edit(action: Action, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let changed = match action {
        Action::InsertByte(b) => {
            state.insert_byte(b);
            true
        }
        Action::InsertNewline => {
            state.insert_newline();
            true
        }
        Action::Backspace => state.backspace(),
        Action::DeleteForward => state.delete_forward(),
        Action::DeleteUnderCursor => state.delete_under_cursor(),
        Action::DeleteLine => {
            state.delete_current_line();
            true
        }
        _ => false,
    };
    if changed {
        tracing::trace!(target: "actions.dispatch", ?action, row = before.row, col = before.col, to_row = state.cursor.row, to_col = state.cursor.col, "edit");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn copy(state: &mut EditorState) -> DispatchResult {
    if state.copy_selection().is_some() {
        state.selection.clear();
        state.set_status("Selection copied");
    } else {
        state.copy_line();
        state.set_status("Line copied to clipboard");
    }
    DispatchResult::dirty()
}

pub(crate) fn cut(state: &mut EditorState) -> DispatchResult {
    if state.cut_selection().is_some() {
        state.set_status("Selection cut");
    } else {
        state.clipboard = state.delete_current_line();
        state.set_status("Line cut to clipboard");
    }
    DispatchResult::dirty()
}

pub(crate) fn paste(state: &mut EditorState) -> DispatchResult {
    if state.paste() {
        state.set_status("Pasted from clipboard");
    } else {
        state.set_status("Clipboard is empty");
    }
    DispatchResult::dirty()
}
