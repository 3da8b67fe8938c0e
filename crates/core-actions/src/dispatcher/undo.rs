//! Undo / Redo handling.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    let applied = state.undo();
    tracing::trace!(target: "actions.dispatch", op = "undo", applied, "undo");
    state.set_status(if applied { "Undo" } else { "Nothing to undo" });
    DispatchResult::dirty()
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    state.selection.clear();
    let applied = state.redo();
    tracing::trace!(target: "actions.dispatch", op = "redo", applied, "redo");
    state.set_status(if applied { "Redo" } else { "Nothing to redo" });
    DispatchResult::dirty()
}
