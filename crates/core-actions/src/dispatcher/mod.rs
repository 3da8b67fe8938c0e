//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`    - cursor movement and shift-selection
//! * `mode`      - mode transitions (Normal, Insert, prompt entry)
//! * `command`   - prompt editing and `:` command execution
//! * `search`    - search / replace commits and match jumps
//! * `edit`      - text mutation and clipboard
//! * `undo`      - undo / redo dispatch

use crate::{Action, key_translator};
use core_events::KeyEvent;
use core_state::EditorState;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod search;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The screen must be cleared before the next paint (`:e`, Ctrl+L).
    pub full_redraw: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            full_redraw: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            full_redraw: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            full_redraw: false,
        }
    }
    pub fn full_redraw() -> Self {
        Self {
            dirty: true,
            quit: false,
            full_redraw: true,
        }
    }
}

/// Translate one key for the current mode and apply it.
pub fn handle_key(state: &mut EditorState, key: &KeyEvent) -> DispatchResult {
    let action = key_translator::translate(state.mode, key);
    if !action.as_ref().is_some_and(Action::keeps_quit_armed) {
        state.quit_armed = false;
    }
    match action {
        Some(action) => dispatch(action, state),
        None => {
            tracing::trace!(target: "actions.dispatch", %key, mode = ?state.mode, "unmapped_key");
            DispatchResult::clean()
        }
    }
}

/// Apply an action to editor state.
pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?action, mode = ?state.mode, "dispatch");
    match action {
        Action::Move { motion, extend } => motion::handle_motion(motion, extend, state),
        Action::ClearSelection => {
            let had = state.selection.is_active();
            state.selection.clear();
            if had {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        Action::EnterInsert(at) => mode::enter_insert(at, state),
        Action::LeaveInsert => mode::leave_insert(state),
        Action::OpenLine { below } => mode::open_line(below, state),
        Action::StartCommand(prefill) => mode::start_command(prefill, state),
        Action::StartSearch { forward } => mode::start_search(forward, state),
        Action::StartReplace => mode::start_replace(state),
        Action::PromptChar(_)
        | Action::PromptBackspace
        | Action::PromptSubmit
        | Action::PromptCancel => command::handle_prompt_action(action, state),
        Action::ReplaceAll => search::replace_all_from_prompt(state),
        Action::SearchNext => search::jump(state, true),
        Action::SearchPrev => search::jump(state, false),
        Action::InsertByte(_)
        | Action::InsertNewline
        | Action::Backspace
        | Action::DeleteForward
        | Action::DeleteUnderCursor
        | Action::DeleteLine => edit::handle_edit(action, state),
        Action::Copy => edit::copy(state),
        Action::Cut => edit::cut(state),
        Action::Paste => edit::paste(state),
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
        Action::Save => command::save(state, None),
        Action::Quit => request_quit(state),
        Action::Redraw => DispatchResult::full_redraw(),
    }
}

/// Quit unless the document has unsaved changes; then the first request
/// only arms the guard and a second consecutive one quits.
pub(crate) fn request_quit(state: &mut EditorState) -> DispatchResult {
    if !state.document.is_modified() || !state.options.confirm_quit || state.quit_armed {
        tracing::info!(target: "actions.dispatch", modified = state.document.is_modified(), "quit");
        return DispatchResult::quit();
    }
    state.quit_armed = true;
    state.set_status("Unsaved changes! Quit again to discard, or :w to save");
    DispatchResult::dirty()
}
