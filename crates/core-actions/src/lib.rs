//! Input/mode state machine: key translation plus the dispatcher that
//! applies the resulting `Action` to `EditorState`.
//!
//! Flow per key: `key_translator::translate(mode, key)` picks an `Action`
//! for the current mode, then `dispatch` mutates state and reports whether
//! a repaint or exit is needed. `handle_key` bundles both steps together
//! with the unsaved-changes quit guard.

mod dispatcher;
pub mod io_ops;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch, handle_key};
pub use key_translator::translate;

/// Cursor motions shared by Normal and Insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

/// Where `EnterInsert` places the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Cursor,
    /// One byte to the right (`a`).
    After,
    LineEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor; `extend` starts or grows the selection.
    Move { motion: Motion, extend: bool },
    ClearSelection,
    EnterInsert(InsertAt),
    LeaveInsert,
    OpenLine { below: bool },
    InsertByte(u8),
    InsertNewline,
    Backspace,
    DeleteForward,
    DeleteUnderCursor,
    DeleteLine,
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    SearchNext,
    SearchPrev,
    StartCommand(&'static str),
    StartSearch { forward: bool },
    StartReplace,
    PromptChar(u8),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    ReplaceAll,
    Save,
    Quit,
    Redraw,
}

impl Action {
    /// Actions that leave a pending quit confirmation in place: a second
    /// quit, or typing `:q`/`:q!` on the command line.
    pub fn keeps_quit_armed(&self) -> bool {
        matches!(
            self,
            Action::Quit
                | Action::StartCommand(_)
                | Action::PromptChar(_)
                | Action::PromptBackspace
                | Action::PromptSubmit
        )
    }
}
