//! Key -> Action translation, keyed by the current mode.
//!
//! Stateless: the decoder already folded escape sequences and modifiers
//! into a single `KeyEvent`, so every mapping is a pure lookup on
//! `(Mode, KeyEvent)`. Unmapped keys return `None`.

use crate::{Action, InsertAt, Motion};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::Mode;

pub fn translate(mode: Mode, key: &KeyEvent) -> Option<Action> {
    match mode {
        Mode::Normal => normal(key),
        Mode::Insert => insert(key),
        Mode::Command | Mode::Search | Mode::Replace => prompt(mode, key),
    }
}

/// Navigation keys that behave the same in Normal and Insert mode.
fn motion_key(key: &KeyEvent) -> Option<Action> {
    let motion = match key.code {
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Left => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Home => Motion::LineStart,
        KeyCode::End => Motion::LineEnd,
        KeyCode::PageUp => Motion::PageUp,
        KeyCode::PageDown => Motion::PageDown,
        _ => return None,
    };
    Some(Action::Move {
        motion,
        extend: key.is_shift(),
    })
}

fn moving(motion: Motion) -> Option<Action> {
    Some(Action::Move {
        motion,
        extend: false,
    })
}

fn normal(key: &KeyEvent) -> Option<Action> {
    if let Some(action) = motion_key(key) {
        return Some(action);
    }
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char(b'r') => Some(Action::Redo),
            KeyCode::Char(b'q') => Some(Action::Quit),
            KeyCode::Char(b's') => Some(Action::Save),
            KeyCode::Char(b'l') => Some(Action::Redraw),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(Action::ClearSelection),
        KeyCode::Delete => Some(Action::DeleteUnderCursor),
        KeyCode::Char(b'h') => moving(Motion::Left),
        KeyCode::Char(b'j') => moving(Motion::Down),
        KeyCode::Char(b'k') => moving(Motion::Up),
        KeyCode::Char(b'l') => moving(Motion::Right),
        KeyCode::Char(b'g') => moving(Motion::DocumentStart),
        KeyCode::Char(b'G') => moving(Motion::DocumentEnd),
        KeyCode::Char(b' ') => moving(Motion::PageDown),
        KeyCode::Char(b'i') => Some(Action::EnterInsert(InsertAt::Cursor)),
        KeyCode::Char(b'a') => Some(Action::EnterInsert(InsertAt::After)),
        KeyCode::Char(b'A') => Some(Action::EnterInsert(InsertAt::LineEnd)),
        KeyCode::Char(b'o') => Some(Action::OpenLine { below: true }),
        KeyCode::Char(b'O') => Some(Action::OpenLine { below: false }),
        KeyCode::Char(b':') => Some(Action::StartCommand("")),
        KeyCode::Char(b'/') => Some(Action::StartSearch { forward: true }),
        KeyCode::Char(b'?') => Some(Action::StartSearch { forward: false }),
        KeyCode::Char(b'n') => Some(Action::SearchNext),
        KeyCode::Char(b'N') => Some(Action::SearchPrev),
        KeyCode::Char(b'x') => Some(Action::DeleteUnderCursor),
        KeyCode::Char(b'd') => Some(Action::DeleteLine),
        KeyCode::Char(b'y') => Some(Action::Copy),
        KeyCode::Char(b'Y') | KeyCode::Char(b'X') => Some(Action::Cut),
        KeyCode::Char(b'p') => Some(Action::Paste),
        KeyCode::Char(b'u') => Some(Action::Undo),
        KeyCode::Char(b'R') => Some(Action::StartReplace),
        KeyCode::Char(b'q') | KeyCode::Char(b'Q') => Some(Action::Quit),
        _ => None,
    }
}

fn insert(key: &KeyEvent) -> Option<Action> {
    if let Some(action) = motion_key(key) {
        return Some(action);
    }
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char(b'q') => Some(Action::Quit),
            KeyCode::Char(b's') => Some(Action::Save),
            KeyCode::Char(b'f') => Some(Action::StartSearch { forward: true }),
            KeyCode::Char(b'g') => Some(Action::StartCommand("goto ")),
            KeyCode::Char(b'z') => Some(Action::Undo),
            KeyCode::Char(b'y') => Some(Action::Redo),
            KeyCode::Char(b'd') => Some(Action::DeleteLine),
            KeyCode::Char(b'l') => Some(Action::Redraw),
            KeyCode::Char(b'c') => Some(Action::Copy),
            KeyCode::Char(b'x') => Some(Action::Cut),
            KeyCode::Char(b'v') => Some(Action::Paste),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(Action::LeaveInsert),
        KeyCode::Enter => Some(Action::InsertNewline),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::Tab => Some(Action::InsertByte(b'\t')),
        _ => key.printable().map(Action::InsertByte),
    }
}

fn prompt(mode: Mode, key: &KeyEvent) -> Option<Action> {
    if mode == Mode::Replace && key.is_ctrl(b'a') {
        return Some(Action::ReplaceAll);
    }
    match key.code {
        KeyCode::Esc => Some(Action::PromptCancel),
        KeyCode::Enter => Some(Action::PromptSubmit),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        _ => key.printable().map(Action::PromptChar),
    }
}
