//! Logical key events produced by the input decoder.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

/// Normalized key. Printable bytes stay as `Char`; control bytes with a
/// dedicated meaning (Enter, Tab, Backspace, Esc) get their own variant and
/// the remaining control codes become `Char(letter)` with `CTRL` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(u8),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn char(b: u8) -> Self {
        Self::plain(KeyCode::Char(b))
    }

    /// Ctrl+letter, e.g. `KeyEvent::ctrl(b's')`.
    pub const fn ctrl(letter: u8) -> Self {
        Self::new(KeyCode::Char(letter), KeyModifiers::CTRL)
    }

    pub const fn shifted(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Classify a single byte that arrived outside an escape sequence.
    pub fn from_byte(b: u8) -> Self {
        match b {
            b'\r' | b'\n' => Self::plain(KeyCode::Enter),
            b'\t' => Self::plain(KeyCode::Tab),
            127 | 8 => Self::plain(KeyCode::Backspace),
            27 => Self::plain(KeyCode::Esc),
            1..=26 => Self::ctrl(b'a' + b - 1),
            _ => Self::char(b),
        }
    }

    pub fn is_shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }

    pub fn is_ctrl(&self, letter: u8) -> bool {
        self.mods.contains(KeyModifiers::CTRL) && self.code == KeyCode::Char(letter)
    }

    /// Printable ASCII byte with no modifiers other than Shift.
    pub fn printable(&self) -> Option<u8> {
        let chord = KeyModifiers::CTRL | KeyModifiers::ALT;
        match self.code {
            KeyCode::Char(b) if (32..127).contains(&b) && !self.mods.intersects(chord) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("M-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(b) if b.is_ascii_graphic() => write!(f, "{}", b as char),
            KeyCode::Char(b) => write!(f, "<{b:#04x}>"),
            other => write!(f, "<{other:?}>"),
        }
    }
}
