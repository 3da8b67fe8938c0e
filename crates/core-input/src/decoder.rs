//! Raw byte -> `KeyEvent` decoding, including ANSI escape sequences.

use std::time::Duration;

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use crate::ByteSource;

const ESC: u8 = 0x1b;
/// Longest CSI body we accept before giving up on a sequence.
const MAX_CSI_LEN: usize = 16;

pub struct KeyDecoder {
    escape_timeout: Duration,
    pending: Option<u8>,
}

impl KeyDecoder {
    pub fn new(escape_timeout: Duration) -> Self {
        Self {
            escape_timeout,
            pending: None,
        }
    }

    /// Read and decode one key. `wait` bounds how long to block for the
    /// first byte (`None` blocks indefinitely); follow-up bytes of an escape
    /// sequence are only waited for up to the escape timeout.
    pub fn next_key<S: ByteSource + ?Sized>(
        &mut self,
        src: &mut S,
        wait: Option<Duration>,
    ) -> Option<KeyEvent> {
        let first = match self.pending.take() {
            Some(b) => b,
            None => src.read_byte(wait)?,
        };
        let key = if first == ESC {
            self.decode_escape(src)
        } else {
            KeyEvent::from_byte(first)
        };
        trace!(target: "input.decode", byte = first, key = %key, "key");
        Some(key)
    }

    fn follow_up<S: ByteSource + ?Sized>(&self, src: &mut S) -> Option<u8> {
        src.read_byte(Some(self.escape_timeout))
    }

    fn decode_escape<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> KeyEvent {
        let esc = KeyEvent::plain(KeyCode::Esc);
        let Some(b) = self.follow_up(src) else {
            return esc;
        };
        match b {
            b'[' => self.decode_csi(src).unwrap_or(esc),
            b'O' => match self.follow_up(src) {
                Some(f) => final_key(f).map(KeyEvent::plain).unwrap_or(esc),
                None => {
                    self.pending = Some(b'O');
                    esc
                }
            },
            other => {
                // A lone Esc followed quickly by a normal key: deliver both.
                self.pending = Some(other);
                esc
            }
        }
    }

    /// Parse `ESC [ params final`. `None` means the sequence was malformed,
    /// truncated or names a key we do not handle.
    fn decode_csi<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> Option<KeyEvent> {
        let mut body = Vec::with_capacity(MAX_CSI_LEN);
        let fin = loop {
            let b = self.follow_up(src)?;
            if b.is_ascii_alphabetic() || b == b'~' {
                break b;
            }
            if body.len() >= MAX_CSI_LEN {
                trace!(target: "input.decode", len = body.len(), "csi_overflow");
                return None;
            }
            body.push(b);
        };
        let mut params = body.split(|&b| b == b';').map(parse_param);
        let first = params.next().flatten();
        let modifier = params.next().flatten().unwrap_or(1);
        let mods = modifier_mask(modifier);
        let code = if fin == b'~' {
            tilde_key(first?)?
        } else {
            final_key(fin)?
        };
        Some(KeyEvent::new(code, mods))
    }
}

fn parse_param(raw: &[u8]) -> Option<u32> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return None;
    }
    raw.iter()
        .try_fold(0u32, |acc, &d| acc.checked_mul(10)?.checked_add(u32::from(d - b'0')))
}

/// xterm encodes modifiers as `1 + bitmask(shift=1, alt=2, ctrl=4)`.
fn modifier_mask(param: u32) -> KeyModifiers {
    let bits = param.saturating_sub(1);
    let mut mods = KeyModifiers::empty();
    if bits & 1 != 0 {
        mods |= KeyModifiers::SHIFT;
    }
    if bits & 2 != 0 {
        mods |= KeyModifiers::ALT;
    }
    if bits & 4 != 0 {
        mods |= KeyModifiers::CTRL;
    }
    mods
}

fn final_key(b: u8) -> Option<KeyCode> {
    Some(match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return None,
    })
}

fn tilde_key(n: u32) -> Option<KeyCode> {
    Some(match n {
        1 | 7 => KeyCode::Home,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        _ => return None,
    })
}
