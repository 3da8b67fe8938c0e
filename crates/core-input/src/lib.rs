//! Keyboard input: byte sources and the escape-sequence decoder.

mod decoder;
mod stdin;

pub use decoder::KeyDecoder;
pub use stdin::{ChannelSource, spawn_stdin_reader};

use std::collections::VecDeque;
use std::time::Duration;

use core_events::KeyEvent;

/// Supplier of raw terminal bytes.
pub trait ByteSource {
    /// Next byte, blocking at most `wait` (`None` blocks until one arrives).
    /// Returns `None` on timeout or when the source is exhausted.
    fn read_byte(&mut self, wait: Option<Duration>) -> Option<u8>;
}

/// In-memory source that ignores timeouts. Used for scripted input.
#[derive(Debug, Clone, Default)]
pub struct SliceSource {
    bytes: VecDeque<u8>,
}

impl SliceSource {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for SliceSource {
    fn read_byte(&mut self, _wait: Option<Duration>) -> Option<u8> {
        self.bytes.pop_front()
    }
}

/// Decode a complete byte script into keys.
pub fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
    let mut src = SliceSource::new(bytes);
    let mut decoder = KeyDecoder::new(Duration::ZERO);
    let mut keys = Vec::new();
    while let Some(key) = decoder.next_key(&mut src, None) {
        keys.push(key);
    }
    keys
}
