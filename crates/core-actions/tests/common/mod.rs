#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::handle_key;
use core_config::Options;
use core_input::decode_all;
use core_state::EditorState;
use core_text::Document;

/// Editor over `text` with an 80x24 terminal.
pub fn editor(text: &str) -> EditorState {
    let mut state = EditorState::new(Document::from_bytes(text.as_bytes()), Options::default());
    state.resize(24, 80);
    state
}

/// Decode raw terminal bytes and dispatch each key. Returns true as soon as
/// a key requests exit; the remaining bytes are dropped.
pub fn feed(state: &mut EditorState, bytes: &[u8]) -> bool {
    for key in decode_all(bytes) {
        if handle_key(state, &key).quit {
            return true;
        }
    }
    false
}

pub fn lines(state: &EditorState) -> Vec<String> {
    state
        .document
        .lines()
        .map(|l| String::from_utf8_lossy(l.text()).into_owned())
        .collect()
}
