//! Cursor movement.
//!
//! Horizontal moves wrap across line boundaries; vertical moves keep the
//! render column so the cursor stays visually aligned across tabs. A
//! shifted motion anchors a selection at the pre-move cursor (or extends
//! the existing one); any plain motion drops it.

use super::DispatchResult;
use crate::Motion;
use core_state::EditorState;

pub(crate) fn handle_motion(motion: Motion, extend: bool, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let had_selection = state.selection.is_active();
    if extend && state.options.shift_selection {
        if !had_selection {
            state.selection.start(state.cursor);
        }
    } else {
        state.selection.clear();
    }

    apply(motion, state);
    state.sync_cursor();

    let moved = before.key() != state.cursor.key();
    if moved || had_selection != state.selection.is_active() {
        tracing::trace!(target: "actions.dispatch", ?motion, extend, row = before.row, col = before.col, to_row = state.cursor.row, to_col = state.cursor.col, "motion");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn apply(motion: Motion, state: &mut EditorState) {
    let doc = &state.document;
    let last_row = doc.line_count() - 1;
    let tab = state.options.tab_width;
    let cur = &mut state.cursor;
    // The cached render column may be stale if the cursor was placed directly.
    cur.render_col = doc.byte_to_render(cur.row, cur.col, tab);
    match motion {
        Motion::Left => {
            if cur.col > 0 {
                cur.col -= 1;
            } else if cur.row > 0 {
                cur.row -= 1;
                cur.col = doc.line_len(cur.row);
            }
        }
        Motion::Right => {
            if cur.col < doc.line_len(cur.row) {
                cur.col += 1;
            } else if cur.row < last_row {
                cur.row += 1;
                cur.col = 0;
            }
        }
        Motion::Up => {
            if cur.row > 0 {
                cur.row -= 1;
                cur.col = doc.render_to_byte(cur.row, cur.render_col, tab);
            }
        }
        Motion::Down => {
            if cur.row < last_row {
                cur.row += 1;
                cur.col = doc.render_to_byte(cur.row, cur.render_col, tab);
            }
        }
        Motion::LineStart => cur.col = 0,
        Motion::LineEnd => cur.col = doc.line_len(cur.row),
        Motion::DocumentStart => {
            cur.row = 0;
            cur.col = 0;
        }
        Motion::DocumentEnd => {
            cur.row = last_row;
            cur.col = 0;
        }
        Motion::PageDown => {
            state.row_offset = (state.row_offset + state.screen_rows).min(last_row);
            cur.row = state.row_offset;
        }
        Motion::PageUp => {
            state.row_offset = state.row_offset.saturating_sub(state.screen_rows);
            cur.row = state.row_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Options;
    use core_text::{Cursor, Document};

    fn state(text: &[u8]) -> EditorState {
        let mut st = EditorState::new(Document::from_bytes(text), Options::default());
        st.resize(12, 80);
        st
    }

    #[test]
    fn left_right_wrap_lines() {
        let mut st = state(b"ab\ncd");
        st.cursor = Cursor::new(1, 0);
        handle_motion(Motion::Left, false, &mut st);
        assert_eq!(st.cursor.key(), (0, 2));
        handle_motion(Motion::Right, false, &mut st);
        assert_eq!(st.cursor.key(), (1, 0));
    }

    #[test]
    fn vertical_motion_keeps_render_column() {
        let mut st = state(b"\tx\nabcdefgh");
        st.cursor = Cursor::new(0, 1);
        st.sync_cursor();
        assert_eq!(st.cursor.render_col, 4);
        handle_motion(Motion::Down, false, &mut st);
        assert_eq!(st.cursor.key(), (1, 4));
        handle_motion(Motion::Up, false, &mut st);
        assert_eq!(st.cursor.key(), (0, 1));
    }

    #[test]
    fn vertical_motion_recomputes_stale_render_column() {
        let mut st = state(b"ab\tc\nabcdefghij");
        st.cursor = Cursor::new(0, 3);
        assert_eq!(st.cursor.render_col, 0);
        handle_motion(Motion::Down, false, &mut st);
        assert_eq!(st.cursor.key(), (1, 4));
    }

    #[test]
    fn shift_motion_anchors_then_plain_motion_clears() {
        let mut st = state(b"one\ntwo");
        st.cursor = Cursor::new(1, 2);
        handle_motion(Motion::Up, true, &mut st);
        assert_eq!(st.selection.anchor().map(|a| a.key()), Some((1, 2)));
        assert_eq!(st.cursor.key(), (0, 2));
        handle_motion(Motion::Left, true, &mut st);
        assert_eq!(st.selection.anchor().map(|a| a.key()), Some((1, 2)));
        handle_motion(Motion::Down, false, &mut st);
        assert!(!st.selection.is_active());
        assert_eq!(st.document.line_count(), 2);
    }

    #[test]
    fn shift_selection_can_be_disabled() {
        let mut st = state(b"one\ntwo");
        st.options.shift_selection = false;
        st.cursor = Cursor::new(1, 0);
        handle_motion(Motion::Up, true, &mut st);
        assert!(!st.selection.is_active());
        assert_eq!(st.cursor.row, 0);
    }

    #[test]
    fn page_down_moves_by_screen_height() {
        let text = vec![b"x".as_slice(); 30].join(&b'\n');
        let mut st = state(&text);
        handle_motion(Motion::PageDown, false, &mut st);
        assert_eq!(st.cursor.row, 10);
        assert_eq!(st.row_offset, 10);
        handle_motion(Motion::PageDown, false, &mut st);
        handle_motion(Motion::PageDown, false, &mut st);
        assert_eq!(st.cursor.row, 29);
        handle_motion(Motion::PageUp, false, &mut st);
        assert_eq!(st.cursor.row, 19);
    }

    #[test]
    fn document_end_goes_to_last_line_start() {
        let mut st = state(b"a\nb\nccc");
        st.cursor = Cursor::new(0, 1);
        handle_motion(Motion::DocumentEnd, false, &mut st);
        assert_eq!(st.cursor.key(), (2, 0));
        assert_eq!(handle_motion(Motion::DocumentEnd, false, &mut st), DispatchResult::clean());
    }
}
