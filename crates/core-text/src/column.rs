//! Byte column <-> render column mapping.
//!
//! A tab advances the render column to the next multiple of the tab width;
//! every other byte occupies exactly one cell. Byte columns are the unit of
//! all edits, render columns the unit of everything drawn on screen.

/// Cells consumed by a tab that starts at render column `rc`.
pub fn tab_advance(rc: usize, tab_width: usize) -> usize {
    let tw = tab_width.max(1);
    tw - (rc % tw)
}

/// Render column of byte column `col` in `line` (clamped to the line length).
pub fn byte_to_render(line: &[u8], col: usize, tab_width: usize) -> usize {
    line.iter().take(col).fold(0, |rc, &b| {
        if b == b'\t' {
            rc + tab_advance(rc, tab_width)
        } else {
            rc + 1
        }
    })
}

/// Byte column whose rendered start is at or past `render_col`.
///
/// A tab that would overshoot the target stops the walk at that tab's byte,
/// so a render column inside a tab maps to the tab itself.
pub fn render_to_byte(line: &[u8], render_col: usize, tab_width: usize) -> usize {
    let mut current = 0;
    let mut i = 0;
    while i < line.len() && current < render_col {
        if line[i] == b'\t' {
            let next = current + tab_advance(current, tab_width);
            if next > render_col {
                break;
            }
            current = next;
        } else {
            current += 1;
        }
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tabs_snap_to_stops() {
        assert_eq!(byte_to_render(b"\tx", 1, 4), 4);
        assert_eq!(byte_to_render(b"ab\tx", 3, 4), 4);
        assert_eq!(byte_to_render(b"abcd\tx", 5, 4), 8);
        assert_eq!(byte_to_render(b"a\t\tb", 3, 8), 16);
    }

    #[test]
    fn column_past_end_clamps() {
        assert_eq!(byte_to_render(b"abc", 10, 4), 3);
        assert_eq!(render_to_byte(b"abc", 10, 4), 3);
    }

    #[test]
    fn render_inside_tab_maps_to_tab_byte() {
        // tab spans render cells 1..4
        assert_eq!(render_to_byte(b"a\tb", 2, 4), 1);
        assert_eq!(render_to_byte(b"a\tb", 4, 4), 2);
        assert_eq!(render_to_byte(b"a\tb", 5, 4), 3);
    }

    #[test]
    fn zero_tab_width_is_treated_as_one() {
        assert_eq!(byte_to_render(b"\t\t", 2, 0), 2);
    }

    proptest! {
        #[test]
        fn render_byte_round_trip(
            line in proptest::collection::vec(prop_oneof![Just(b'\t'), Just(b' '), b'a'..=b'z'], 0..40),
            tab_width in 1usize..=16,
            pick in 0usize..=40,
        ) {
            let col = pick.min(line.len());
            let rc = byte_to_render(&line, col, tab_width);
            prop_assert_eq!(render_to_byte(&line, rc, tab_width), col);
        }

        #[test]
        fn render_column_is_strictly_increasing(
            line in proptest::collection::vec(prop_oneof![Just(b'\t'), b'a'..=b'z'], 0..40),
            tab_width in 1usize..=8,
        ) {
            let mut last = 0;
            for col in 0..=line.len() {
                let rc = byte_to_render(&line, col, tab_width);
                prop_assert!(col == 0 || rc > last);
                last = rc;
            }
        }
    }
}
