mod common;
use common::*;

use pretty_assertions::assert_eq;

#[test]
fn shift_up_starts_selection_and_plain_up_clears_it() {
    let mut st = editor("one\ntwo\nthree");
    feed(&mut st, b"jjll");
    assert_eq!(st.cursor.key(), (2, 2));

    feed(&mut st, b"\x1b[1;2A");
    assert_eq!(st.selection.anchor().map(|a| a.key()), Some((2, 2)));
    assert_eq!(st.cursor.key(), (1, 2));

    feed(&mut st, b"\x1b[A");
    assert!(!st.selection.is_active());
    assert_eq!(st.cursor.key(), (0, 2));
    assert_eq!(lines(&st), ["one", "two", "three"]);
}

#[test]
fn repeated_shift_motions_extend_from_the_same_anchor() {
    let mut st = editor("abcdef");
    feed(&mut st, b"\x1b[1;2C\x1b[1;2C\x1b[1;2C");
    assert_eq!(st.selection.anchor().map(|a| a.key()), Some((0, 0)));
    assert_eq!(st.selection_text(), b"abc");
    feed(&mut st, b"\x1b[1;2D");
    assert_eq!(st.selection_text(), b"ab");
}

#[test]
fn typing_replaces_selection_in_insert_mode() {
    let mut st = editor("abcdef");
    feed(&mut st, b"i\x1b[1;2C\x1b[1;2CX");
    assert_eq!(lines(&st), ["Xcdef"]);
    assert_eq!(st.cursor.key(), (0, 1));
    assert!(!st.selection.is_active());
    // selection removal and the typed byte undo together
    feed(&mut st, b"\x1a");
    assert_eq!(lines(&st), ["abcdef"]);
}

#[test]
fn multi_line_selection_cut_and_paste() {
    let mut st = editor("first\nsecond\nthird");
    feed(&mut st, b"l\x1b[1;2B\x1b[1;2B");
    assert_eq!(st.selection_text(), b"irst\nsecond\nt");
    feed(&mut st, b"X");
    assert_eq!(lines(&st), ["fhird"]);
    assert_eq!(st.status_text(), Some("Selection cut"));
    feed(&mut st, b"\x1b[F");
    feed(&mut st, b"p");
    assert_eq!(lines(&st), ["fhirdirst", "second", "t"]);
    assert_eq!(st.cursor.key(), (2, 1));
}

#[test]
fn shift_home_end_select_to_line_edges() {
    let mut st = editor("hello");
    feed(&mut st, b"ll\x1b[1;2F");
    assert_eq!(st.selection_text(), b"llo");
    feed(&mut st, b"y");
    assert_eq!(st.clipboard, b"llo");
    assert!(!st.selection.is_active());
}
