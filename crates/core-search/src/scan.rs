//! Literal substring scanning with optional ASCII case folding.

use core_text::Document;

#[inline]
fn fold(b: u8, case_sensitive: bool) -> u8 {
    if case_sensitive {
        b
    } else {
        b.to_ascii_lowercase()
    }
}

/// True when `query` occurs in `line` starting exactly at byte `col`.
pub fn matches_at(line: &[u8], col: usize, query: &[u8], case_sensitive: bool) -> bool {
    if query.is_empty() || col + query.len() > line.len() {
        return false;
    }
    line[col..col + query.len()]
        .iter()
        .zip(query)
        .all(|(&l, &q)| fold(l, case_sensitive) == fold(q, case_sensitive))
}

/// Non-overlapping occurrences in one line, scanning left to right.
pub fn count_in_line(line: &[u8], query: &[u8], case_sensitive: bool) -> usize {
    if query.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut col = 0;
    while col + query.len() <= line.len() {
        if matches_at(line, col, query, case_sensitive) {
            count += 1;
            col += query.len();
        } else {
            col += 1;
        }
    }
    count
}

pub fn count_matches(doc: &Document, query: &[u8], case_sensitive: bool) -> usize {
    doc.lines()
        .map(|l| count_in_line(l.text(), query, case_sensitive))
        .sum()
}

/// First match at or after (row, col), not wrapping.
pub fn scan_forward(
    doc: &Document,
    row: usize,
    col: usize,
    query: &[u8],
    case_sensitive: bool,
) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }
    for r in row..doc.line_count() {
        let line = doc.get_line(r);
        let mut c = if r == row { col } else { 0 };
        while c + query.len() <= line.len() {
            if matches_at(line, c, query, case_sensitive) {
                return Some((r, c));
            }
            c += 1;
        }
    }
    None
}

/// Last match starting at or before (row, col) going towards the top, not
/// wrapping. `col: None` starts from the end of `row`.
pub fn scan_backward(
    doc: &Document,
    row: usize,
    col: Option<usize>,
    query: &[u8],
    case_sensitive: bool,
) -> Option<(usize, usize)> {
    if query.is_empty() || doc.line_count() == 0 {
        return None;
    }
    let row = row.min(doc.line_count() - 1);
    for r in (0..=row).rev() {
        let line = doc.get_line(r);
        if query.len() > line.len() {
            continue;
        }
        let last_start = line.len() - query.len();
        let start = match (r == row, col) {
            (true, Some(c)) => c.min(last_start),
            _ => last_start,
        };
        for c in (0..=start).rev() {
            if matches_at(line, c, query, case_sensitive) {
                return Some((r, c));
            }
        }
    }
    None
}

/// Replace every non-overlapping occurrence in `line`, left to right.
/// Returns the new text and the number of replacements.
pub fn replace_in_line(
    line: &[u8],
    query: &[u8],
    replacement: &[u8],
    case_sensitive: bool,
) -> (Vec<u8>, usize) {
    if query.is_empty() {
        return (line.to_vec(), 0);
    }
    let mut out = Vec::with_capacity(line.len());
    let mut count = 0;
    let mut col = 0;
    while col < line.len() {
        if matches_at(line, col, query, case_sensitive) {
            out.extend_from_slice(replacement);
            col += query.len();
            count += 1;
        } else {
            out.push(line[col]);
            col += 1;
        }
    }
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn case_folding_is_ascii_only() {
        assert!(matches_at(b"Hello", 0, b"hello", false));
        assert!(!matches_at(b"Hello", 0, b"hello", true));
        assert!(!matches_at("É".as_bytes(), 0, "é".as_bytes(), false));
    }

    #[test]
    fn counting_skips_past_each_hit() {
        assert_eq!(count_in_line(b"aaaa", b"aa", true), 2);
        assert_eq!(count_in_line(b"aaa", b"aa", true), 1);
        assert_eq!(count_in_line(b"abc", b"", true), 0);
    }

    #[test]
    fn replace_in_line_grows_text() {
        assert_eq!(replace_in_line(b"aaa", b"a", b"bb", true), (b"bbbbbb".to_vec(), 3));
        assert_eq!(replace_in_line(b"xAx", b"a", b"-", false), (b"x-x".to_vec(), 1));
        assert_eq!(replace_in_line(b"abc", b"zz", b"-", false), (b"abc".to_vec(), 0));
    }

    #[test]
    fn backward_scan_respects_start_column() {
        let doc = Document::from_bytes(b"ab ab ab");
        assert_eq!(scan_backward(&doc, 0, Some(5), b"ab", true), Some((0, 3)));
        assert_eq!(scan_backward(&doc, 0, None, b"ab", true), Some((0, 6)));
        assert_eq!(scan_backward(&doc, 0, Some(2), b"ab", true), Some((0, 0)));
    }

    #[test]
    fn forward_scan_crosses_lines() {
        let doc = Document::from_bytes(b"foo\nbar\nfoo");
        assert_eq!(scan_forward(&doc, 0, 1, b"foo", true), Some((2, 0)));
        assert_eq!(scan_forward(&doc, 2, 1, b"foo", true), None);
    }

    proptest! {
        #[test]
        fn replace_count_matches_line_count(
            line in proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'A'), Just(b'b')], 0..30),
            query in proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b')], 1..4),
            cs in any::<bool>(),
        ) {
            let (_, replaced) = replace_in_line(&line, &query, b"x", cs);
            prop_assert_eq!(replaced, count_in_line(&line, &query, cs));
        }

        #[test]
        fn replacing_with_same_text_is_identity(
            line in proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'\t')], 0..30),
            query in proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b')], 1..4),
        ) {
            let (out, _) = replace_in_line(&line, &query, &query, true);
            prop_assert_eq!(out, line);
        }
    }
}
