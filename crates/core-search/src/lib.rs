//! Literal search and replace over a `Document`.
//!
//! `SearchState` owns the active query and its match count. The lookups
//! here never mutate the document: replacements are returned as new line
//! texts so the caller can apply them through its undo history.

use core_text::Document;
use tracing::debug;

pub mod scan;

pub use scan::{count_matches, matches_at, replace_in_line, scan_backward, scan_forward};

/// Result of a next/prev lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { row: usize, col: usize, wrapped: bool },
    NotFound,
    NoQuery,
}

/// Lines rewritten by a replace-all, with the total occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacePlan {
    pub lines: Vec<(usize, Vec<u8>)>,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: Vec<u8>,
    pub forward: bool,
    pub case_sensitive: bool,
    match_count: usize,
    current_match: usize,
}

impl SearchState {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            query: Vec::new(),
            forward: true,
            case_sensitive,
            match_count: 0,
            current_match: 0,
        }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// 1-based index of the last match jumped to, 0 before any jump.
    pub fn current_match(&self) -> usize {
        self.current_match
    }

    /// Replace the query wholesale and recount matches across the document.
    pub fn update_query(&mut self, query: impl Into<Vec<u8>>, doc: &Document) -> usize {
        self.query = query.into();
        self.current_match = 0;
        self.recount(doc);
        debug!(target: "search", query_len = self.query.len(), matches = self.match_count, "query_updated");
        self.match_count
    }

    pub fn recount(&mut self, doc: &Document) {
        self.match_count = count_matches(doc, &self.query, self.case_sensitive);
    }

    /// Forget the query entirely.
    pub fn clear(&mut self) {
        self.query.clear();
        self.match_count = 0;
        self.current_match = 0;
    }

    /// Next match strictly after (row, col), wrapping once to the top.
    pub fn find_next(&mut self, doc: &Document, row: usize, col: usize) -> SearchOutcome {
        if self.query.is_empty() {
            return SearchOutcome::NoQuery;
        }
        let cs = self.case_sensitive;
        let outcome = match scan_forward(doc, row, col + 1, &self.query, cs) {
            Some((r, c)) => SearchOutcome::Found { row: r, col: c, wrapped: false },
            None => match scan_forward(doc, 0, 0, &self.query, cs) {
                Some((r, c)) => SearchOutcome::Found { row: r, col: c, wrapped: true },
                None => SearchOutcome::NotFound,
            },
        };
        self.note(doc, outcome);
        outcome
    }

    /// Previous match strictly before (row, col), wrapping once to the bottom.
    pub fn find_prev(&mut self, doc: &Document, row: usize, col: usize) -> SearchOutcome {
        if self.query.is_empty() {
            return SearchOutcome::NoQuery;
        }
        let cs = self.case_sensitive;
        let first = if col > 0 {
            scan_backward(doc, row, Some(col - 1), &self.query, cs)
        } else if row > 0 {
            scan_backward(doc, row - 1, None, &self.query, cs)
        } else {
            None
        };
        let last_row = doc.line_count().saturating_sub(1);
        let outcome = match first {
            Some((r, c)) => SearchOutcome::Found { row: r, col: c, wrapped: false },
            None => match scan_backward(doc, last_row, None, &self.query, cs) {
                Some((r, c)) => SearchOutcome::Found { row: r, col: c, wrapped: true },
                None => SearchOutcome::NotFound,
            },
        };
        self.note(doc, outcome);
        outcome
    }

    fn note(&mut self, doc: &Document, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Found { row, col, wrapped } => {
                self.current_match = self.ordinal_of(doc, row, col);
                debug!(target: "search", row, col, wrapped, current = self.current_match, total = self.match_count, "match");
            }
            SearchOutcome::NotFound => {
                self.current_match = 0;
                debug!(target: "search", "no_match");
            }
            SearchOutcome::NoQuery => {}
        }
    }

    /// Position of (row, col) among the counted matches, 1-based.
    fn ordinal_of(&self, doc: &Document, row: usize, col: usize) -> usize {
        let before: usize = (0..row)
            .map(|r| scan::count_in_line(doc.get_line(r), &self.query, self.case_sensitive))
            .sum();
        let line = doc.get_line(row);
        let upto = &line[..(col + self.query.len()).min(line.len())];
        before + scan::count_in_line(upto, &self.query, self.case_sensitive).max(1)
    }

    /// True when the query matches exactly at (row, col).
    pub fn matches_at(&self, doc: &Document, row: usize, col: usize) -> bool {
        matches_at(doc.get_line(row), col, &self.query, self.case_sensitive)
    }

    /// New text for `row` with the match at `col` replaced, or `None` when
    /// the query does not match there.
    pub fn replace_at(
        &self,
        doc: &Document,
        row: usize,
        col: usize,
        replacement: &[u8],
    ) -> Option<Vec<u8>> {
        if !self.matches_at(doc, row, col) {
            return None;
        }
        let line = doc.get_line(row);
        let mut out = Vec::with_capacity(line.len() + replacement.len());
        out.extend_from_slice(&line[..col]);
        out.extend_from_slice(replacement);
        out.extend_from_slice(&line[col + self.query.len()..]);
        Some(out)
    }

    /// Every line that changes under replace-all.
    pub fn plan_replace_all(&self, doc: &Document, replacement: &[u8]) -> ReplacePlan {
        let mut plan = ReplacePlan::default();
        if self.query.is_empty() {
            return plan;
        }
        for (row, line) in doc.lines().enumerate() {
            let (text, n) = replace_in_line(line.text(), &self.query, replacement, self.case_sensitive);
            if n > 0 {
                plan.lines.push((row, text));
                plan.count += n;
            }
        }
        debug!(target: "search", count = plan.count, lines = plan.lines.len(), "replace_all_planned");
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_query_counts_case_insensitively() {
        let doc = Document::from_bytes(b"Foo foo\nFOO");
        let mut s = SearchState::new(false);
        assert_eq!(s.update_query("foo", &doc), 3);
        s.case_sensitive = true;
        s.recount(&doc);
        assert_eq!(s.match_count(), 1);
    }

    #[test]
    fn next_starts_after_cursor_and_wraps_once() {
        let doc = Document::from_bytes(b"foo x\ny foo");
        let mut s = SearchState::new(false);
        s.update_query("foo", &doc);
        assert_eq!(s.find_next(&doc, 0, 0), SearchOutcome::Found { row: 1, col: 2, wrapped: false });
        assert_eq!(s.current_match(), 2);
        assert_eq!(s.find_next(&doc, 1, 2), SearchOutcome::Found { row: 0, col: 0, wrapped: true });
        assert_eq!(s.current_match(), 1);
    }

    #[test]
    fn zero_matches_reports_not_found_after_one_wrap() {
        let doc = Document::from_bytes(b"abc\ndef");
        let mut s = SearchState::new(false);
        s.update_query("zzz", &doc);
        assert_eq!(s.find_next(&doc, 0, 0), SearchOutcome::NotFound);
        assert_eq!(s.find_prev(&doc, 1, 2), SearchOutcome::NotFound);
    }

    #[test]
    fn prev_wraps_to_bottom() {
        let doc = Document::from_bytes(b"foo\nbar\nfoo bar");
        let mut s = SearchState::new(true);
        s.update_query("foo", &doc);
        assert_eq!(s.find_prev(&doc, 0, 0), SearchOutcome::Found { row: 2, col: 0, wrapped: true });
        assert_eq!(s.find_prev(&doc, 2, 0), SearchOutcome::Found { row: 0, col: 0, wrapped: false });
    }

    #[test]
    fn empty_query_is_reported() {
        let doc = Document::new();
        let mut s = SearchState::new(false);
        assert_eq!(s.find_next(&doc, 0, 0), SearchOutcome::NoQuery);
    }

    #[test]
    fn replace_at_validates_position() {
        let doc = Document::from_bytes(b"let foo = foo;");
        let mut s = SearchState::new(true);
        s.update_query("foo", &doc);
        assert_eq!(s.replace_at(&doc, 0, 4, b"bar"), Some(b"let bar = foo;".to_vec()));
        assert_eq!(s.replace_at(&doc, 0, 5, b"bar"), None);
    }

    #[test]
    fn replace_all_plan_counts_every_occurrence() {
        let doc = Document::from_bytes(b"aaa\nxyz\na");
        let mut s = SearchState::new(true);
        s.update_query("a", &doc);
        let plan = s.plan_replace_all(&doc, b"bb");
        assert_eq!(plan.count, 4);
        assert_eq!(plan.lines, vec![(0, b"bbbbbb".to_vec()), (2, b"bb".to_vec())]);
    }

    #[test]
    fn clear_forgets_query() {
        let doc = Document::from_bytes(b"a");
        let mut s = SearchState::new(true);
        s.update_query("a", &doc);
        s.clear();
        assert!(!s.has_query());
        assert_eq!(s.match_count(), 0);
    }
}
