//! Line-oriented text document.
//!
//! A `Document` is an ordered list of byte lines (no stored terminators)
//! that always holds at least one line. Each `Line` carries a lazily
//! computed highlight array guarded by a dirty flag.

use std::path::{Path, PathBuf};

use core_syntax::{Highlight, Language, LanguageProfile, highlight_line};
use tracing::trace;

pub mod column;
pub mod io;

pub use io::{DiskStore, DocumentError, FileStore};

/// A single line of text plus its cached highlight classification.
#[derive(Debug, Clone, Default)]
pub struct Line {
    text: Vec<u8>,
    hl: Option<Vec<Highlight>>,
    hl_dirty: bool,
}

impl Line {
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            hl: None,
            hl_dirty: true,
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the highlight array must be recomputed before use.
    pub fn is_dirty(&self) -> bool {
        self.hl_dirty
    }

    /// Cached highlights; `None` until first computed or after invalidation.
    pub fn highlight(&self) -> Option<&[Highlight]> {
        self.hl.as_deref()
    }

    /// Store a freshly computed classification and clear the dirty flag.
    pub fn set_highlight(&mut self, hl: Vec<Highlight>) {
        debug_assert_eq!(hl.len(), self.text.len());
        self.hl = Some(hl);
        self.hl_dirty = false;
    }

    pub fn invalidate(&mut self) {
        self.hl = None;
        self.hl_dirty = true;
    }

    fn edited(&mut self) {
        self.invalidate();
    }
}

/// Cursor location in byte coordinates plus its cached render column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub render_col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            render_col: 0,
        }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// (row, col) ordering key; render_col plays no part in ordering.
    pub fn key(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Keep row within the document and col within the row, then refresh render_col.
    pub fn clamp_to(&mut self, doc: &Document, tab_width: usize) {
        if self.row >= doc.line_count() {
            self.row = doc.line_count() - 1;
        }
        let len = doc.line_len(self.row);
        if self.col > len {
            self.col = len;
        }
        self.render_col = doc.byte_to_render(self.row, self.col, tab_width);
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    filename: Option<PathBuf>,
    modified: bool,
    language: Language,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An unnamed document with one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new(Vec::new())],
            filename: None,
            modified: false,
            language: Language::Text,
        }
    }

    /// Split raw file content into lines. `\n` terminates a line and a `\r`
    /// immediately before it is dropped; a final unterminated fragment is a
    /// line of its own. Empty content gives one empty line.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                let mut end = i;
                if end > start && bytes[end - 1] == b'\r' {
                    end -= 1;
                }
                lines.push(Line::new(&bytes[start..end]));
                start = i + 1;
            }
        }
        if start < bytes.len() {
            lines.push(Line::new(&bytes[start..]));
        }
        if lines.is_empty() {
            lines.push(Line::new(Vec::new()));
        }
        Self {
            lines,
            filename: None,
            modified: false,
            language: Language::Text,
        }
    }

    /// Serialise every line followed by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(line.text());
            out.push(b'\n');
        }
        out
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Adopt a file name and re-detect the language from it.
    pub fn set_filename(&mut self, path: PathBuf) {
        let language = Language::detect(&path);
        self.filename = Some(path);
        self.set_language(language);
    }

    pub fn display_name(&self) -> String {
        match &self.filename {
            Some(p) => p.display().to_string(),
            None => "[No Name]".to_string(),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.invalidate_highlights();
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Text of `row`, or an empty slice when out of range.
    pub fn get_line(&self, row: usize) -> &[u8] {
        self.lines.get(row).map(Line::text).unwrap_or(&[])
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::len)
    }

    /// Insert a line before index `at` (clamped to `line_count`).
    pub fn insert_line(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        let at = at.min(self.lines.len());
        self.lines.insert(at, Line::new(text));
        self.modified = true;
        trace!(target: "text.buffer", at, lines = self.lines.len(), "insert_line");
    }

    /// Remove line `at`. Out of range is a no-op; removing the only line
    /// clears its text instead so the document never becomes empty.
    pub fn delete_line(&mut self, at: usize) {
        if at >= self.lines.len() {
            return;
        }
        if self.lines.len() == 1 {
            let line = &mut self.lines[0];
            line.text.clear();
            line.edited();
        } else {
            self.lines.remove(at);
        }
        self.modified = true;
        trace!(target: "text.buffer", at, lines = self.lines.len(), "delete_line");
    }

    /// Insert `ch` at byte column `col` (clamped to the line length).
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let col = col.min(line.text.len());
        line.text.insert(col, ch);
        line.edited();
        self.modified = true;
    }

    /// Remove the byte at `col`; a no-op at or past the end of the line.
    pub fn delete_char(&mut self, row: usize, col: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        if col >= line.text.len() {
            return;
        }
        line.text.remove(col);
        line.edited();
        self.modified = true;
    }

    pub fn byte_to_render(&self, row: usize, col: usize, tab_width: usize) -> usize {
        column::byte_to_render(self.get_line(row), col, tab_width)
    }

    pub fn render_to_byte(&self, row: usize, render_col: usize, tab_width: usize) -> usize {
        column::render_to_byte(self.get_line(row), render_col, tab_width)
    }

    /// Recompute the highlight array of `row` if its dirty flag is set.
    /// Returns true when a recomputation happened.
    pub fn refresh_highlight(&mut self, row: usize, profile: &LanguageProfile) -> bool {
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        if !line.is_dirty() {
            return false;
        }
        let hl = highlight_line(&line.text, profile);
        line.set_highlight(hl);
        true
    }

    pub fn invalidate_highlights(&mut self) {
        for line in &mut self.lines {
            line.invalidate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_syntax::SyntaxRegistry;
    use pretty_assertions::assert_eq;

    fn texts(doc: &Document) -> Vec<String> {
        doc.lines()
            .map(|l| String::from_utf8_lossy(l.text()).into_owned())
            .collect()
    }

    #[test]
    fn new_document_has_one_empty_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.get_line(0), b"");
        assert!(!doc.is_modified());
        assert_eq!(doc.display_name(), "[No Name]");
    }

    #[test]
    fn splits_on_newline_and_strips_crlf() {
        let doc = Document::from_bytes(b"x\r\ny");
        assert_eq!(texts(&doc), vec!["x", "y"]);
        let doc = Document::from_bytes(b"a\nb\n");
        assert_eq!(texts(&doc), vec!["a", "b"]);
        let doc = Document::from_bytes(b"a\n\n");
        assert_eq!(texts(&doc), vec!["a", ""]);
    }

    #[test]
    fn lone_cr_is_kept() {
        let doc = Document::from_bytes(b"a\rb\nc\r");
        assert_eq!(texts(&doc), vec!["a\rb", "c\r"]);
    }

    #[test]
    fn empty_content_is_one_empty_line() {
        let doc = Document::from_bytes(b"");
        assert_eq!(doc.line_count(), 1);
        assert!(!doc.is_modified());
    }

    #[test]
    fn insert_line_clamps_and_marks_modified() {
        let mut doc = Document::new();
        doc.insert_line(99, "tail");
        assert_eq!(texts(&doc), vec!["", "tail"]);
        assert!(doc.is_modified());
    }

    #[test]
    fn delete_line_out_of_range_is_noop() {
        let mut doc = Document::from_bytes(b"a\nb");
        doc.delete_line(5);
        assert_eq!(doc.line_count(), 2);
        assert!(!doc.is_modified());
    }

    #[test]
    fn deleting_only_line_clears_it() {
        let mut doc = Document::from_bytes(b"only");
        doc.delete_line(0);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.get_line(0), b"");
        assert!(doc.is_modified());
    }

    #[test]
    fn char_edits_clamp_and_ignore_past_end() {
        let mut doc = Document::from_bytes(b"ab");
        doc.insert_char(0, 50, b'c');
        assert_eq!(doc.get_line(0), b"abc");
        doc.delete_char(0, 3);
        assert_eq!(doc.get_line(0), b"abc");
        doc.delete_char(0, 0);
        assert_eq!(doc.get_line(0), b"bc");
        doc.insert_char(7, 0, b'z');
        assert_eq!(doc.line_count(), 1);
    }

    #[test]
    fn get_line_out_of_range_is_empty() {
        let doc = Document::from_bytes(b"a");
        assert_eq!(doc.get_line(3), b"");
        assert_eq!(doc.line_len(3), 0);
    }

    #[test]
    fn highlight_refresh_follows_dirty_flag() {
        let reg = SyntaxRegistry::new();
        let mut doc = Document::from_bytes(b"int x;");
        doc.set_language(Language::C);
        let profile = reg.profile(doc.language());
        assert!(doc.line(0).unwrap().is_dirty());
        assert!(doc.refresh_highlight(0, profile));
        assert!(!doc.refresh_highlight(0, profile));
        assert_eq!(doc.line(0).unwrap().highlight().unwrap()[0], Highlight::Keyword);
        doc.insert_char(0, 0, b' ');
        assert!(doc.line(0).unwrap().is_dirty());
        assert!(doc.line(0).unwrap().highlight().is_none());
        assert!(doc.refresh_highlight(0, profile));
        assert_eq!(doc.line(0).unwrap().highlight().unwrap().len(), 7);
    }

    #[test]
    fn cursor_clamps_into_document() {
        let doc = Document::from_bytes(b"ab\n\tc");
        let mut c = Cursor::new(9, 9);
        c.clamp_to(&doc, 4);
        assert_eq!((c.row, c.col, c.render_col), (1, 2, 5));
    }
}
