//! Undoable document edits.
//!
//! Each public method is one logical edit: it opens an undo group, applies
//! primitive actions in order and records each of them, then leaves the
//! cursor where the edit ends. An active selection is removed first by
//! every edit that inserts or deletes text.

use core_text::Cursor;
use tracing::trace;

use crate::{EditorState, UndoAction};

impl EditorState {
    fn commit(&mut self, group: u64, before: Cursor, actions: impl IntoIterator<Item = UndoAction>) {
        for action in actions {
            action.apply(&mut self.document);
            self.undo.record(group, before, action);
        }
    }

    /// Actions that swap the text of `row` for `text`.
    fn replace_line_actions(&self, row: usize, text: Vec<u8>) -> [UndoAction; 2] {
        [
            UndoAction::LineInsert { row, text },
            UndoAction::LineDelete {
                row: row + 1,
                text: self.document.get_line(row).to_vec(),
            },
        ]
    }

    /// Selected bytes with `\n` between lines; empty without a selection.
    pub fn selection_text(&self) -> Vec<u8> {
        let Some((s, e)) = self.selection.range(self.cursor) else {
            return Vec::new();
        };
        let first = self.document.get_line(s.row);
        if s.row == e.row {
            let end = e.col.min(first.len());
            return first[s.col.min(end)..end].to_vec();
        }
        let mut out = first[s.col.min(first.len())..].to_vec();
        for row in s.row + 1..e.row {
            out.push(b'\n');
            out.extend_from_slice(self.document.get_line(row));
        }
        out.push(b'\n');
        let last = self.document.get_line(e.row);
        out.extend_from_slice(&last[..e.col.min(last.len())]);
        out
    }

    /// Remove the selected span inside `group`; the cursor lands on its start.
    fn delete_selection_in(&mut self, group: u64, before: Cursor) -> bool {
        let Some((s, e)) = self.selection.range(self.cursor) else {
            self.selection.clear();
            return false;
        };
        let first = self.document.get_line(s.row);
        let last = self.document.get_line(e.row);
        let mut joined = first[..s.col.min(first.len())].to_vec();
        joined.extend_from_slice(&last[e.col.min(last.len())..]);

        let mut actions = vec![UndoAction::LineInsert {
            row: s.row,
            text: joined,
        }];
        for row in s.row..=e.row {
            actions.push(UndoAction::LineDelete {
                row: s.row + 1,
                text: self.document.get_line(row).to_vec(),
            });
        }
        trace!(target: "state.edit", start_row = s.row, end_row = e.row, "delete_selection");
        self.commit(group, before, actions);
        self.selection.clear();
        self.cursor = Cursor::new(s.row, s.col);
        true
    }

    pub fn delete_selection(&mut self) -> bool {
        let group = self.undo.new_group();
        let before = self.cursor;
        let deleted = self.delete_selection_in(group, before);
        if deleted {
            self.after_edit();
        }
        deleted
    }

    /// Insert a byte at the cursor, replacing the selection if any.
    pub fn insert_byte(&mut self, ch: u8) {
        let group = self.undo.new_group();
        let before = self.cursor;
        self.delete_selection_in(group, before);
        let Cursor { row, col, .. } = self.cursor;
        self.commit(group, before, [UndoAction::CharInsert { row, col, ch }]);
        self.cursor.col = col + 1;
        self.after_edit();
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let group = self.undo.new_group();
        let before = self.cursor;
        self.delete_selection_in(group, before);
        let Cursor { row, col, .. } = self.cursor;
        let text = self.document.get_line(row).to_vec();
        if col >= text.len() {
            self.commit(group, before, [UndoAction::LineInsert { row: row + 1, text: Vec::new() }]);
        } else {
            let (head, tail) = text.split_at(col);
            let actions = [
                UndoAction::LineInsert { row, text: head.to_vec() },
                UndoAction::LineDelete { row: row + 1, text: text.clone() },
                UndoAction::LineInsert { row: row + 1, text: tail.to_vec() },
            ];
            self.commit(group, before, actions);
        }
        self.cursor = Cursor::new(row + 1, 0);
        self.after_edit();
    }

    /// Delete backwards; at column 0 the line joins the previous one.
    pub fn backspace(&mut self) -> bool {
        let group = self.undo.new_group();
        let before = self.cursor;
        if self.delete_selection_in(group, before) {
            self.after_edit();
            return true;
        }
        let Cursor { row, col, .. } = self.cursor;
        if col > 0 {
            let ch = self.document.get_line(row)[col - 1];
            self.commit(group, before, [UndoAction::CharDelete { row, col: col - 1, ch }]);
            self.cursor.col = col - 1;
        } else if row > 0 {
            let prev = self.document.get_line(row - 1).to_vec();
            let cur = self.document.get_line(row).to_vec();
            let mut joined = prev.clone();
            joined.extend_from_slice(&cur);
            let join_col = prev.len();
            let actions = [
                UndoAction::LineInsert { row: row - 1, text: joined },
                UndoAction::LineDelete { row, text: prev },
                UndoAction::LineDelete { row, text: cur },
            ];
            self.commit(group, before, actions);
            self.cursor = Cursor::new(row - 1, join_col);
        } else {
            return false;
        }
        self.after_edit();
        true
    }

    /// Delete the byte under the cursor; at end of line the next line joins.
    pub fn delete_forward(&mut self) -> bool {
        let group = self.undo.new_group();
        let before = self.cursor;
        if self.delete_selection_in(group, before) {
            self.after_edit();
            return true;
        }
        let Cursor { row, col, .. } = self.cursor;
        let len = self.document.line_len(row);
        if col < len {
            let ch = self.document.get_line(row)[col];
            self.commit(group, before, [UndoAction::CharDelete { row, col, ch }]);
        } else if row + 1 < self.document.line_count() {
            let cur = self.document.get_line(row).to_vec();
            let next = self.document.get_line(row + 1).to_vec();
            let mut joined = cur.clone();
            joined.extend_from_slice(&next);
            let actions = [
                UndoAction::LineInsert { row, text: joined },
                UndoAction::LineDelete { row: row + 1, text: cur },
                UndoAction::LineDelete { row: row + 1, text: next },
            ];
            self.commit(group, before, actions);
        } else {
            return false;
        }
        self.after_edit();
        true
    }

    /// Normal-mode `x`: delete the byte under the cursor without joining lines.
    pub fn delete_under_cursor(&mut self) -> bool {
        let Cursor { row, col, .. } = self.cursor;
        let Some(&ch) = self.document.get_line(row).get(col) else {
            return false;
        };
        let group = self.undo.new_group();
        let before = self.cursor;
        self.commit(group, before, [UndoAction::CharDelete { row, col, ch }]);
        self.after_edit();
        true
    }

    /// Remove the cursor line and return its text. The only line of a
    /// document is emptied instead.
    pub fn delete_current_line(&mut self) -> Vec<u8> {
        let group = self.undo.new_group();
        let before = self.cursor;
        let row = self.cursor.row;
        let text = self.document.get_line(row).to_vec();
        if self.document.line_count() > 1 {
            self.commit(group, before, [UndoAction::LineDelete { row, text: text.clone() }]);
        } else {
            let actions = self.replace_line_actions(0, Vec::new());
            self.commit(group, before, actions);
        }
        self.selection.clear();
        self.cursor.col = 0;
        self.after_edit();
        text
    }

    /// Open an empty line below (or above) the cursor line and move onto it.
    pub fn open_line(&mut self, below: bool) {
        let group = self.undo.new_group();
        let before = self.cursor;
        let at = if below { self.cursor.row + 1 } else { self.cursor.row };
        self.commit(group, before, [UndoAction::LineInsert { row: at, text: Vec::new() }]);
        self.selection.clear();
        self.cursor = Cursor::new(at, 0);
        self.after_edit();
    }

    /// Copy the selection into the clipboard; returns the byte count.
    pub fn copy_selection(&mut self) -> Option<usize> {
        self.selection.range(self.cursor)?;
        self.clipboard = self.selection_text();
        Some(self.clipboard.len())
    }

    /// Copy the cursor line into the clipboard.
    pub fn copy_line(&mut self) -> usize {
        self.clipboard = self.document.get_line(self.cursor.row).to_vec();
        self.clipboard.len()
    }

    /// Move the selection into the clipboard.
    pub fn cut_selection(&mut self) -> Option<usize> {
        let n = self.copy_selection()?;
        self.delete_selection();
        Some(n)
    }

    /// Insert the clipboard at the cursor, splitting lines on `\n`. The
    /// cursor ends after the pasted text.
    pub fn paste(&mut self) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        let group = self.undo.new_group();
        let before = self.cursor;
        self.delete_selection_in(group, before);

        let clip = self.clipboard.clone();
        let pieces: Vec<&[u8]> = clip.split(|b| *b == b'\n').collect();
        let Cursor { row, col, .. } = self.cursor;
        let line = self.document.get_line(row).to_vec();
        let col = col.min(line.len());
        let (head, tail) = line.split_at(col);

        let last_idx = pieces.len() - 1;
        if last_idx == 0 {
            let mut text = head.to_vec();
            text.extend_from_slice(pieces[0]);
            text.extend_from_slice(tail);
            let actions = self.replace_line_actions(row, text);
            self.commit(group, before, actions);
            self.cursor = Cursor::new(row, col + pieces[0].len());
        } else {
            let mut first = head.to_vec();
            first.extend_from_slice(pieces[0]);
            let mut actions = vec![
                UndoAction::LineInsert { row, text: first },
                UndoAction::LineDelete { row: row + 1, text: line.clone() },
            ];
            for (i, piece) in pieces.iter().enumerate().skip(1) {
                let mut text = piece.to_vec();
                if i == last_idx {
                    text.extend_from_slice(tail);
                }
                actions.push(UndoAction::LineInsert { row: row + i, text });
            }
            self.commit(group, before, actions);
            self.cursor = Cursor::new(row + last_idx, pieces[last_idx].len());
        }
        trace!(target: "state.edit", bytes = clip.len(), lines = pieces.len(), "paste");
        self.after_edit();
        true
    }

    /// Replace the query match starting at the cursor.
    pub fn replace_match_at_cursor(&mut self, replacement: &[u8]) -> bool {
        let Cursor { row, col, .. } = self.cursor;
        let Some(text) = self.search.replace_at(&self.document, row, col, replacement) else {
            return false;
        };
        let group = self.undo.new_group();
        let before = self.cursor;
        let actions = self.replace_line_actions(row, text);
        self.commit(group, before, actions);
        self.after_edit();
        true
    }

    /// Replace every match in the document as one undoable edit; returns
    /// the number of occurrences replaced.
    pub fn replace_all_matches(&mut self, replacement: &[u8]) -> usize {
        let plan = self.search.plan_replace_all(&self.document, replacement);
        if plan.count == 0 {
            return 0;
        }
        let group = self.undo.new_group();
        let before = self.cursor;
        for (row, text) in plan.lines {
            let actions = self.replace_line_actions(row, text);
            self.commit(group, before, actions);
        }
        self.selection.clear();
        self.after_edit();
        plan.count
    }
}
