//! Action-based undo/redo.
//!
//! Every document mutation is expressed as a sequence of primitive
//! `UndoAction`s. An edit triggered by one key is recorded under a single
//! group id so undo and redo replay it atomically. Both stacks store actions
//! whose *inverse* performs the step: undo pops from the undo stack, applies
//! the inverse and pushes that inverse onto the redo stack; redo does the
//! same in the other direction.

use core_text::{Cursor, Document};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    CharInsert { row: usize, col: usize, ch: u8 },
    CharDelete { row: usize, col: usize, ch: u8 },
    LineInsert { row: usize, text: Vec<u8> },
    LineDelete { row: usize, text: Vec<u8> },
}

impl UndoAction {
    pub fn inverse(&self) -> UndoAction {
        match self {
            UndoAction::CharInsert { row, col, ch } => UndoAction::CharDelete {
                row: *row,
                col: *col,
                ch: *ch,
            },
            UndoAction::CharDelete { row, col, ch } => UndoAction::CharInsert {
                row: *row,
                col: *col,
                ch: *ch,
            },
            UndoAction::LineInsert { row, text } => UndoAction::LineDelete {
                row: *row,
                text: text.clone(),
            },
            UndoAction::LineDelete { row, text } => UndoAction::LineInsert {
                row: *row,
                text: text.clone(),
            },
        }
    }

    /// Perform the action as a forward edit.
    pub fn apply(&self, doc: &mut Document) {
        match self {
            UndoAction::CharInsert { row, col, ch } => doc.insert_char(*row, *col, *ch),
            UndoAction::CharDelete { row, col, .. } => doc.delete_char(*row, *col),
            UndoAction::LineInsert { row, text } => doc.insert_line(*row, text.clone()),
            UndoAction::LineDelete { row, .. } => doc.delete_line(*row),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            UndoAction::CharInsert { .. } => "char_insert",
            UndoAction::CharDelete { .. } => "char_delete",
            UndoAction::LineInsert { .. } => "line_insert",
            UndoAction::LineDelete { .. } => "line_delete",
        }
    }
}

/// One recorded action. `cursor` is where the cursor goes once the whole
/// group containing this entry has been replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub action: UndoAction,
    pub group: u64,
    pub cursor: Cursor,
}

/// Ordered actions plus a `current` index. Entries at or past `current`
/// have been popped and are discarded by the next push.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    actions: Vec<UndoEntry>,
    current: usize,
}

impl UndoStack {
    pub fn push(&mut self, entry: UndoEntry) {
        self.actions.truncate(self.current);
        self.actions.push(entry);
        self.current = self.actions.len();
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.actions[self.current].clone())
    }

    /// Group id of the entry `pop` would return.
    pub fn peek_group(&self) -> Option<u64> {
        self.current
            .checked_sub(1)
            .map(|i| self.actions[i].group)
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.current = 0;
    }

    /// Number of live (poppable) entries.
    pub fn len(&self) -> usize {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[derive(Debug, Default)]
pub struct UndoEngine {
    undo_stack: UndoStack,
    redo_stack: UndoStack,
    next_group: u64,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id for the actions of one logical edit.
    pub fn new_group(&mut self) -> u64 {
        self.next_group += 1;
        self.next_group
    }

    /// Record an already-applied action; any redo history is discarded.
    pub fn record(&mut self, group: u64, cursor_before: Cursor, action: UndoAction) {
        trace!(target: "state.undo", group, kind = action.tag(), undo_depth = self.undo_stack.len() + 1, "record");
        self.undo_stack.push(UndoEntry {
            action,
            group,
            cursor: cursor_before,
        });
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    pub fn undo(&mut self, doc: &mut Document, cursor: &mut Cursor) -> bool {
        let applied = replay(&mut self.undo_stack, &mut self.redo_stack, doc, cursor);
        trace!(target: "state.undo", applied, undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo");
        applied
    }

    pub fn redo(&mut self, doc: &mut Document, cursor: &mut Cursor) -> bool {
        let applied = replay(&mut self.redo_stack, &mut self.undo_stack, doc, cursor);
        trace!(target: "state.undo", applied, undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo");
        applied
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

/// Pop the top group of `from`, apply each inverse, and push the inverses
/// onto `to` so the opposite operation can replay them.
fn replay(from: &mut UndoStack, to: &mut UndoStack, doc: &mut Document, cursor: &mut Cursor) -> bool {
    let Some(group) = from.peek_group() else {
        return false;
    };
    let now = *cursor;
    let mut restore = now;
    while from.peek_group() == Some(group) {
        let Some(entry) = from.pop() else { break };
        let inverse = entry.action.inverse();
        inverse.apply(doc);
        to.push(UndoEntry {
            action: inverse,
            group,
            cursor: now,
        });
        restore = entry.cursor;
    }
    *cursor = restore;
    true
}
