//! Editor state: document, cursor, mode, selection, undo history and view metadata.
//!
//! All document mutations go through the `edit` methods on `EditorState`,
//! which express each change as `UndoAction`s so the undo engine can
//! replay it exactly. Rendering reads this state but never mutates text.

mod edit;
pub mod selection;
pub mod undo;

pub use selection::SelectionModel;
pub use undo::{UndoAction, UndoEngine, UndoEntry, UndoStack};

use std::time::{Duration, Instant};

use core_config::Options;
use core_search::SearchState;
use core_syntax::SyntaxRegistry;
use core_text::{Cursor, Document};
use tracing::debug;

/// Columns used by the line-number gutter when it is shown.
pub const GUTTER_WIDTH: usize = 6;
/// Rows below the text area: status bar and message bar.
pub const CHROME_ROWS: usize = 2;
/// How long a status message stays visible.
pub const STATUS_TTL: Duration = Duration::from_secs(5);

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and single-key commands.
    #[default]
    Normal,
    /// Typed bytes go into the document.
    Insert,
    /// Typing a `:` command.
    Command,
    /// Typing a search query.
    Search,
    /// Typing the replacement for the active query.
    Replace,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Search => "SEARCH",
            Mode::Replace => "REPLACE",
        }
    }
}

/// What Enter does in Replace mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceScope {
    #[default]
    Current,
    All,
}

/// Prompt buffer shared by Command, Search and Replace modes.
#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    /// Start a new prompt, optionally prefilled.
    pub fn begin(&mut self, prefill: &str) {
        self.buf.clear();
        self.buf.push_str(prefill);
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Remove the last character; false when the buffer was already empty.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop().is_some()
    }
    /// Take the buffer contents, leaving it empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

/// Status message with an expiry.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// Top-level editor state container.
pub struct EditorState {
    pub document: Document,
    pub cursor: Cursor,
    pub selection: SelectionModel,
    pub mode: Mode,
    pub command_line: CommandLineState,
    pub search: SearchState,
    pub replace_scope: ReplaceScope,
    pub options: Options,
    /// Internal clipboard register.
    pub clipboard: Vec<u8>,
    pub ephemeral_status: Option<EphemeralMessage>,
    /// First document row shown in the text area.
    pub row_offset: usize,
    /// First render column shown in the text area.
    pub col_offset: usize,
    /// Text-area rows (terminal rows minus the two chrome rows).
    pub screen_rows: usize,
    pub screen_cols: usize,
    /// Set after a refused quit on a modified document; the next quit succeeds.
    pub quit_armed: bool,
    undo: UndoEngine,
    syntax: SyntaxRegistry,
}

impl EditorState {
    pub fn new(document: Document, options: Options) -> Self {
        Self {
            document,
            cursor: Cursor::origin(),
            selection: SelectionModel::default(),
            mode: Mode::Normal,
            command_line: CommandLineState::default(),
            search: SearchState::new(false),
            replace_scope: ReplaceScope::Current,
            options,
            clipboard: Vec::new(),
            ephemeral_status: None,
            row_offset: 0,
            col_offset: 0,
            screen_rows: 24 - CHROME_ROWS,
            screen_cols: 80,
            quit_armed: false,
            undo: UndoEngine::new(),
            syntax: SyntaxRegistry::new(),
        }
    }

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: Instant::now() + ttl,
        });
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.set_ephemeral(msg, STATUS_TTL);
    }

    pub fn status_text(&self) -> Option<&str> {
        self.ephemeral_status.as_ref().map(|m| m.text.as_str())
    }

    /// Tick ephemeral status; returns true if message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        let expired = self
            .ephemeral_status
            .as_ref()
            .is_some_and(|m| Instant::now() >= m.expires_at);
        if expired {
            self.ephemeral_status = None;
        }
        expired
    }

    /// Adopt a new terminal size (total rows including chrome).
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.screen_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        self.screen_cols = cols.max(1);
        debug!(target: "runtime", rows, cols, text_rows = self.screen_rows, "resize");
        self.scroll_to_cursor();
    }

    pub fn gutter_width(&self) -> usize {
        if self.options.show_line_numbers {
            GUTTER_WIDTH
        } else {
            0
        }
    }

    /// Columns available for text after the gutter.
    pub fn text_cols(&self) -> usize {
        self.screen_cols.saturating_sub(self.gutter_width()).max(1)
    }

    pub fn tab_width(&self) -> usize {
        self.options.tab_width
    }

    /// Clamp the cursor into the document, refresh its render column and
    /// scroll so it stays visible.
    pub fn sync_cursor(&mut self) {
        self.cursor.clamp_to(&self.document, self.options.tab_width);
        self.scroll_to_cursor();
    }

    pub fn scroll_to_cursor(&mut self) {
        let row = self.cursor.row;
        if row < self.row_offset {
            self.row_offset = row;
        }
        if row >= self.row_offset + self.screen_rows {
            self.row_offset = row + 1 - self.screen_rows;
        }
        let rc = self.cursor.render_col;
        let cols = self.text_cols();
        if rc < self.col_offset {
            self.col_offset = rc;
        }
        if rc >= self.col_offset + cols {
            self.col_offset = rc + 1 - cols;
        }
    }

    /// Put `row` in the middle of the text area.
    pub fn center_on(&mut self, row: usize) {
        self.row_offset = row.saturating_sub(self.screen_rows / 2);
    }

    /// Move to a search hit; a hit outside the window is centred.
    pub fn jump_to(&mut self, row: usize, col: usize) {
        self.cursor.row = row;
        self.cursor.col = col;
        if row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + self.screen_rows {
            self.center_on(row);
        }
        self.sync_cursor();
    }

    /// Swap in a freshly loaded document, resetting view and history.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.cursor = Cursor::origin();
        self.selection.clear();
        self.row_offset = 0;
        self.col_offset = 0;
        self.undo.clear();
        self.quit_armed = false;
        if self.search.has_query() {
            self.search.recount(&self.document);
        }
        self.sync_cursor();
    }

    /// Recompute highlights for visible rows whose lines are dirty.
    pub fn refresh_visible_highlights(&mut self) -> usize {
        if !self.options.syntax_enabled {
            return 0;
        }
        let profile = self.syntax.profile(self.document.language());
        let end = (self.row_offset + self.screen_rows).min(self.document.line_count());
        let mut refreshed = 0;
        for row in self.row_offset..end {
            if self.document.refresh_highlight(row, profile) {
                refreshed += 1;
            }
        }
        refreshed
    }

    pub fn undo(&mut self) -> bool {
        let applied = self.undo.undo(&mut self.document, &mut self.cursor);
        if applied {
            self.after_edit();
        }
        applied
    }

    pub fn redo(&mut self) -> bool {
        let applied = self.undo.redo(&mut self.document, &mut self.cursor);
        if applied {
            self.after_edit();
        }
        applied
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    /// Bookkeeping after any document mutation.
    fn after_edit(&mut self) {
        if self.search.has_query() {
            self.search.recount(&self.document);
        }
        self.sync_cursor();
    }
}
