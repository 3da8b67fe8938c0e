//! File IO helpers used by `:e`, `:w`, `:wq` and Ctrl+S.
//!
//! Failures are logged here and returned as values; the dispatcher turns
//! them into status messages and never aborts.

use std::path::{Path, PathBuf};

use core_state::EditorState;
use core_text::{Document, DocumentError};

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Success(Document),
    Error(DocumentError),
}

/// Load `path`; a missing file opens as an empty named document.
pub fn open_file(path: &Path) -> OpenFileResult {
    match Document::load(path) {
        Ok(doc) => OpenFileResult::Success(doc),
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_open_error");
            OpenFileResult::Error(e)
        }
    }
}

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success { lines: usize },
    NoFilename,
    Error(DocumentError),
}

/// Save the document to `target` (adopting it as the new name) or to its
/// current file name.
pub fn write_file(state: &mut EditorState, target: Option<PathBuf>) -> WriteFileResult {
    if target.is_none() && state.document.filename().is_none() {
        return WriteFileResult::NoFilename;
    }
    let result = match target {
        Some(path) => state.document.save_as(path),
        None => state.document.save(),
    };
    match result {
        Ok(lines) => WriteFileResult::Success { lines },
        Err(DocumentError::NoFileName) => WriteFileResult::NoFilename,
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_write_error");
            WriteFileResult::Error(e)
        }
    }
}
