//! Whole-file load and save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::Document;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no file name")]
    NoFileName,
}

/// Byte-level file access used by load and save.
pub trait FileStore {
    /// `Ok(None)` when the file does not exist.
    fn read_whole_file(&self, path: &Path) -> io::Result<Option<Vec<u8>>>;
    fn write_whole_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn read_whole_file(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_whole_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

impl Document {
    /// Load `path` from disk. A missing file yields an empty document that
    /// remembers the name, so a later save creates it.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        Self::load_with(&DiskStore, path)
    }

    pub fn load_with(store: &dyn FileStore, path: &Path) -> Result<Self, DocumentError> {
        let bytes = store
            .read_whole_file(path)
            .map_err(|source| DocumentError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let existed = bytes.is_some();
        let mut doc = match bytes {
            Some(bytes) => Document::from_bytes(&bytes),
            None => Document::new(),
        };
        doc.set_filename(path.to_path_buf());
        info!(target: "io", path = %path.display(), lines = doc.line_count(), existed, language = doc.language().name(), "document_loaded");
        Ok(doc)
    }

    /// Write to the current file name. Returns the number of lines written.
    pub fn save(&mut self) -> Result<usize, DocumentError> {
        self.save_with(&DiskStore, None)
    }

    /// Save to `path`, adopting it as the file name once the write succeeds.
    pub fn save_as(&mut self, path: PathBuf) -> Result<usize, DocumentError> {
        self.save_with(&DiskStore, Some(path))
    }

    pub fn save_with(
        &mut self,
        store: &dyn FileStore,
        path: Option<PathBuf>,
    ) -> Result<usize, DocumentError> {
        let adopt = path.is_some();
        let Some(path) = path.or_else(|| self.filename().map(Path::to_path_buf)) else {
            return Err(DocumentError::NoFileName);
        };
        let bytes = self.to_bytes();
        store
            .write_whole_file(&path, &bytes)
            .map_err(|source| DocumentError::Write {
                path: path.clone(),
                source,
            })?;
        if adopt {
            self.set_filename(path.clone());
        }
        self.set_modified(false);
        debug!(target: "io", path = %path.display(), bytes = bytes.len(), lines = self.line_count(), "document_saved");
        Ok(self.line_count())
    }
}
