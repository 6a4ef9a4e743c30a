//! In-memory file service for embedded documents and tests.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

use super::FileService;

/// Serves configuration sources from a fixed set of in-memory documents.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileService {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl MemoryFileService {
    /// Create an empty service.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Add a document, replacing any previous contents at `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add a document in place.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileService for MemoryFileService {
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no embedded document at '{path}'"),
            )
        })
    }
}
