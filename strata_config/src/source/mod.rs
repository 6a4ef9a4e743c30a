//! Reading raw configuration sources.
//!
//! The pipeline only needs the capability "given a path, return bytes or
//! fail", expressed by [`FileService`]. [`LocalFileService`] reads from disk
//! through `cap-std`; [`MemoryFileService`] serves embedded documents and
//! test fixtures.

mod local;
mod memory;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{StrataError, StrataResult};

pub use local::LocalFileService;
pub use memory::MemoryFileService;

/// Capability for fetching the raw contents of a configuration source.
pub trait FileService {
    /// Read the full contents stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] when the source is missing or unreadable.
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>>;
}

impl<F: FileService + ?Sized> FileService for &F {
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>> {
        (**self).get_contents(path)
    }
}

impl<F: FileService + ?Sized> FileService for Box<F> {
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>> {
        (**self).get_contents(path)
    }
}

impl<F: FileService + ?Sized> FileService for std::sync::Arc<F> {
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>> {
        (**self).get_contents(path)
    }
}

/// A named configuration document and its raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    path: Utf8PathBuf,
    bytes: Vec<u8>,
}

impl Source {
    /// Wrap bytes that were obtained elsewhere.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    /// Read `name` relative to `directory` through `service`.
    ///
    /// An empty `directory` reads `name` as given.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Io`] when the service cannot supply the bytes.
    pub fn read<F>(service: &F, directory: &Utf8Path, name: &str) -> StrataResult<Self>
    where
        F: FileService + ?Sized,
    {
        let path = source_path(directory, name);
        let bytes = service
            .get_contents(&path)
            .map_err(|err| StrataError::io(&path, err))?;
        tracing::debug!(source = %path, bytes = bytes.len(), "read configuration source");
        Ok(Self { path, bytes })
    }

    /// Path the source was read from; doubles as its name.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Raw contents of the source.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Split the source into its path and contents.
    #[must_use]
    pub fn into_parts(self) -> (Utf8PathBuf, Vec<u8>) {
        (self.path, self.bytes)
    }
}

fn source_path(directory: &Utf8Path, name: &str) -> Utf8PathBuf {
    if directory.as_str().is_empty() {
        Utf8PathBuf::from(name)
    } else {
        directory.join(name)
    }
}
