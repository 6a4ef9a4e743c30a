//! Disk-backed file service using capability-scoped directory handles.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::FileService;

/// Reads configuration sources from the local filesystem.
///
/// Each read opens the parent directory via `cap-std` and reads the file
/// relative to that handle, so the path is resolved exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileService;

impl LocalFileService {
    /// Create the service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileService for LocalFileService {
    fn get_contents(&self, path: &Utf8Path) -> std::io::Result<Vec<u8>> {
        let (dir, file_name) = open_parent_dir_and_name(path)?;
        dir.read(file_name)
    }
}

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{path}' does not name a file"),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
    Ok((dir, file_name))
}
