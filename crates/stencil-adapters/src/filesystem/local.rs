//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

use stencil_core::{
    application::{ApplicationError, DirEntry, EntryKind, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory"))?;
            let Ok(name) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            // `DirEntry::file_type` does not follow symlinks
            let kind = match entry.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Directory,
                Ok(t) if t.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            };
            entries.push(DirEntry { name, kind });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
