//! Zip extraction adapter.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use stencil_core::{
    application::{ApplicationError, ports::ArchiveReader},
    error::{StencilError, StencilResult},
};

/// Extracts zip archives with the `zip` crate.
///
/// Entries whose names would land outside the destination (absolute paths,
/// `..` components) are skipped and left out of the returned names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveReader;

impl ZipArchiveReader {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn extract(&self, archive: &Path, dest: &Path) -> StencilResult<Vec<String>> {
        let file = File::open(archive).map_err(|e| archive_error(archive, e))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| archive_error(archive, e))?;

        let mut names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| archive_error(archive, e))?;
            let name = entry.name().to_string();

            let Some(relative) = entry.enclosed_name() else {
                warn!(entry = %name, "Skipping entry outside the destination");
                continue;
            };
            let out = dest.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out).map_err(|e| io_error(&out, e))?;
            } else {
                if let Some(parent) = out.parent() {
                    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
                }
                let mut target = File::create(&out).map_err(|e| io_error(&out, e))?;
                io::copy(&mut entry, &mut target).map_err(|e| io_error(&out, e))?;

                #[cfg(unix)]
                if let Some(mode) = entry.unix_mode() {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(&out, fs::Permissions::from_mode(mode & 0o777))
                        .map_err(|e| io_error(&out, e))?;
                }
            }

            names.push(name);
        }

        debug!(archive = %archive.display(), entries = names.len(), "Extracted");
        Ok(names)
    }
}

fn archive_error(path: &Path, e: impl std::fmt::Display) -> StencilError {
    ApplicationError::ArchiveError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

fn io_error(path: &Path, e: io::Error) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to extract: {e}"),
    }
    .into()
}
