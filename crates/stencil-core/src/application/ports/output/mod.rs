//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;

use async_trait::async_trait;

use crate::application::ApplicationError;
use crate::error::StencilResult;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any status of 400 or above is a terminal failure.
    pub fn error_for_status(self, url: &str) -> StencilResult<Self> {
        if self.status >= 400 {
            return Err(ApplicationError::RequestFailed {
                url: url.to_string(),
                status: self.status,
            }
            .into());
        }
        Ok(self)
    }
}

/// Port for HTTP access.
///
/// Implemented by:
/// - `stencil_adapters::http::ReqwestClient` (production)
///
/// Implementations attach the User-Agent and optional bearer token. Transport
/// failures map to `ApplicationError::Transport`; error statuses are returned
/// as responses and judged by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> StencilResult<HttpResponse>;
}

/// Kind of a directory entry, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the children of a directory.
    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>>;

    /// Rename a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;
}

/// Port for zip extraction.
///
/// Implemented by:
/// - `stencil_adapters::archive::ZipArchiveReader`
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveReader: Send + Sync {
    /// Extract every entry of `archive` under `dest`.
    ///
    /// Returns the raw entry names in archive order (`/`-separated, directory
    /// entries ending in `/`).
    fn extract(&self, archive: &Path, dest: &Path) -> StencilResult<Vec<String>>;
}

/// Port for the anonymous usage ping.
///
/// Must return immediately and never surface a failure to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait UsageReporter: Send + Sync {
    fn record(&self, name: &str);
}

/// Port for post-install commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the platform shell in `cwd`.
    fn run(&self, command: &str, cwd: &Path) -> StencilResult<()>;
}
