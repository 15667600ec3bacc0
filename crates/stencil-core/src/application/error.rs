//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not domain rules.
//! Domain rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while resolving, downloading or materializing a template.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No configured source lists a repository with this name.
    #[error("Could not find template '{reference}'")]
    TemplateNotFound { reference: String },

    /// The configuration has no template sources.
    #[error("No sources defined")]
    NoSources,

    /// The releases listing had nothing usable and there is no fallback archive.
    #[error("Could not find any releases at {releases_url}")]
    NoReleases { releases_url: String },

    /// The selected release has no archive URL.
    #[error("Release {release} does not have an archive URL")]
    ReleaseWithoutArchive { release: String },

    /// The server answered with an error status.
    #[error("Request failed '{url}': {status}")]
    RequestFailed { url: String, status: u16 },

    /// The request never produced a response.
    #[error("Request failed '{url}': {reason}")]
    Transport { url: String, reason: String },

    /// The response body was not the expected JSON.
    #[error("Could not parse JSON response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The archive could not be read or extracted.
    #[error("Could not extract {path}: {reason}")]
    ArchiveError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project folder already exists: {path}")]
    ProjectExists { path: PathBuf },

    /// A post-install command exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { reference } => vec![
                format!("No source lists a template named '{}'", reference),
                "Run 'stencil list' to view the templates available".into(),
                "Or reference a repository directly: stencil new <owner>/<repo>".into(),
            ],
            Self::NoSources => vec![
                "Add at least one entry to \"sources\" in your config file".into(),
                "Run 'stencil init' to write the default configuration".into(),
            ],
            Self::NoReleases { releases_url } => vec![
                format!("The repository at {} has no stable releases", releases_url),
                "Pin a released version with <name>@<version>".into(),
                "Or point directly at a .zip archive".into(),
            ],
            Self::RequestFailed { status, .. } if *status == 401 || *status == 403 => vec![
                "The server refused the request".into(),
                "GitHub rate-limits anonymous requests; set GITHUB_OAUTH_TOKEN".into(),
            ],
            Self::RequestFailed { .. } | Self::Transport { .. } => vec![
                "Check your network connection".into(),
                "Run with -vv to see the requests being made".into(),
            ],
            Self::MalformedResponse { .. } => vec![
                "The endpoint did not return the expected JSON listing".into(),
                "Run with -vv to print the raw response".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "A virus scanner or indexer may be holding the file; try again".into(),
            ],
            Self::ArchiveError { path, .. } => vec![
                format!("The archive at {} appears to be corrupt", path.display()),
                "Run 'stencil clean' to clear the download cache".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. }
            | Self::NoReleases { .. }
            | Self::ReleaseWithoutArchive { .. } => ErrorCategory::NotFound,
            Self::NoSources => ErrorCategory::Configuration,
            Self::RequestFailed { .. } | Self::Transport { .. } | Self::MalformedResponse { .. } => {
                ErrorCategory::Network
            }
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::ArchiveError { .. } | Self::CommandFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
