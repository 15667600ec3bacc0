//! Archive extraction and project-root normalisation.
//!
//! An archive with exactly one top-level folder has that folder renamed to the
//! project name. Anything else is assumed to be flat and the destination
//! itself becomes the project root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ArchiveReader, Filesystem},
        services::{
            renamer::{RenameReport, TemplateRenamer},
            retry::ManagedRetry,
        },
    },
    domain::Substitution,
    error::StencilResult,
};

/// Result of materializing an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Directory the renamer ran on.
    pub root: PathBuf,
    pub report: RenameReport,
}

/// Entries exactly one directory deep, e.g. `web-1.0/` but not `web-1.0/src/`
/// or `README.md`.
pub fn root_directory_entries(entries: &[String]) -> Vec<&str> {
    entries
        .iter()
        .map(String::as_str)
        .filter(|entry| {
            entry
                .strip_suffix('/')
                .is_some_and(|name| !name.is_empty() && !name.contains('/'))
        })
        .collect()
}

pub struct ArchiveMaterializer {
    archives: Arc<dyn ArchiveReader>,
    filesystem: Arc<dyn Filesystem>,
    renamer: TemplateRenamer,
    retry: ManagedRetry,
}

impl ArchiveMaterializer {
    pub fn new(
        archives: Arc<dyn ArchiveReader>,
        filesystem: Arc<dyn Filesystem>,
        retry: ManagedRetry,
    ) -> Self {
        Self {
            renamer: TemplateRenamer::new(Arc::clone(&filesystem), retry),
            archives,
            filesystem,
            retry,
        }
    }

    /// Extract `archive` into `dest`, normalise the root and run the renamer.
    #[instrument(skip_all, fields(archive = %archive.display(), dest = %dest.display()))]
    pub async fn materialize(
        &self,
        archive: &Path,
        substitution: &Substitution,
        dest: &Path,
    ) -> StencilResult<Materialized> {
        if !self.filesystem.exists(archive) {
            return Err(ApplicationError::FilesystemError {
                path: archive.to_path_buf(),
                reason: "archive does not exist".into(),
            }
            .into());
        }

        let entries = self.archives.extract(archive, dest)?;
        debug!(entries = entries.len(), "Extracted archive");

        let root = match root_directory_entries(&entries).as_slice() {
            [single] => self.adopt_root(dest, single, substitution).await?,
            roots => {
                debug!(roots = roots.len(), "No single root folder, using destination");
                dest.to_path_buf()
            }
        };

        let report = self.renamer.rename(&root, substitution).await?;
        info!(root = %root.display(), renamed = report.renamed, rewritten = report.rewritten, "Project ready");
        Ok(Materialized { root, report })
    }

    /// Rename the archive's single top-level folder to the project name.
    async fn adopt_root(
        &self,
        dest: &Path,
        entry: &str,
        substitution: &Substitution,
    ) -> StencilResult<PathBuf> {
        let extracted = dest.join(entry.trim_end_matches('/'));
        if !self.filesystem.is_dir(&extracted) {
            debug!(path = %extracted.display(), "Root entry is not a directory, using destination");
            return Ok(dest.to_path_buf());
        }

        let target = dest.join(substitution.project_name());
        if extracted != target {
            self.retry
                .run(|| self.filesystem.rename(&extracted, &target))
                .await?;
            debug!(from = %extracted.display(), to = %target.display(), "Renamed root folder");
        }
        Ok(target)
    }
}
