//! Download cache for template archives.
//!
//! One file per distinct archive URL under the cache root, named by the
//! filename sanitizer. Entries never expire; only [`DownloadCache::clean`]
//! removes them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, HttpClient},
    domain::FilenameSanitizer,
    error::StencilResult,
};

/// Suffix of the file a download is streamed into before it is moved into place.
const PARTIAL_SUFFIX: &str = ".partial";

pub struct DownloadCache {
    root: PathBuf,
    http: Arc<dyn HttpClient>,
    filesystem: Arc<dyn Filesystem>,
    sanitizer: FilenameSanitizer,
}

impl DownloadCache {
    pub fn new(
        root: impl Into<PathBuf>,
        http: Arc<dyn HttpClient>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            root: root.into(),
            http,
            filesystem,
            sanitizer: FilenameSanitizer::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the archive for `url` lives once fetched.
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.root.join(self.sanitizer.sanitize_url(url))
    }

    /// Return the cached archive for `url`, downloading it on a miss.
    ///
    /// An existing entry is returned without any freshness check. Error
    /// statuses and transport failures are terminal.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> StencilResult<PathBuf> {
        let path = self.cache_path(url);
        if self.filesystem.exists(&path) {
            debug!(path = %path.display(), "Cache hit");
            return Ok(path);
        }

        info!("Downloading {url}");
        let response = self.http.get(url).await?.error_for_status(url)?;

        self.filesystem.create_dir_all(&self.root)?;
        let mut partial = path.clone().into_os_string();
        partial.push(PARTIAL_SUFFIX);
        let partial = PathBuf::from(partial);

        self.filesystem.write_file(&partial, &response.body)?;
        self.filesystem.rename(&partial, &path)?;

        debug!(path = %path.display(), bytes = response.body.len(), "Cached archive");
        Ok(path)
    }

    /// Delete the whole cache tree. Returns `false` when there was nothing to
    /// delete.
    pub fn clean(&self) -> StencilResult<bool> {
        if !self.filesystem.exists(&self.root) {
            return Ok(false);
        }
        self.filesystem.remove_dir_all(&self.root)?;
        info!(path = %self.root.display(), "Cache cleared");
        Ok(true)
    }
}
