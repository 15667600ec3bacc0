//! Template locator: turns a classified reference into an archive source.
//!
//! Named templates are looked up across every configured source at once; the
//! first listing that contains the name wins and the other requests are
//! dropped.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{HttpClient, UsageReporter},
        services::remote::fetch_json,
    },
    domain::{
        ArchiveSource, ReleaseDescriptor, RepositoryDescriptor, ResolvedTemplate, TemplateReference,
        TemplateSource, github_releases_url, master_archive_url, select_release,
    },
    error::StencilResult,
};

pub struct TemplateLocator {
    http: Arc<dyn HttpClient>,
    usage: Arc<dyn UsageReporter>,
    sources: Vec<TemplateSource>,
}

impl TemplateLocator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        usage: Arc<dyn UsageReporter>,
        sources: Vec<TemplateSource>,
    ) -> Self {
        Self {
            http,
            usage,
            sources,
        }
    }

    pub fn sources(&self) -> &[TemplateSource] {
        &self.sources
    }

    /// Resolve `reference` to the archive that should be materialized.
    ///
    /// Every call records one usage ping before any lookup happens.
    #[instrument(skip_all, fields(reference = %reference))]
    pub async fn locate(&self, reference: &TemplateReference) -> StencilResult<ResolvedTemplate> {
        self.usage.record(&reference.usage_name());

        let archive = match reference {
            TemplateReference::ZipUrl(url) => ArchiveSource::Remote(url.clone()),
            TemplateReference::LocalZip(path) => ArchiveSource::Local(path.clone()),
            TemplateReference::ReleasesUrl(url) => self.resolve_release(url, None).await?,
            TemplateReference::GitHubRepo { host, owner, repo } => {
                self.resolve_release(&github_releases_url(host, owner, repo), None)
                    .await?
            }
            TemplateReference::Named { name, version } => {
                let repository = self.find_repository(name).await?;
                self.resolve_release(repository.releases_endpoint(), version.as_deref())
                    .await?
            }
        };

        info!(archive = %archive, "Template resolved");
        Ok(ResolvedTemplate {
            archive,
            reference: reference.clone(),
        })
    }

    /// Query every source concurrently for a repository called `name`.
    ///
    /// Resolves on the first listing containing the name. A failed listing
    /// request fails the whole lookup.
    pub async fn find_repository(&self, name: &str) -> StencilResult<RepositoryDescriptor> {
        if self.sources.is_empty() {
            return Err(ApplicationError::NoSources.into());
        }

        let mut pending: FuturesUnordered<_> = self
            .sources
            .iter()
            .map(|source| async move {
                let listing = self.list_source(source).await?;
                StencilResult::Ok(listing.into_iter().find(|repo| repo.name == name))
            })
            .collect();

        while let Some(outcome) = pending.next().await {
            if let Some(repository) = outcome? {
                debug!(repository = %repository.name, "Found repository");
                return Ok(repository);
            }
        }

        Err(ApplicationError::TemplateNotFound {
            reference: name.to_string(),
        }
        .into())
    }

    /// Fetch one source's repository listing.
    #[instrument(skip_all, fields(source = %source.name))]
    pub async fn list_source(
        &self,
        source: &TemplateSource,
    ) -> StencilResult<Vec<RepositoryDescriptor>> {
        fetch_json(self.http.as_ref(), &source.url).await
    }

    /// Pick the archive from a releases listing, falling back to the master
    /// branch archive for GitHub endpoints.
    pub async fn resolve_release(
        &self,
        releases_url: &str,
        version: Option<&str>,
    ) -> StencilResult<ArchiveSource> {
        let releases: Vec<ReleaseDescriptor> =
            fetch_json(self.http.as_ref(), releases_url).await?;

        if let Some(release) = select_release(&releases, version) {
            let name = release.name.clone().unwrap_or_default();
            return match &release.archive_url {
                Some(url) => {
                    debug!(release = %name, "Selected release");
                    Ok(ArchiveSource::Remote(url.clone()))
                }
                None => Err(ApplicationError::ReleaseWithoutArchive { release: name }.into()),
            };
        }

        match master_archive_url(releases_url) {
            Some(url) => {
                debug!(%url, "No matching release, using master branch");
                Ok(ArchiveSource::Remote(url))
            }
            None => Err(ApplicationError::NoReleases {
                releases_url: releases_url.to_string(),
            }
            .into()),
        }
    }
}
