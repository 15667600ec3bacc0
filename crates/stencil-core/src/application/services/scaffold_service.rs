//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the project name
//! 2. Locate the template archive
//! 3. Fetch it through the download cache (local archives are read in place)
//! 4. Extract, normalise the root folder and substitute the placeholder
//! 5. Run matching post-install rules
//!
//! Any failure aborts the pipeline. Whatever the failing stage already wrote
//! stays on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Ports},
        services::{
            cache::DownloadCache,
            locator::TemplateLocator,
            materializer::ArchiveMaterializer,
            post_install::PostInstaller,
            renamer::RenameReport,
            retry::ManagedRetry,
        },
    },
    domain::{
        ArchiveSource, DomainValidator, PostInstallRule, ResolvedTemplate,
        Substitution, TemplateReference, TemplateSource,
    },
    error::StencilResult,
};

/// Input of one `new` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub reference: TemplateReference,
    /// `None` keeps the placeholder name.
    pub project_name: Option<String>,
    /// Directory the archive is extracted into.
    pub working_dir: PathBuf,
    pub run_post_install: bool,
}

impl ScaffoldRequest {
    pub fn new(reference: TemplateReference, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference,
            project_name: None,
            working_dir: working_dir.into(),
            run_post_install: true,
        }
    }

    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn skip_post_install(mut self) -> Self {
        self.run_post_install = false;
        self
    }
}

/// What a successful scaffold produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub resolved: ResolvedTemplate,
    /// Archive that was extracted (cache entry or local file).
    pub archive_path: PathBuf,
    pub project_root: PathBuf,
    pub report: RenameReport,
    /// Post-install commands that were started.
    pub post_install: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    locator: TemplateLocator,
    cache: DownloadCache,
    materializer: ArchiveMaterializer,
    post_installer: PostInstaller,
    post_install_rules: Vec<PostInstallRule>,
}

impl ScaffoldService {
    /// Create a new scaffold service over the given adapters.
    pub fn new(ports: &Ports, sources: Vec<TemplateSource>, cache_root: impl Into<PathBuf>) -> Self {
        Self::with_retry(ports, sources, cache_root, ManagedRetry::default())
    }

    pub fn with_retry(
        ports: &Ports,
        sources: Vec<TemplateSource>,
        cache_root: impl Into<PathBuf>,
        retry: ManagedRetry,
    ) -> Self {
        Self {
            filesystem: Arc::clone(&ports.filesystem),
            locator: TemplateLocator::new(Arc::clone(&ports.http), Arc::clone(&ports.usage), sources),
            cache: DownloadCache::new(cache_root, Arc::clone(&ports.http), Arc::clone(&ports.filesystem)),
            materializer: ArchiveMaterializer::new(
                Arc::clone(&ports.archives),
                Arc::clone(&ports.filesystem),
                retry,
            ),
            post_installer: PostInstaller::new(Arc::clone(&ports.filesystem), Arc::clone(&ports.commands)),
            post_install_rules: Vec::new(),
        }
    }

    /// Rules checked after every successful scaffold.
    pub fn with_post_install(mut self, rules: Vec<PostInstallRule>) -> Self {
        self.post_install_rules = rules;
        self
    }

    pub fn cache(&self) -> &DownloadCache {
        &self.cache
    }

    /// Locate the archive for `reference` without downloading it.
    pub async fn resolve(&self, reference: &TemplateReference) -> StencilResult<ResolvedTemplate> {
        self.locator.locate(reference).await
    }

    /// Run the whole pipeline for `request`.
    #[instrument(
        skip_all,
        fields(
            template = %request.reference,
            project = request.project_name.as_deref().unwrap_or_default()
        )
    )]
    pub async fn scaffold(&self, request: &ScaffoldRequest) -> StencilResult<ScaffoldOutcome> {
        // 1. Validate before any network or disk work
        self.validate(request)?;
        let substitution = Substitution::for_project(request.project_name.as_deref());

        // 2. Locate
        let resolved = self.locator.locate(&request.reference).await?;

        // 3. Fetch
        let archive_path = match &resolved.archive {
            ArchiveSource::Remote(url) => self.cache.fetch(url).await?,
            ArchiveSource::Local(path) => request.working_dir.join(path),
        };

        // 4. Materialize
        let materialized = self
            .materializer
            .materialize(&archive_path, &substitution, &request.working_dir)
            .await?;

        // 5. Post-install
        let post_install = if request.run_post_install {
            self.post_installer
                .run(&self.post_install_rules, &materialized.root, &substitution)
        } else {
            Vec::new()
        };

        info!(root = %materialized.root.display(), "Scaffold completed successfully");
        Ok(ScaffoldOutcome {
            resolved,
            archive_path,
            project_root: materialized.root,
            report: materialized.report,
            post_install,
        })
    }

    fn validate(&self, request: &ScaffoldRequest) -> StencilResult<()> {
        let Some(name) = request.project_name.as_deref() else {
            return Ok(());
        };
        DomainValidator::validate_project_name(Some(name))?;

        let target = request.working_dir.join(name);
        if self.filesystem.exists(&target) {
            return Err(ApplicationError::ProjectExists { path: target }.into());
        }
        Ok(())
    }

    /// Where a project named `name` would be created.
    pub fn project_dir(&self, working_dir: &Path, name: Option<&str>) -> PathBuf {
        working_dir.join(Substitution::for_project(name).project_name())
    }
}
