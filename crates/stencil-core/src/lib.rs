//! Core of the Stencil scaffolding tool.
//!
//! A project is created in five stages, each a service in [`application`]:
//!
//! ```text
//! TemplateReference ──locate──▶ ResolvedTemplate ──cache──▶ archive.zip
//!        ──materialize──▶ extracted root ──rename──▶ project ──post-install
//! ```
//!
//! Everything that touches the network, the disk or child processes goes
//! through the port traits in [`application::ports`]; `stencil-adapters`
//! provides the real implementations. [`domain`] holds the pure rules:
//! reference parsing, release selection, project name validation and
//! placeholder substitution.
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let service = ScaffoldService::new(&ports, sources, "/home/me/.stencil/cache");
//! let reference = TemplateReference::parse("NetCoreTemplates/web")?;
//! let request = ScaffoldRequest::new(reference, ".").project_name("Acme");
//! let outcome = service.scaffold(&request).await?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        ScaffoldOutcome, ScaffoldRequest, ScaffoldService, SourceListing, TemplateService,
        ports::{ArchiveReader, CommandRunner, Filesystem, HttpClient, Ports, UsageReporter},
    };
    pub use crate::domain::{
        ArchiveSource, PostInstallRule, RepositoryDescriptor, ResolvedTemplate, Substitution,
        TemplateReference, TemplateSource,
    };
    pub use crate::error::{StencilError, StencilResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
