//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "list templates".

pub mod cache;
pub mod locator;
pub mod materializer;
pub mod post_install;
mod remote;
pub mod renamer;
pub mod retry;
pub mod scaffold_service;
pub mod template_service;

pub use cache::DownloadCache;
pub use locator::TemplateLocator;
pub use materializer::{ArchiveMaterializer, Materialized, root_directory_entries};
pub use post_install::PostInstaller;
pub use renamer::{RenameReport, TemplateRenamer};
pub use retry::{ManagedRetry, RETRY_INTERVAL, RETRY_TIMEOUT};
pub use scaffold_service::{ScaffoldOutcome, ScaffoldRequest, ScaffoldService};
pub use template_service::{SourceListing, TemplateService};
