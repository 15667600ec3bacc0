//! Pipeline stages and the ports they drive.
//!
//! [`ScaffoldService`] composes locator, cache, materializer, renamer and
//! post-install; [`TemplateService`] backs `stencil list`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DownloadCache, ManagedRetry, RenameReport, ScaffoldOutcome, ScaffoldRequest, ScaffoldService,
    SourceListing, TemplateLocator, TemplateService,
};

pub use ports::{
    ArchiveReader, CommandRunner, DirEntry, EntryKind, Filesystem, HttpClient, HttpResponse, Ports,
    UsageReporter,
};

pub use error::ApplicationError;
