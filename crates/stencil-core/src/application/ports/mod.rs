//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `HttpClient`: JSON listings and archive downloads
//!   - `Filesystem`: File operations
//!   - `ArchiveReader`: Zip extraction
//!   - `UsageReporter`: Anonymous usage ping
//!   - `CommandRunner`: Post-install shell commands
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

use std::sync::Arc;

pub use output::{
    ArchiveReader, CommandRunner, DirEntry, EntryKind, Filesystem, HttpClient, HttpResponse,
    UsageReporter,
};

/// The full set of driven adapters a pipeline needs.
///
/// Cheap to clone; every service shares the same adapter instances.
#[derive(Clone)]
pub struct Ports {
    pub http: Arc<dyn HttpClient>,
    pub filesystem: Arc<dyn Filesystem>,
    pub archives: Arc<dyn ArchiveReader>,
    pub usage: Arc<dyn UsageReporter>,
    pub commands: Arc<dyn CommandRunner>,
}
