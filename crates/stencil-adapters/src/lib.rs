//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

use std::sync::Arc;

use stencil_core::application::ports::{Ports, UsageReporter};

pub mod archive;
pub mod filesystem;
pub mod http;
pub mod process;
pub mod telemetry;

// Re-export commonly used adapters
pub use archive::ZipArchiveReader;
pub use filesystem::LocalFilesystem;
pub use http::{DEFAULT_TOKEN_ENV, DEFAULT_USER_AGENT, ReqwestClient};
pub use process::ShellCommandRunner;
pub use telemetry::{HttpUsageReporter, NoopUsageReporter, TELEMETRY_OPTOUT_ENV, usage_reporter};

/// Wire the production adapters around an HTTP client and usage reporter.
pub fn local_ports(http: ReqwestClient, usage: Arc<dyn UsageReporter>) -> Ports {
    Ports {
        http: Arc::new(http),
        filesystem: Arc::new(LocalFilesystem::new()),
        archives: Arc::new(ZipArchiveReader::new()),
        usage,
        commands: Arc::new(ShellCommandRunner::new()),
    }
}
