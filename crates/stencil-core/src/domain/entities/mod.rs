pub mod release;
pub mod resolved;
pub mod source;

pub use release::{ReleaseDescriptor, RepositoryDescriptor, master_archive_url, select_release};
pub use resolved::{ArchiveSource, ResolvedTemplate};
pub use source::{PostInstallRule, TemplateSource};
