//! Pure rules of the scaffolding pipeline: no I/O and no async.
//!
//! Given the same inputs these functions always produce the same cache file
//! name, reference classification, release choice and renamed text.

pub mod entities;
pub mod error;
pub mod reference;
pub mod sanitize;
pub mod value_objects;

mod validation;

pub use entities::{
    ArchiveSource, PostInstallRule, ReleaseDescriptor, RepositoryDescriptor, ResolvedTemplate,
    TemplateSource, master_archive_url, select_release,
};

pub use error::{DomainError, ErrorCategory};

pub use reference::{GITHUB_HOST, TemplateReference, github_releases_url};
pub use sanitize::{FilenameSanitizer, sanitize_url};
pub use validation::{DomainValidator, ILLEGAL_NAMES};
pub use value_objects::{
    IGNORE_EXTENSIONS, Substitution, TEMPLATE_PLACEHOLDER, TEMPLATE_PLACEHOLDER_KEBAB,
    camel_to_kebab, is_binary_asset,
};
