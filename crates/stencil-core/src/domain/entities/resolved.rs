use std::fmt;
use std::path::PathBuf;

use crate::domain::reference::TemplateReference;

/// Where the archive bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource {
    /// Downloaded through the cache.
    Remote(String),
    /// Read in place, never cached.
    Local(PathBuf),
}

impl fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Outcome of locating a template: the archive plus the reference it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub archive: ArchiveSource,
    pub reference: TemplateReference,
}
