//! Classification of the template reference typed by the user.
//!
//! Priority order:
//!
//! 1. URL ending in `.zip` → archive used verbatim
//! 2. URL ending in `/releases` → releases listing endpoint
//! 3. URL on the GitHub host → `owner/repo`, releases endpoint synthesized
//! 4. `owner/repo` shorthand → rewritten to a GitHub URL, then rule 3
//! 5. anything else → template name, optionally pinned with `@<version>`
//!
//! A non-URL ending in `.zip` is a local archive path.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::domain::error::DomainError;

/// Host whose repository URLs can be turned into releases endpoints.
pub const GITHUB_HOST: &str = "github.com";

/// Releases API endpoint of a repository on a GitHub host.
pub fn github_releases_url(host: &str, owner: &str, repo: &str) -> String {
    format!("https://api.{host}/repos/{owner}/{repo}/releases")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateReference {
    /// Direct link to a zip archive.
    ZipUrl(String),
    /// Zip archive already on disk.
    LocalZip(PathBuf),
    /// Releases listing endpoint, e.g. `https://api.github.com/repos/o/r/releases`.
    ReleasesUrl(String),
    /// Repository on a GitHub host.
    GitHubRepo {
        host: String,
        owner: String,
        repo: String,
    },
    /// Template looked up by name across the configured sources.
    Named {
        name: String,
        version: Option<String>,
    },
}

impl TemplateReference {
    /// Classify a raw reference string.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidReference`] when the string is empty, starts with a
    /// digit, or is a URL that none of the rules accept.
    pub fn parse(reference: &str) -> Result<Self, DomainError> {
        let reference = reference.trim();
        let invalid = |reason: &str| DomainError::InvalidReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        if reference.is_empty() {
            return Err(invalid("reference is empty"));
        }
        if reference.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(invalid("Please specify a template name"));
        }

        let is_zip = reference.to_ascii_lowercase().ends_with(".zip");

        if !reference.contains("://") {
            if is_zip {
                return Ok(Self::LocalZip(PathBuf::from(reference)));
            }
            if reference.split('/').count() == 2 {
                return Self::parse_github_url(&format!("https://{GITHUB_HOST}/{reference}"))
                    .ok_or_else(|| invalid("expected <owner>/<repo>"));
            }
            if reference.contains('/') {
                return Err(invalid("template names cannot contain '/'"));
            }
            return Self::parse_named(reference).ok_or_else(|| invalid("expected <name>@<version>"));
        }

        if is_zip {
            return Ok(Self::ZipUrl(reference.to_string()));
        }
        if reference.ends_with("/releases") {
            return Ok(Self::ReleasesUrl(reference.to_string()));
        }

        Self::parse_github_url(reference).ok_or_else(|| {
            invalid("only .zip URLs, GitHub repo URLs or release HTTP API URLs are supported")
        })
    }

    /// Releases listing endpoint for the URL-shaped variants.
    pub fn releases_url(&self) -> Option<String> {
        match self {
            Self::ReleasesUrl(url) => Some(url.clone()),
            Self::GitHubRepo { host, owner, repo } => Some(github_releases_url(host, owner, repo)),
            _ => None,
        }
    }

    /// Name recorded by the usage ping.
    pub fn usage_name(&self) -> String {
        match self {
            Self::Named { name, .. } => name.clone(),
            other => other.to_string(),
        }
    }

    fn parse_named(reference: &str) -> Option<Self> {
        match reference.rsplit_once('@') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => Some(Self::Named {
                name: name.to_string(),
                version: Some(version.to_string()),
            }),
            Some(_) => None,
            None => Some(Self::Named {
                name: reference.to_string(),
                version: None,
            }),
        }
    }

    fn parse_github_url(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        let host = url.host_str()?.to_ascii_lowercase();
        if host != GITHUB_HOST && host != format!("www.{GITHUB_HOST}") {
            return None;
        }

        let mut segments: Vec<&str> = url.path_segments()?.collect();
        if segments.last() == Some(&"") {
            segments.pop();
        }
        let [owner, repo] = segments.as_slice() else {
            return None;
        };
        let repo = repo.strip_suffix(".git").unwrap_or(*repo);
        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self::GitHubRepo {
            host: GITHUB_HOST.to_string(),
            owner: (*owner).to_string(),
            repo: repo.to_string(),
        })
    }
}

impl FromStr for TemplateReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TemplateReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZipUrl(url) | Self::ReleasesUrl(url) => write!(f, "{url}"),
            Self::LocalZip(path) => write!(f, "{}", path.display()),
            Self::GitHubRepo { host, owner, repo } => write!(f, "https://{host}/{owner}/{repo}"),
            Self::Named {
                name,
                version: Some(v),
            } => write!(f, "{name}@{v}"),
            Self::Named {
                name,
                version: None,
            } => write!(f, "{name}"),
        }
    }
}
