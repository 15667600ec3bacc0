//! Listing endpoint payloads and the release selection policy.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::reference::GITHUB_HOST;

/// One entry of a source's repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// May be a URI template, e.g. `.../releases{/id}`.
    pub releases_url: String,
}

impl RepositoryDescriptor {
    /// Releases endpoint with any URI-template suffix removed.
    pub fn releases_endpoint(&self) -> &str {
        match self.releases_url.rfind('{') {
            Some(i) => &self.releases_url[..i],
            None => &self.releases_url,
        }
    }
}

/// One entry of a repository's releases listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "zipball_url", default)]
    pub archive_url: Option<String>,
    #[serde(rename = "prerelease", default)]
    pub is_prerelease: bool,
}

/// Pick the release to install.
///
/// Releases are scanned in the order the source returned them and prereleases
/// are skipped. With a `wanted` version the first release whose name equals it
/// wins; without one the first stable release wins. "Latest" is therefore
/// whatever the source lists first, not the highest version number.
pub fn select_release<'a>(
    releases: &'a [ReleaseDescriptor],
    wanted: Option<&str>,
) -> Option<&'a ReleaseDescriptor> {
    releases
        .iter()
        .filter(|r| !r.is_prerelease)
        .find(|r| wanted.is_none_or(|v| r.name.as_deref() == Some(v)))
}

/// Default-branch archive for a GitHub releases API endpoint.
///
/// `https://api.github.com/repos/o/r/releases` → `https://github.com/o/r/archive/master.zip`.
/// Any other endpoint has no fallback.
pub fn master_archive_url(releases_url: &str) -> Option<String> {
    let url = Url::parse(releases_url).ok()?;
    let host = url.host_str()?;
    if host != format!("api.{GITHUB_HOST}") {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        ["repos", owner, repo, "releases"] if !owner.is_empty() && !repo.is_empty() => Some(
            format!("https://{GITHUB_HOST}/{owner}/{repo}/archive/master.zip"),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, pre: bool) -> ReleaseDescriptor {
        ReleaseDescriptor {
            name: Some(name.into()),
            archive_url: Some(format!("https://example.com/{name}.zip")),
            is_prerelease: pre,
        }
    }

    #[test]
    fn latest_is_first_stable_in_list_order() {
        let releases = vec![release("v2", false), release("v1", false)];
        let selected = select_release(&releases, None).unwrap();
        assert_eq!(selected.name.as_deref(), Some("v2"));
    }

    #[test]
    fn list_order_wins_over_version_order() {
        let releases = vec![release("v1", false), release("v2", false)];
        let selected = select_release(&releases, None).unwrap();
        assert_eq!(selected.name.as_deref(), Some("v1"));
    }

    #[test]
    fn wanted_version_matches_exactly() {
        let releases = vec![release("v2", false), release("v1", false)];
        let selected = select_release(&releases, Some("v1")).unwrap();
        assert_eq!(selected.archive_url.as_deref(), Some("https://example.com/v1.zip"));
        assert!(select_release(&releases, Some("V1")).is_none());
    }

    #[test]
    fn prereleases_are_skipped() {
        let releases = vec![release("v3-beta", true), release("v2", false)];
        assert_eq!(
            select_release(&releases, None).unwrap().name.as_deref(),
            Some("v2")
        );
        assert!(select_release(&releases, Some("v3-beta")).is_none());
    }

    #[test]
    fn only_prereleases_is_not_found() {
        let releases = vec![release("v2-rc", true), release("v1-rc", true)];
        assert!(select_release(&releases, None).is_none());
        assert!(select_release(&[], None).is_none());
    }

    #[test]
    fn master_fallback_for_github_api() {
        assert_eq!(
            master_archive_url("https://api.github.com/repos/NetCoreTemplates/web/releases")
                .as_deref(),
            Some("https://github.com/NetCoreTemplates/web/archive/master.zip")
        );
    }

    #[test]
    fn no_fallback_for_other_endpoints() {
        assert!(master_archive_url("https://example.com/repos/o/r/releases").is_none());
        assert!(master_archive_url("https://api.github.com/orgs/o/releases").is_none());
        assert!(master_archive_url("not a url").is_none());
    }

    #[test]
    fn releases_endpoint_strips_uri_template() {
        let repo = RepositoryDescriptor {
            name: "web".into(),
            description: None,
            releases_url: "https://api.github.com/repos/o/web/releases{/id}".into(),
        };
        assert_eq!(
            repo.releases_endpoint(),
            "https://api.github.com/repos/o/web/releases"
        );
    }

    #[test]
    fn release_payload_deserializes() {
        let json = r#"[{"name":"v1","zipball_url":"https://x/z","prerelease":false,"id":7},
                       {"name":null,"prerelease":true}]"#;
        let releases: Vec<ReleaseDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(releases[0].archive_url.as_deref(), Some("https://x/z"));
        assert!(releases[1].is_prerelease);
        assert_eq!(releases[1].name, None);
    }
}
