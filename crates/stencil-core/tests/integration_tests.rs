//! Integration tests for stencil-core.
//!
//! The pipeline runs against in-memory fakes of every port: a canned HTTP
//! table, a tree held in a `BTreeMap`, and an archive reader that replays a
//! fixed entry list into that tree.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stencil_core::{
    application::{
        ApplicationError, DirEntry, EntryKind, HttpResponse,
        ports::{ArchiveReader, CommandRunner, Filesystem, HttpClient, Ports, UsageReporter},
    },
    domain::{PostInstallRule, TemplateReference, TemplateSource},
    error::{StencilError, StencilResult},
    prelude::*,
};

#[derive(Default)]
struct CannedHttp {
    responses: HashMap<String, (u16, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl CannedHttp {
    fn with(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), (status, body.into()));
        self
    }
}

#[async_trait]
impl HttpClient for CannedHttp {
    async fn get(&self, url: &str) -> StencilResult<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some((status, body)) => Ok(HttpResponse::new(*status, body.clone())),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Default)]
struct TreeFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl TreeFs {
    fn add_file(&self, path: &str, content: &[u8]) {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.nodes.lock().unwrap().insert(path, Node::File(content.to_vec()));
    }

    fn contents(&self, path: &str) -> Option<String> {
        match self.nodes.lock().unwrap().get(Path::new(path)) {
            Some(Node::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn missing(path: &Path) -> StencilError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "No such file or directory".into(),
        }
        .into()
    }
}

impl Filesystem for TreeFs {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }

    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        if !self.is_dir(path) {
            return Err(Self::missing(path));
        }
        let nodes = self.nodes.lock().unwrap();
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, node)| DirEntry {
                name: p.file_name().unwrap().to_string_lossy().into_owned(),
                kind: match node {
                    Node::Dir => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                },
            })
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        let mut nodes = self.nodes.lock().unwrap();
        if !nodes.contains_key(from) {
            return Err(Self::missing(from));
        }
        let moved: Vec<PathBuf> = nodes.keys().filter(|p| p.starts_with(from)).cloned().collect();
        for old in moved {
            let node = nodes.remove(&old).unwrap();
            let new = if old == from {
                to.to_path_buf()
            } else {
                to.join(old.strip_prefix(from).unwrap())
            };
            nodes.insert(new, node);
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StencilResult<String> {
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::File(bytes)) => String::from_utf8(bytes.clone()).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
                .into()
            }),
            _ => Err(Self::missing(path)),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::File(content.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut nodes = self.nodes.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> StencilResult<()> {
        self.nodes.lock().unwrap().retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

/// Replays `entries` into the tree under the destination.
struct ReplayArchive {
    fs: Arc<TreeFs>,
    entries: Vec<(&'static str, &'static str)>,
}

impl ArchiveReader for ReplayArchive {
    fn extract(&self, _archive: &Path, dest: &Path) -> StencilResult<Vec<String>> {
        for (name, content) in &self.entries {
            let path = dest.join(name.trim_end_matches('/'));
            if name.ends_with('/') {
                self.fs.create_dir_all(&path)?;
            } else {
                self.fs.add_file(&path.to_string_lossy(), content.as_bytes());
            }
        }
        Ok(self.entries.iter().map(|(n, _)| n.to_string()).collect())
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<String>>);

impl UsageReporter for Recorder {
    fn record(&self, name: &str) {
        self.0.lock().unwrap().push(name.to_string());
    }
}

impl CommandRunner for Recorder {
    fn run(&self, command: &str, cwd: &Path) -> StencilResult<()> {
        self.0
            .lock()
            .unwrap()
            .push(format!("{} @ {}", command, cwd.display()));
        Ok(())
    }
}

const WEB_RELEASES: &str = "https://api.github.com/repos/NetCoreTemplates/web/releases";
const V2_ZIP: &str = "https://api.github.com/repos/NetCoreTemplates/web/zipball/v2";

fn template_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("NetCoreTemplates-web-1a2b3c/", ""),
        ("NetCoreTemplates-web-1a2b3c/MyApp.sln", "Project(\"MyApp\") = \"MyApp\""),
        ("NetCoreTemplates-web-1a2b3c/MyApp/", ""),
        (
            "NetCoreTemplates-web-1a2b3c/MyApp/package.json",
            r#"{"name":"my-app","title":"MyApp"}"#,
        ),
        ("NetCoreTemplates-web-1a2b3c/MyApp/wwwroot/", ""),
        ("NetCoreTemplates-web-1a2b3c/MyApp/wwwroot/MyApp.png", "MyApp"),
    ]
}

struct Harness {
    http: Arc<CannedHttp>,
    fs: Arc<TreeFs>,
    usage: Arc<Recorder>,
    commands: Arc<Recorder>,
    ports: Ports,
}

fn harness(http: CannedHttp) -> Harness {
    let http = Arc::new(http);
    let fs = Arc::new(TreeFs::default());
    fs.create_dir_all(Path::new("/work")).unwrap();
    let usage = Arc::new(Recorder::default());
    let commands = Arc::new(Recorder::default());
    let ports = Ports {
        http: http.clone(),
        filesystem: fs.clone(),
        archives: Arc::new(ReplayArchive {
            fs: fs.clone(),
            entries: template_entries(),
        }),
        usage: usage.clone(),
        commands: commands.clone(),
    };
    Harness {
        http,
        fs,
        usage,
        commands,
        ports,
    }
}

fn sources() -> Vec<TemplateSource> {
    vec![
        TemplateSource::new("Core", "https://api.github.com/orgs/NetCoreTemplates/repos"),
        TemplateSource::new("Framework", "https://api.github.com/orgs/NetFrameworkTemplates/repos"),
    ]
}

fn catalogue() -> CannedHttp {
    CannedHttp::default()
        .with(
            "https://api.github.com/orgs/NetCoreTemplates/repos",
            200,
            format!(r#"[{{"name":"web","description":"Empty","releases_url":"{WEB_RELEASES}{{/id}}"}}]"#),
        )
        .with("https://api.github.com/orgs/NetFrameworkTemplates/repos", 200, "[]")
        .with(
            WEB_RELEASES,
            200,
            format!(
                r#"[{{"name":"v3-rc","prerelease":true,"zipball_url":"x"}},
                    {{"name":"v2","prerelease":false,"zipball_url":"{V2_ZIP}"}}]"#
            ),
        )
        .with(V2_ZIP, 200, "PK\u{3}\u{4}")
}

#[tokio::test]
async fn named_template_end_to_end() {
    let h = harness(catalogue());
    let service = ScaffoldService::new(&h.ports, sources(), "/home/u/.stencil/cache")
        .with_post_install(vec![
            PostInstallRule::new("MyApp/package.json", Some("cd \"MyApp\" && npm install")),
            PostInstallRule::new("MyApp.csproj", Some("dotnet restore")),
        ]);

    let request = ScaffoldRequest::new(TemplateReference::parse("web").unwrap(), "/work")
        .project_name("AcmeWeb");
    let outcome = service.scaffold(&request).await.unwrap();

    assert_eq!(outcome.project_root, PathBuf::from("/work/AcmeWeb"));
    assert_eq!(
        outcome.archive_path,
        PathBuf::from(
            "/home/u/.stencil/cache/api.github.com!repos!netcoretemplates!web!zipball!v2"
        )
    );
    assert_eq!(
        h.fs.contents("/work/AcmeWeb/AcmeWeb.sln").as_deref(),
        Some("Project(\"AcmeWeb\") = \"AcmeWeb\"")
    );
    assert_eq!(
        h.fs.contents("/work/AcmeWeb/AcmeWeb/package.json").as_deref(),
        Some(r#"{"name":"acme-web","title":"AcmeWeb"}"#)
    );
    // Binary assets keep their bytes
    assert_eq!(
        h.fs.contents("/work/AcmeWeb/AcmeWeb/wwwroot/AcmeWeb.png").as_deref(),
        Some("MyApp")
    );
    assert!(!h.fs.exists(Path::new("/work/NetCoreTemplates-web-1a2b3c")));

    assert_eq!(
        *h.commands.0.lock().unwrap(),
        vec!["cd \"AcmeWeb\" && npm install @ /work/AcmeWeb".to_string()]
    );
    assert_eq!(*h.usage.0.lock().unwrap(), vec!["web".to_string()]);
}

#[tokio::test]
async fn second_run_uses_the_cache() {
    let h = harness(catalogue());
    let service = ScaffoldService::new(&h.ports, sources(), "/cache");

    for name in ["First", "Second"] {
        let request = ScaffoldRequest::new(TemplateReference::parse("web").unwrap(), "/work")
            .project_name(name);
        service.scaffold(&request).await.unwrap();
    }

    let downloads = h
        .http
        .requests
        .lock()
        .unwrap()
        .iter()
        .filter(|u| u.as_str() == V2_ZIP)
        .count();
    assert_eq!(downloads, 1);
    assert!(h.fs.exists(Path::new("/work/First/First.sln")));
    assert!(h.fs.exists(Path::new("/work/Second/Second.sln")));
}

#[tokio::test]
async fn rerunning_the_renamer_is_a_no_op() {
    let h = harness(catalogue());
    let service = ScaffoldService::new(&h.ports, sources(), "/cache");
    let request = ScaffoldRequest::new(TemplateReference::parse("web").unwrap(), "/work")
        .project_name("Acme");
    service.scaffold(&request).await.unwrap();

    let renamer = stencil_core::application::services::TemplateRenamer::new(
        h.fs.clone(),
        stencil_core::application::ManagedRetry::default(),
    );
    let report = renamer
        .rename(Path::new("/work/Acme"), &Substitution::new("Acme"))
        .await
        .unwrap();
    assert_eq!(report.renamed, 0);
    assert_eq!(report.rewritten, 0);
}

#[tokio::test]
async fn unknown_template_is_not_found() {
    let h = harness(catalogue());
    let service = ScaffoldService::new(&h.ports, sources(), "/cache");
    let request = ScaffoldRequest::new(TemplateReference::parse("nope").unwrap(), "/work");

    let err = service.scaffold(&request).await.unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert!(err.suggestions().iter().any(|s| s.contains("stencil list")));
}

#[tokio::test]
async fn catalogue_lists_sources_in_order() {
    let h = harness(catalogue());
    let service = TemplateService::new(h.ports.http.clone(), h.ports.usage.clone(), sources());

    let listings = service.list().await.unwrap();
    let names: Vec<&str> = listings.iter().map(|l| l.source.name.as_str()).collect();
    assert_eq!(names, ["Core", "Framework"]);
    assert_eq!(listings[0].repositories[0].name, "web");
}
