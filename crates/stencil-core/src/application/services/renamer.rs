//! Placeholder substitution across an extracted template tree.
//!
//! The walk is a worklist of directories. For every entry the name is
//! rewritten first (with managed retry), then files have their contents
//! rewritten and directories are queued. A failure on one entry is logged and
//! counted; siblings and the rest of the tree are still processed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::{DirEntry, EntryKind, Filesystem},
        services::retry::ManagedRetry,
    },
    domain::{Substitution, is_binary_asset},
    error::StencilResult,
};

/// What a rename pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Entries whose name contained the placeholder.
    pub renamed: usize,
    /// Files whose contents changed.
    pub rewritten: usize,
    /// Files left untouched because of their extension.
    pub skipped_binary: usize,
    /// Entries abandoned after a rename, read or write failure.
    pub failures: usize,
}

pub struct TemplateRenamer {
    filesystem: Arc<dyn Filesystem>,
    retry: ManagedRetry,
}

impl TemplateRenamer {
    pub fn new(filesystem: Arc<dyn Filesystem>, retry: ManagedRetry) -> Self {
        Self { filesystem, retry }
    }

    /// Substitute the placeholder in every name and text file under `root`.
    ///
    /// Only an unreadable `root` is an error. Re-running over a tree that no
    /// longer contains the placeholder changes nothing.
    #[instrument(skip_all, fields(root = %root.display(), project = substitution.project_name()))]
    pub async fn rename(
        &self,
        root: &Path,
        substitution: &Substitution,
    ) -> StencilResult<RenameReport> {
        let mut report = RenameReport::default();
        let mut worklist: Vec<(PathBuf, Vec<DirEntry>)> =
            vec![(root.to_path_buf(), self.filesystem.read_dir(root)?)];

        while let Some((dir, entries)) = worklist.pop() {
            for entry in entries {
                let Some(path) = self.rename_entry(&dir, &entry, substitution, &mut report).await
                else {
                    continue;
                };

                match entry.kind {
                    EntryKind::Directory => match self.filesystem.read_dir(&path) {
                        Ok(children) => worklist.push((path, children)),
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "Could not read directory");
                            report.failures += 1;
                        }
                    },
                    EntryKind::File => self.rewrite_file(&path, substitution, &mut report),
                    EntryKind::Other => debug!(path = %path.display(), "Not a file, contents left as-is"),
                }
            }
        }

        debug!(?report, "Rename complete");
        Ok(report)
    }

    /// Rename one entry if its name contains the placeholder. Returns the
    /// entry's current path, or `None` when the rename was abandoned.
    async fn rename_entry(
        &self,
        dir: &Path,
        entry: &DirEntry,
        substitution: &Substitution,
        report: &mut RenameReport,
    ) -> Option<PathBuf> {
        let from = dir.join(&entry.name);
        let new_name = substitution.rename(&entry.name);
        if new_name == entry.name {
            return Some(from);
        }

        let to = dir.join(&new_name);
        match self.retry.run(|| self.filesystem.rename(&from, &to)).await {
            Ok(()) => {
                debug!(from = %entry.name, to = %new_name, "Renamed");
                report.renamed += 1;
                Some(to)
            }
            Err(e) => {
                warn!(path = %from.display(), error = %e, "Could not rename, skipping");
                report.failures += 1;
                None
            }
        }
    }

    fn rewrite_file(&self, path: &Path, substitution: &Substitution, report: &mut RenameReport) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if is_binary_asset(&file_name) {
            report.skipped_binary += 1;
            return;
        }

        let content = match self.filesystem.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read file");
                report.failures += 1;
                return;
            }
        };

        let rewritten = substitution.rewrite(&content);
        if rewritten == content {
            return;
        }

        match self.filesystem.write_file(path, rewritten.as_bytes()) {
            Ok(()) => report.rewritten += 1,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not write file");
                report.failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::*;

    use super::*;
    use crate::application::{ApplicationError, ports::output::MockFilesystem};

    fn renamer(fs: MockFilesystem) -> TemplateRenamer {
        TemplateRenamer::new(Arc::new(fs), ManagedRetry::default())
    }

    fn locked(path: &Path) -> crate::error::StencilError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "The process cannot access the file".into(),
        }
        .into()
    }

    #[tokio::test]
    async fn renames_and_rewrites_nested_tree() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .with(eq(PathBuf::from("/p")))
            .returning(|_| {
                Ok(vec![
                    DirEntry::file("MyApp.csproj"),
                    DirEntry::directory("MyApp.Web"),
                ])
            });
        fs.expect_read_dir()
            .with(eq(PathBuf::from("/p/Acme.Web")))
            .returning(|_| Ok(vec![DirEntry::file("package.json")]));

        fs.expect_rename()
            .with(eq(PathBuf::from("/p/MyApp.csproj")), eq(PathBuf::from("/p/Acme.csproj")))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .with(eq(PathBuf::from("/p/MyApp.Web")), eq(PathBuf::from("/p/Acme.Web")))
            .times(1)
            .returning(|_, _| Ok(()));

        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/p/Acme.csproj")))
            .returning(|_| Ok("namespace MyApp { }".into()));
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/p/Acme.Web/package.json")))
            .returning(|_| Ok(r#"{"name":"my-app"}"#.into()));

        fs.expect_write_file()
            .withf(|path, body| path == Path::new("/p/Acme.csproj") && body == b"namespace Acme { }")
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|path, body| {
                path == Path::new("/p/Acme.Web/package.json") && body == br#"{"name":"acme"}"#
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let report = renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();
        assert_eq!(
            report,
            RenameReport {
                renamed: 2,
                rewritten: 2,
                skipped_binary: 0,
                failures: 0
            }
        );
    }

    #[tokio::test]
    async fn binary_assets_are_renamed_but_never_opened() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::file("MyApp.png")]));
        fs.expect_rename()
            .with(eq(PathBuf::from("/p/MyApp.png")), eq(PathBuf::from("/p/Acme.png")))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let report = renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(report.skipped_binary, 1);
    }

    #[tokio::test]
    async fn already_substituted_tree_is_untouched() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .returning(|_| Ok(vec![DirEntry::file("Acme.csproj")]));
        fs.expect_rename().never();
        fs.expect_read_to_string()
            .returning(|_| Ok("namespace Acme { }".into()));
        fs.expect_write_file().never();

        let report = renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();
        assert_eq!(report, RenameReport::default());
    }

    #[tokio::test]
    async fn names_only_use_exact_placeholder() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir()
            .with(eq(PathBuf::from("/p")))
            .returning(|_| Ok(vec![DirEntry::directory("my-app")]));
        fs.expect_rename().never();
        fs.expect_read_dir()
            .with(eq(PathBuf::from("/p/my-app")))
            .returning(|_| Ok(vec![]));

        renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn locked_entry_is_abandoned_and_siblings_continue() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir().returning(|_| {
            Ok(vec![
                DirEntry::directory("MyApp"),
                DirEntry::file("MyApp.sln"),
            ])
        });
        fs.expect_rename()
            .with(eq(PathBuf::from("/p/MyApp")), always())
            .returning(|from, _| Err(locked(from)));
        fs.expect_rename()
            .with(eq(PathBuf::from("/p/MyApp.sln")), eq(PathBuf::from("/p/Acme.sln")))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/p/Acme.sln")))
            .returning(|_| Ok("Project MyApp".into()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let started = tokio::time::Instant::now();
        let report = renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(10));
        assert_eq!(report.failures, 1);
        assert_eq!(report.renamed, 1);
        assert_eq!(report.rewritten, 1);
    }

    #[tokio::test]
    async fn unreadable_file_does_not_stop_the_walk() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir().returning(|_| {
            Ok(vec![DirEntry::file("a.txt"), DirEntry::file("b.txt")])
        });
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/p/a.txt")))
            .returning(|p| Err(locked(p)));
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/p/b.txt")))
            .returning(|_| Ok("MyApp".into()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let report = renamer(fs)
            .rename(Path::new("/p"), &Substitution::new("Acme"))
            .await
            .unwrap();
        assert_eq!(report.failures, 1);
        assert_eq!(report.rewritten, 1);
    }

    #[tokio::test]
    async fn unreadable_root_is_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_dir().returning(|p| Err(locked(p)));

        assert!(
            renamer(fs)
                .rename(Path::new("/p"), &Substitution::new("Acme"))
                .await
                .is_err()
        );
    }
}
