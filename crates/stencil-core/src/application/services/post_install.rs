//! Post-install commands run inside a freshly created project.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    application::ports::{CommandRunner, Filesystem},
    domain::{PostInstallRule, Substitution},
};

pub struct PostInstaller {
    filesystem: Arc<dyn Filesystem>,
    commands: Arc<dyn CommandRunner>,
}

impl PostInstaller {
    pub fn new(filesystem: Arc<dyn Filesystem>, commands: Arc<dyn CommandRunner>) -> Self {
        Self {
            filesystem,
            commands,
        }
    }

    /// Run every rule whose `test` path exists under `root`.
    ///
    /// Command failures are logged and never stop later rules. Returns the
    /// commands that were started.
    pub fn run(
        &self,
        rules: &[PostInstallRule],
        root: &Path,
        substitution: &Substitution,
    ) -> Vec<String> {
        let mut executed = Vec::new();

        for rule in rules.iter().map(|r| r.resolve(substitution)) {
            if !self.filesystem.exists(&root.join(&rule.test)) {
                debug!(test = %rule.test, "Path does not exist, rule skipped");
                continue;
            }
            let Some(exec) = rule.exec else {
                continue;
            };

            info!(test = %rule.test, "Running '{exec}'");
            if let Err(e) = self.commands.run(&exec, root) {
                warn!(command = %exec, error = %e, "Post-install command failed");
            }
            executed.push(exec);
        }

        executed
    }
}
