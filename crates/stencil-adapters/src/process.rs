//! Post-install commands through the platform shell.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use stencil_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::StencilResult,
};

/// Runs commands with `sh -c` (or `cmd /C` on Windows), inheriting stdio so
/// tool output such as `npm install` progress reaches the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(script: &str) -> Command {
        #[cfg(windows)]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", script]);
            command
        }
        #[cfg(not(windows))]
        {
            let mut command = Command::new("sh");
            command.args(["-c", script]);
            command
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command: &str, cwd: &Path) -> StencilResult<()> {
        debug!(command, cwd = %cwd.display(), "Spawning");
        let status = Self::command(command)
            .current_dir(cwd)
            .env("FORCE_COLOR", "1")
            .stdin(Stdio::null())
            .status()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
