//! Errors surfaced by the `stencil` binary, with suggestions and the exit
//! code each category maps to.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use stencil_core::error::{ErrorCategory as CoreCategory, StencilError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A config file is already present and `--force` was not given.
    #[error("Configuration already exists at {path}")]
    ConfigExists { path: PathBuf },

    /// An error propagated from `stencil-core`.
    #[error("{0}")]
    Core(#[from] StencilError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file passed with --config or ./stencil.config.json".into(),
                "Run 'stencil init' to write a default config".into(),
            ],

            Self::ConfigExists { path } => vec![
                "Use --force to overwrite it".into(),
                format!("Or edit {} directly", path.display()),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::ConfigExists { .. } => ErrorCategory::UserError,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Network => ErrorCategory::Network,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Network       |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Network => 5,
        }
    }

    /// Render the message, the cause chain (verbose only) and suggestions for
    /// stderr. With `color` the header and hints are styled.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\n{} {}",
            paint("\u{2717} Error:", Style::new().red().bold()),
            paint(&self.to_string(), Style::new().red())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("Caused by: {err}"), Style::new().dimmed())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", paint("Suggestions:", Style::new().yellow().bold()));
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.", Style::new().dimmed())
            );
        }
        out
    }

    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, "{self}")
            }
            _ => tracing::error!(?category, "{self}"),
        }
        if let Some(source) = self.source() {
            tracing::debug!("caused by: {source}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, invalid names, existing target folders.
    UserError,
    NotFound,
    Network,
    Configuration,
    Internal,
}
