//! Top-level error for everything `stencil-core` exposes.
//!
//! Layer errors convert into [`StencilError`] with `?`; frontends only ever
//! need this type, its [`suggestions`](StencilError::suggestions) and its
//! [`category`](StencilError::category).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum StencilError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A component (HTTP client, telemetry client) could not be set up from
    /// the supplied settings.
    #[error("Could not set up the {component}: {reason}")]
    Setup {
        component: &'static str,
        reason: String,
    },
}

impl StencilError {
    pub fn setup(component: &'static str, reason: impl ToString) -> Self {
        Self::Setup {
            component,
            reason: reason.to_string(),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Setup { component, .. } => vec![
                format!("Check the settings used by the {component}"),
                "Run with -vv for details".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Setup { .. } => ErrorCategory::Configuration,
        }
    }

    /// Transient I/O and transport failures; the retry policy only repeats
    /// operations that fail with one of these.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::FilesystemError { .. } | ApplicationError::Transport { .. }
            )
        )
    }
}

/// Coarse grouping used by frontends to pick styling and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Network,
    Configuration,
    Internal,
}

pub type StencilResult<T> = Result<T, StencilError>;
