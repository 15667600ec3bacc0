// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (shared across the pipeline stages)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Illegal char in project name: {name}")]
    IllegalProjectNameChars { name: String },

    #[error("Illegal project name: {name}")]
    ReservedProjectName { name: String },

    #[error("Invalid template reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Replacement string '{replacement}' cannot contain reserved filename characters")]
    InvalidReplacement { replacement: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::IllegalProjectNameChars { name } => vec![
                format!("'{}' is not a valid project name", name),
                "Start with a letter, '_' or '$'".into(),
                "Continue with letters, digits, '_', '$' or '.'".into(),
                "Examples: Acme, My.Service, _internal".into(),
            ],
            Self::ReservedProjectName { name } => vec![
                format!("'{}' is reserved by the operating system", name),
                "Choose a different project name".into(),
            ],
            Self::InvalidReference { .. } => vec![
                "Supported references:".into(),
                "  • a template name, optionally pinned: react-app@v1.2".into(),
                "  • a GitHub repository: owner/repo or https://github.com/owner/repo".into(),
                "  • a releases API URL ending in /releases".into(),
                "  • a direct link or local path to a .zip archive".into(),
            ],
            Self::InvalidReplacement { .. } => {
                vec!["Use a replacement without <>:\"/\\|?* or control characters".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IllegalProjectNameChars { .. }
            | Self::ReservedProjectName { .. }
            | Self::InvalidReference { .. } => ErrorCategory::Validation,
            Self::InvalidReplacement { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
