use crate::domain::error::DomainError;

/// Names the operating system refuses (or that resolve to the current/parent dir).
pub const ILLEGAL_NAMES: &[&str] = &["CON", "AUX", "PRN", "COM1", "LP2", ".", ".."];

/// Centralized domain validation.
///
/// Only the pure rules live here. Whether a directory with the same name already
/// exists is an I/O question answered by the scaffold service through the
/// filesystem port.
pub struct DomainValidator;

impl DomainValidator {
    /// Check a proposed project name against the identifier grammar and the
    /// reserved-name list.
    ///
    /// The grammar is `[a-zA-Z_$][0-9a-zA-Z_$.]*` (ASCII only). `None` is always
    /// valid; the placeholder name is used downstream.
    pub fn validate_project_name(name: Option<&str>) -> Result<(), DomainError> {
        let Some(name) = name else {
            return Ok(());
        };

        if !is_valid_identifier(name) {
            return Err(DomainError::IllegalProjectNameChars { name: name.into() });
        }

        if ILLEGAL_NAMES.contains(&name) {
            return Err(DomainError::ReservedProjectName { name: name.into() });
        }

        Ok(())
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'))
}
