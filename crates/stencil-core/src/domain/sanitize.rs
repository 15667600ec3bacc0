//! Turns archive URLs into stable cache file names.
//!
//! The mapping must not vary across runs or platforms: a given URL always lands
//! on the same cache entry. The output is bounded to [`MAX_FILENAME_LENGTH`]
//! characters, never contains a reserved filename character and never equals a
//! Windows device name.

use crate::domain::error::DomainError;

/// Upper bound on the sanitized name, in characters.
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Marker substituted for every reserved character.
pub const DEFAULT_REPLACEMENT: &str = "!";

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const WINDOWS_DEVICE_NAMES: &[&str] = &["con", "prn", "aux", "nul"];

/// Filename sanitizer with a configurable replacement marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameSanitizer {
    replacement: String,
}

impl Default for FilenameSanitizer {
    fn default() -> Self {
        Self {
            replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

impl FilenameSanitizer {
    /// Sanitizer using [`DEFAULT_REPLACEMENT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizer with a custom replacement marker.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidReplacement`] when the marker itself contains
    /// a reserved or control character.
    pub fn with_replacement(replacement: impl Into<String>) -> Result<Self, DomainError> {
        let replacement = replacement.into();
        if replacement.chars().any(|c| is_reserved(c) || is_control(c)) {
            return Err(DomainError::InvalidReplacement { replacement });
        }
        Ok(Self { replacement })
    }

    /// Cache key for a URL: scheme and credentials dropped, lowercased, then
    /// sanitized.
    pub fn sanitize_url(&self, url: &str) -> String {
        self.sanitize(&humanize_url(url))
    }

    /// Sanitize an arbitrary string into a safe file name.
    pub fn sanitize(&self, input: &str) -> String {
        let r = self.replacement.as_str();

        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            if is_reserved(c) || is_control(c) {
                out.push_str(r);
            } else {
                out.push(c);
            }
        }

        let trimmed = out.trim_start_matches('.');
        if trimmed.len() != out.len() {
            out = format!("{r}{trimmed}");
        }

        if !r.is_empty() {
            out = collapse_repeated(&out, r);
            if out.chars().count() > 1 {
                out = strip_outer(&out, r);
            }
        }

        if is_windows_device_name(&out) {
            out.push_str(r);
        }

        out.chars().take(MAX_FILENAME_LENGTH).collect()
    }
}

/// Sanitize a URL with the default replacement marker.
pub fn sanitize_url(url: &str) -> String {
    FilenameSanitizer::default().sanitize_url(url)
}

fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c) || ('\u{0}'..='\u{1f}').contains(&c)
}

fn is_control(c: char) -> bool {
    ('\u{0}'..='\u{1f}').contains(&c) || ('\u{80}'..='\u{9f}').contains(&c)
}

fn collapse_repeated(input: &str, target: &str) -> String {
    let doubled = target.repeat(2);
    let mut out = input.to_string();
    while out.contains(&doubled) {
        out = out.replace(&doubled, target);
    }
    out
}

fn strip_outer(input: &str, target: &str) -> String {
    let head = input.strip_prefix(target).unwrap_or(input);
    head.strip_suffix(target).unwrap_or(head).to_string()
}

fn is_windows_device_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if WINDOWS_DEVICE_NAMES.contains(&lower.as_str()) {
        return true;
    }
    let bytes = lower.as_bytes();
    bytes.len() == 4
        && (lower.starts_with("com") || lower.starts_with("lpt"))
        && bytes[3].is_ascii_digit()
}

/// `https://user:pw@GitHub.com/A` → `github.com/a`.
fn humanize_url(url: &str) -> String {
    let lowered = strip_url_auth(url).to_lowercase();
    for prefix in ["https://", "http://", "//"] {
        if let Some(rest) = lowered.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    lowered
}

fn strip_url_auth(input: &str) -> String {
    let Some(prefix_len) = authority_offset(input) else {
        return input.to_string();
    };

    let rest = &input[prefix_len..];
    match rest.find(['@', '/']) {
        Some(i) if i > 0 && rest[i..].starts_with('@') => {
            format!("{}{}", &input[..prefix_len], &rest[i + 1..])
        }
        _ => input.to_string(),
    }
}

/// Byte offset just past `scheme://` (or a leading `//`).
fn authority_offset(input: &str) -> Option<usize> {
    if input.starts_with("//") {
        return Some(2);
    }
    let colon = input.find(':')?;
    let scheme = &input[..colon];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    input[colon + 1..].starts_with("//").then_some(colon + 3)
}
