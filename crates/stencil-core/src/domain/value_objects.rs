//! Placeholder token and the substitution derived from a project name.
//!
//! Every shipped template is authored with [`TEMPLATE_PLACEHOLDER`] in its file
//! names, directory names and file contents. Instantiating a template means
//! replacing that literal (and its kebab form) with the chosen project name.

/// Literal baked into every template. Replaced case-sensitively.
pub const TEMPLATE_PLACEHOLDER: &str = "MyApp";

/// Kebab-case derivative of [`TEMPLATE_PLACEHOLDER`]. Only substituted in
/// file contents, never in names.
pub const TEMPLATE_PLACEHOLDER_KEBAB: &str = "my-app";

/// File extensions whose contents are never opened for text substitution.
pub const IGNORE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "ico", "eot", "otf", "webp", "svg", "ttf", "woff", "woff2",
    "mp4", "webm", "wav", "mp3", "m4a", "aac", "oga", "ogg", "dll", "exe", "pdb", "so", "zip",
    "key", "snk", "p12", "swf", "xap", "class", "doc", "xls", "ppt", "sqlite", "db",
];

/// Convert `CamelCase` to `kebab-case`.
///
/// A dash is inserted only between an ASCII lowercase letter and the ASCII
/// uppercase letter following it, then the whole string is lowercased, so
/// `MyApp` becomes `my-app` and `ACMEApp` becomes `acmeapp`.
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if let Some(p) = prev {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                out.push('-');
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out.to_lowercase()
}

/// `true` when the file's extension (text after the last `.`) is a binary asset.
pub fn is_binary_asset(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            IGNORE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// The replacement pair threaded through the renamer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    project_name: String,
    project_name_kebab: String,
}

impl Substitution {
    /// Substitution for an explicit project name.
    pub fn new(project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let project_name_kebab = camel_to_kebab(&project_name);
        Self {
            project_name,
            project_name_kebab,
        }
    }

    /// Substitution for an optional name, defaulting to the placeholder itself.
    pub fn for_project(name: Option<&str>) -> Self {
        Self::new(name.unwrap_or(TEMPLATE_PLACEHOLDER))
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_name_kebab(&self) -> &str {
        &self.project_name_kebab
    }

    /// New file or directory name. Only the exact-case placeholder is replaced.
    pub fn rename(&self, name: &str) -> String {
        name.replace(TEMPLATE_PLACEHOLDER, &self.project_name)
    }

    /// New text contents: placeholder first, then its kebab form.
    pub fn rewrite(&self, content: &str) -> String {
        content
            .replace(TEMPLATE_PLACEHOLDER, &self.project_name)
            .replace(TEMPLATE_PLACEHOLDER_KEBAB, &self.project_name_kebab)
    }
}
