//! Configuration-backed entities: template sources and post-install rules.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Substitution;

/// A registry endpoint listing template repositories (e.g. a GitHub
/// organization's `repos` endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSource {
    pub name: String,
    pub url: String,
}

impl TemplateSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Command executed after a project is created, when `test` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInstallRule {
    /// Path, relative to the project root, whose existence triggers the rule.
    pub test: String,
    /// Shell command to run in the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
}

impl PostInstallRule {
    pub fn new(test: impl Into<String>, exec: Option<&str>) -> Self {
        Self {
            test: test.into(),
            exec: exec.map(str::to_string),
        }
    }

    /// The rule with the placeholder (and its kebab form) substituted in both
    /// fields.
    pub fn resolve(&self, substitution: &Substitution) -> Self {
        Self {
            test: substitution.rewrite(&self.test),
            exec: self.exec.as_deref().map(|e| substitution.rewrite(e)),
        }
    }
}
