//! Replacement and prefix rules derived from an [`AppDescriptor`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::descriptor::AppDescriptor;

/// A literal find/replace pair scoped to one file (relative to the clone root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub file: PathBuf,
    pub find: String,
    pub replace: String,
}

impl ReplacementRule {
    pub fn new(file: impl Into<PathBuf>, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Replace a whole line when it starts with `trigger` at column zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    pub trigger: String,
    pub replacement: String,
}

impl PrefixRule {
    pub fn new(trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            replacement: replacement.into(),
        }
    }
}

/// Rules for the project manifest (`pyproject.toml`-style).
pub fn manifest_rules(app: &AppDescriptor) -> Vec<PrefixRule> {
    vec![
        PrefixRule::new("name =", format!("name = \"{}\"", app.name())),
        PrefixRule::new(
            "description =",
            format!("description = \"{}\"", app.description()),
        ),
        PrefixRule::new("version =", format!("version = \"{}\"", app.version())),
        PrefixRule::new("authors =", format!("authors = [\"{}\"]", app.author())),
        PrefixRule::new("keywords =", format!("keywords = [\"{}\"]", app.keywords())),
    ]
}

/// Rules for the build descriptor (`setup.py`-style).
pub fn build_descriptor_rules(app: &AppDescriptor) -> Vec<PrefixRule> {
    vec![
        PrefixRule::new("URL =", format!("URL = \"{}\"", app.github_url())),
        PrefixRule::new("maintainer=", format!("maintainer=\"{}\"", app.author())),
        PrefixRule::new("KEYWORDS =", format!("KEYWORDS = \"{}\"", app.keywords())),
    ]
}
