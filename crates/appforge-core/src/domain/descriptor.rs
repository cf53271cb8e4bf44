//! The caller-supplied identity of the application being generated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Version used when the caller does not supply one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Everything the transformer needs to know about the new application.
///
/// Built through [`AppDescriptor::builder`], which resolves the name and the
/// destination. Syntax checks live in
/// [`DomainValidator::validate_descriptor`](crate::domain::DomainValidator::validate_descriptor)
/// and run before any filesystem work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    name: String,
    description: String,
    author: String,
    keywords: String,
    version: String,
    github_url: String,
    destination: PathBuf,
}

impl AppDescriptor {
    pub fn builder() -> AppDescriptorBuilder {
        AppDescriptorBuilder::default()
    }

    /// Application name as written into the manifest (may contain `-`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Importable package name: the app name with `-` replaced by `_`.
    pub fn package_name(&self) -> String {
        self.name.replace('-', "_")
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Free-form keyword string, kept exactly as entered.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn github_url(&self) -> &str {
        &self.github_url
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Builder for [`AppDescriptor`].
#[derive(Debug, Default, Clone)]
pub struct AppDescriptorBuilder {
    name: Option<String>,
    description: String,
    author: String,
    keywords: String,
    version: Option<String>,
    github_url: String,
    destination: Option<PathBuf>,
}

impl AppDescriptorBuilder {
    /// Explicit application name. Blank values fall back to derivation.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn github_url(mut self, url: impl Into<String>) -> Self {
        self.github_url = url.into();
        self
    }

    /// Destination root. Defaults to the current working directory.
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Resolve the name and destination.
    ///
    /// Name resolution order: explicit name, last segment of the GitHub URL,
    /// file name of the destination directory.
    pub fn build(self) -> Result<AppDescriptor, DomainError> {
        let destination = self
            .destination
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or_else(|| name_from_url(&self.github_url))
            .or_else(|| name_from_path(&destination))
            .ok_or(DomainError::MissingAppName)?;

        let version = self
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Ok(AppDescriptor {
            name,
            description: self.description,
            author: self.author,
            keywords: self.keywords,
            version,
            github_url: self.github_url,
            destination,
        })
    }
}

/// Strip a trailing `/` and a `.git` suffix from a repository URL.
pub fn normalize_github_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

fn name_from_url(url: &str) -> Option<String> {
    let url = normalize_github_url(url);
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn name_from_path(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_start_matches('.'))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
