//! Application layer errors.
//!
//! These errors represent failures while fetching, transforming, or copying
//! the template. Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// No directory named after the placeholder exists in the fetched tree.
    #[error("Directory '{placeholder}' not found under {}", root.display())]
    PlaceholderNotFound { placeholder: String, root: PathBuf },

    /// A file the template is expected to contain is absent.
    #[error("Expected file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A directory the template is expected to contain is absent.
    #[error("Expected directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    /// A copy target already exists in the destination.
    #[error("Destination already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    /// A required external tool is not on `PATH`.
    #[error("Required tool '{tool}' is not installed")]
    ToolingUnavailable { tool: String },

    /// The template could not be fetched at all.
    #[error("Failed to fetch template from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Underlying filesystem operation failed.
    #[error("Filesystem error at {}: failed to {operation}: {reason}", path.display())]
    Filesystem {
        path: PathBuf,
        operation: &'static str,
        reason: String,
    },
}

impl ApplicationError {
    /// Build a [`ApplicationError::Filesystem`] from an I/O error.
    pub fn io(path: impl Into<PathBuf>, operation: &'static str, err: &std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            operation,
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PlaceholderNotFound { placeholder, .. } => vec![
                format!("The template has no '{placeholder}' directory"),
                "Check that the clone succeeded (network, URL, credentials)".into(),
                "If you use a custom template, set template.placeholder_dir in the config".into(),
            ],
            Self::MissingFile { path } | Self::MissingDirectory { path } => vec![
                format!("The template does not contain {}", path.display()),
                "The template layout may have changed; check template.* in the config".into(),
            ],
            Self::DestinationExists { path } => vec![
                format!("'{}' already exists", path.display()),
                "Choose an empty output directory".into(),
                format!("Remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::ToolingUnavailable { tool } => vec![
                format!("Install {tool} and make sure it is on your PATH"),
                "Or use --template <PATH> with a local template directory".into(),
            ],
            Self::FetchFailed { url, .. } => vec![
                format!("Could not fetch {url}"),
                "Check the URL and your network connection".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PlaceholderNotFound { .. }
            | Self::MissingFile { .. }
            | Self::MissingDirectory { .. } => ErrorCategory::Precondition,
            Self::DestinationExists { .. } => ErrorCategory::Conflict,
            Self::ToolingUnavailable { .. } => ErrorCategory::Tooling,
            Self::FetchFailed { .. } | Self::Filesystem { .. } => ErrorCategory::Internal,
        }
    }
}
