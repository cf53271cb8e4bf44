use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised before the filesystem is touched, so the caller
/// can fix the input and retry with nothing to clean up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid application name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Neither an explicit name, a repository URL, nor a named destination
    /// directory was available to derive the application name from.
    #[error("Cannot determine an application name")]
    MissingAppName,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{name}' must be a valid identifier once '-' becomes '_'"),
                "Use letters, digits and underscores; do not start with a digit".into(),
                "Examples: myapp, my_app, my-app, app2".into(),
            ],
            Self::InvalidVersion { version, .. } => vec![
                format!("'{version}' must be dot-separated numbers"),
                "Examples: 1.0.0, 0.3, 2024.10.1".into(),
                "Pre-release and build suffixes (-rc1, +build) are not accepted".into(),
            ],
            Self::MissingAppName => vec![
                "Pass the application name explicitly".into(),
                "Or provide a GitHub URL whose last segment is the name".into(),
            ],
        }
    }
}
