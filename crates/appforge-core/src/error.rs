//! Unified error handling for Appforge Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Appforge Core operations.
///
/// This enum wraps all possible errors that can occur when using appforge-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppforgeError {
    /// Errors from the domain layer (invalid names, versions, descriptors).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (fetching, transforming, copying).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl AppforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Appforge".into(),
                "Please report this issue at: https://github.com/cosecruz/appforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input rejected before anything was touched.
    Validation,
    /// The cloned template did not have the expected shape.
    Precondition,
    /// The destination already holds something we refuse to overwrite.
    Conflict,
    /// A required external tool is missing.
    Tooling,
    Internal,
}

/// Convenient result type alias.
pub type AppforgeResult<T> = Result<T, AppforgeError>;
