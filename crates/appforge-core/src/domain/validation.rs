//! Name and version validators.

use crate::domain::{descriptor::AppDescriptor, error::DomainError};

/// Fail unless `name` is an identifier: non-empty, alphanumerics and
/// underscores only, not starting with a digit.
pub fn check_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !(first.is_alphabetic() || first == '_') {
        return Err(invalid("must start with a letter or underscore"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || *c == '_')) {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

/// Fail unless every `.`-separated component of `version` is a non-empty
/// run of ASCII digits. Component count and range are not checked.
pub fn check_semantic_version(version: &str) -> Result<(), DomainError> {
    for component in version.split('.') {
        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidVersion {
                version: version.to_string(),
                reason: format!("component '{component}' is not numeric"),
            });
        }
    }
    Ok(())
}

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// Validate everything about a descriptor that can be checked without I/O.
    ///
    /// The package name (dashes folded to underscores) is what must be an
    /// identifier, so `my-app` from a repository URL is accepted.
    pub fn validate_descriptor(descriptor: &AppDescriptor) -> Result<(), DomainError> {
        check_name(&descriptor.package_name()).map_err(|e| match e {
            DomainError::InvalidName { reason, .. } => DomainError::InvalidName {
                name: descriptor.name().to_string(),
                reason,
            },
            other => other,
        })?;
        check_semantic_version(descriptor.version())
    }
}
