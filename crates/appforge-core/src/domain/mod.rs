//! Core domain layer for Appforge.
//!
//! Pure logic only: validators, the app descriptor, the template profile,
//! and the line rules. All I/O goes through the ports defined in the
//! application layer.

pub mod descriptor;
pub mod error;
pub mod profile;
pub mod report;
pub mod rules;
pub mod text;

mod validation;

pub use descriptor::{AppDescriptor, AppDescriptorBuilder, DEFAULT_VERSION, normalize_github_url};
pub use error::DomainError;
pub use profile::{TemplateProfile, TokenRule, VCS_DIR};
pub use report::CreationReport;
pub use rules::{PrefixRule, ReplacementRule, build_descriptor_rules, manifest_rules};
pub use text::{remove_double_blank_lines, replace_in_lines};
pub use validation::{DomainValidator, check_name, check_semantic_version};
