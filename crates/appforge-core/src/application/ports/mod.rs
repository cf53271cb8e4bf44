//! Ports (interfaces) for the application layer.
//!
//! Ports define the boundaries between the application core and
//! infrastructure; `appforge-adapters` provides the implementations.

pub mod output;

pub use output::{DirEntry, ExecutableMarker, Filesystem, TemplateFetcher};

#[cfg(test)]
pub use output::{MockExecutableMarker, MockFilesystem, MockTemplateFetcher};
