//! Application layer for Appforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`CreateAppService`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Editor / workspace**: the line editor and the scratch directory the
//!   service works in
//! - **Errors**: Application-specific error types
//!
//! Text and naming rules live in `crate::domain`; this layer only wires them
//! to the ports.

pub mod editor;
pub mod error;
pub mod ports;
pub mod services;
pub mod workspace;

pub use editor::LineEditor;
pub use error::ApplicationError;
pub use services::CreateAppService;
pub use workspace::ScratchWorkspace;

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, ExecutableMarker, Filesystem, TemplateFetcher};
