//! Infrastructure adapters for Appforge.
//!
//! This crate implements the ports defined in `appforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod git;
pub mod marker;

// Re-export commonly used adapters
pub use fetcher::{GitFetcher, LocalFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use git::GitCli;
pub use marker::{GitIndexMarker, PermissionBitMarker};
