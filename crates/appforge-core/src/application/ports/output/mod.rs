//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `appforge-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::AppforgeResult;

/// One child of a directory, as returned by [`Filesystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `appforge_adapters::filesystem::LocalFilesystem` (production)
/// - `appforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> AppforgeResult<String>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> AppforgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AppforgeResult<()>;

    /// Immediate children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> AppforgeResult<Vec<DirEntry>>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> AppforgeResult<()>;

    /// Copy one file, overwriting `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> AppforgeResult<()>;

    /// Copy a directory tree to `to`, which must not exist yet.
    fn copy_dir(&self, from: &Path, to: &Path) -> AppforgeResult<()>;

    /// Add the executable bit for everyone.
    fn set_executable(&self, path: &Path) -> AppforgeResult<()>;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }
}

/// Port for obtaining a copy of the template.
///
/// Implemented by:
/// - `appforge_adapters::fetcher::GitFetcher` (`git clone`)
/// - `appforge_adapters::fetcher::LocalFetcher` (copy of a local directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Populate the existing, empty directory `into` from `source`.
    fn fetch(&self, source: &str, into: &Path) -> AppforgeResult<()>;
}

/// Port for the final "make shell scripts executable" step.
///
/// Implemented by:
/// - `appforge_adapters::marker::PermissionBitMarker` (filesystem mode bit)
/// - `appforge_adapters::marker::GitIndexMarker` (`git update-index --chmod=+x`)
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableMarker: Send + Sync {
    /// Short strategy name for logs and reports.
    fn strategy(&self) -> &'static str;

    fn mark_executable(&self, path: &Path) -> AppforgeResult<()>;
}
