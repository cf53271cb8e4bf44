//! Strategies for marking shell scripts executable.

use std::path::Path;

use appforge_core::{
    application::{ExecutableMarker, Filesystem},
    error::AppforgeResult,
};
use tracing::{debug, warn};

use crate::git::GitCli;

/// Sets the execute bits on the file itself.
#[derive(Debug, Clone)]
pub struct PermissionBitMarker<F: Filesystem> {
    filesystem: F,
}

impl<F: Filesystem> PermissionBitMarker<F> {
    pub fn new(filesystem: F) -> Self {
        Self { filesystem }
    }
}

impl<F: Filesystem> ExecutableMarker for PermissionBitMarker<F> {
    fn strategy(&self) -> &'static str {
        "permission"
    }

    fn mark_executable(&self, path: &Path) -> AppforgeResult<()> {
        debug!(path = %path.display(), "chmod +x");
        self.filesystem.set_executable(path)
    }
}

/// Records the execute bit in the git index of the repository that
/// contains the file. Failures from git are logged, not raised.
#[derive(Debug, Clone)]
pub struct GitIndexMarker {
    git: GitCli,
}

impl GitIndexMarker {
    pub fn new(git: GitCli) -> Self {
        Self { git }
    }
}

impl ExecutableMarker for GitIndexMarker {
    fn strategy(&self) -> &'static str {
        "index"
    }

    fn mark_executable(&self, path: &Path) -> AppforgeResult<()> {
        let output = self.git.update_index_chmod(path)?;
        if !output.status.success() {
            warn!(
                path = %path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git update-index --chmod=+x failed"
            );
        }
        Ok(())
    }
}
