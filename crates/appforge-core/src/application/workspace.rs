//! Scratch workspace: the ephemeral directory the template is fetched into.

use std::path::Path;

use tempfile::TempDir;
use tracing::debug;

use crate::{application::ApplicationError, error::AppforgeResult};

/// Temporary directory owned by one transformer run.
///
/// Removed when dropped, on success and on every error path.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    pub fn new() -> AppforgeResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("appforge-")
            .tempdir()
            .map_err(|e| ApplicationError::io(std::env::temp_dir(), "create scratch directory", &e))?;
        debug!(path = %dir.path().display(), "Scratch workspace created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_is_removed_on_drop() {
        let scratch = ScratchWorkspace::new().unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("f.txt"), "x").unwrap();
        assert!(path.is_dir());
        drop(scratch);
        assert!(!path.exists());
    }
}
