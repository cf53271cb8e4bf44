//! Template fetchers: a git clone, or a copy of a local directory.

use std::path::Path;

use appforge_core::{
    application::{ApplicationError, TemplateFetcher},
    error::AppforgeResult,
};
use tracing::{info, instrument, warn};

use crate::{filesystem::copy_tree, git::GitCli};

/// Fetches a template with `git clone`.
///
/// A clone that exits non-zero is logged and otherwise ignored; the
/// missing placeholder directory is reported by the service right after.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    git: GitCli,
}

impl GitFetcher {
    pub fn new(git: GitCli) -> Self {
        Self { git }
    }

    /// Locate `git` on `PATH`, failing with `ToolingUnavailable`.
    pub fn locate() -> AppforgeResult<Self> {
        GitCli::locate().map(Self::new)
    }
}

impl TemplateFetcher for GitFetcher {
    #[instrument(skip(self, into), fields(into = %into.display()))]
    fn fetch(&self, source: &str, into: &Path) -> AppforgeResult<()> {
        let output = self.git.clone_repo(source, into)?;
        if output.status.success() {
            info!("Template cloned");
        } else {
            warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git clone exited with an error"
            );
        }
        Ok(())
    }
}

/// Copies a template from a local directory, `.git` included.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

impl LocalFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateFetcher for LocalFetcher {
    #[instrument(skip(self, into), fields(into = %into.display()))]
    fn fetch(&self, source: &str, into: &Path) -> AppforgeResult<()> {
        let from = Path::new(source);
        if !from.is_dir() {
            return Err(ApplicationError::FetchFailed {
                url: source.to_string(),
                reason: "not a directory".into(),
            }
            .into());
        }
        copy_tree(from, into)?;
        info!("Template copied");
        Ok(())
    }
}
