//! Thin wrapper around the `git` executable.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use appforge_core::{application::ApplicationError, error::AppforgeResult};
use tracing::debug;

const GIT: &str = "git";

/// A located `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Find `git` on `PATH`.
    pub fn locate() -> AppforgeResult<Self> {
        which::which(GIT)
            .map(Self::with_program)
            .map_err(|_| unavailable().into())
    }

    /// Use an explicit binary instead of searching `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `git clone <url> <into>`. A non-zero exit is returned, not raised.
    pub fn clone_repo(&self, url: &str, into: &Path) -> AppforgeResult<Output> {
        debug!(url, into = %into.display(), "Running: git clone");
        self.command()
            .arg("clone")
            .arg(url)
            .arg(into)
            .output()
            .map_err(|e| spawn_error(&e, url))
    }

    /// `git update-index --add --chmod=+x <file>`, run from the file's directory.
    pub fn update_index_chmod(&self, file: &Path) -> AppforgeResult<Output> {
        let dir = file.parent().unwrap_or_else(|| Path::new("."));
        let name = file.file_name().unwrap_or(file.as_os_str());
        debug!(file = %file.display(), "Running: git update-index --chmod=+x");
        self.command()
            .current_dir(dir)
            .args(["update-index", "--add", "--chmod=+x"])
            .arg(name)
            .output()
            .map_err(|e| spawn_error(&e, &file.display().to_string()))
    }

    /// Whether `dir` (or its closest existing ancestor) is inside a work tree.
    pub fn is_inside_work_tree(&self, dir: &Path) -> bool {
        let Some(existing) = dir.ancestors().find(|p| p.is_dir()) else {
            return false;
        };
        self.command()
            .current_dir(existing)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()
            .map(|out| out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true")
            .unwrap_or(false)
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }
}

fn unavailable() -> ApplicationError {
    ApplicationError::ToolingUnavailable { tool: GIT.into() }
}

fn spawn_error(e: &io::Error, target: &str) -> appforge_core::error::AppforgeError {
    if e.kind() == io::ErrorKind::NotFound {
        unavailable().into()
    } else {
        ApplicationError::FetchFailed {
            url: target.to_string(),
            reason: e.to_string(),
        }
        .into()
    }
}
