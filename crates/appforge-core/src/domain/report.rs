use std::path::PathBuf;

use serde::Serialize;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationReport {
    pub app_name: String,
    pub package_name: String,
    pub destination: PathBuf,
    /// Top-level entries copied into the destination, in copy order.
    pub copied: Vec<PathBuf>,
    /// Scripts marked executable, relative to the destination.
    pub executables: Vec<PathBuf>,
    /// Lines rewritten across every rule and rewrite pass.
    pub lines_rewritten: usize,
}
