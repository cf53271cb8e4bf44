//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use appforge_core::{
    application::{ApplicationError, DirEntry, Filesystem},
    error::{AppforgeError, AppforgeResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep one handle for
/// assertions while the service owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_with_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }

    fn require_parent(&self, path: &Path) -> AppforgeResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.directories.contains(parent) => {
                Err(not_found(path, "Parent directory does not exist"))
            }
            _ => Ok(()),
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn seed_file(&self, path: impl AsRef<Path>, content: &str) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.add_dir_with_parents(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
    }

    /// Add an empty directory (testing helper).
    pub fn seed_dir(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_with_parents(path.as_ref());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    fn read_guard(&self) -> AppforgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error())
    }

    fn write_guard(&self) -> AppforgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> AppforgeResult<String> {
        self.read_guard()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "No such file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> AppforgeResult<()> {
        let mut inner = self.write_guard()?;
        inner.require_parent(path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> AppforgeResult<()> {
        self.write_guard()?.add_dir_with_parents(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> AppforgeResult<Vec<DirEntry>> {
        let inner = self.read_guard()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "No such directory"));
        }

        let dirs = inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .map(|d| (d, true));
        let files = inner
            .files
            .keys()
            .filter(|f| f.parent() == Some(path))
            .map(|f| (f, false));

        let mut entries: Vec<DirEntry> = dirs
            .chain(files)
            .filter_map(|(p, is_dir)| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some(DirEntry {
                    path: p.clone(),
                    name,
                    is_dir,
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn rename(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        let mut inner = self.write_guard()?;
        inner.require_parent(to)?;

        if let Some(content) = inner.files.remove(from) {
            inner.files.insert(to.to_path_buf(), content);
            if inner.executables.remove(from) {
                inner.executables.insert(to.to_path_buf());
            }
            return Ok(());
        }
        if !inner.directories.contains(from) {
            return Err(not_found(from, "No such file or directory"));
        }

        let rebase = |p: &Path| p.strip_prefix(from).ok().map(|rel| to.join(rel));

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|d| d.starts_with(from))
            .cloned()
            .collect();
        for dir in dirs {
            inner.directories.remove(&dir);
            if let Some(moved) = rebase(&dir) {
                inner.directories.insert(moved);
            }
        }

        let files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|f| f.starts_with(from))
            .cloned()
            .collect();
        for file in files {
            let Some(content) = inner.files.remove(&file) else {
                continue;
            };
            if let Some(moved) = rebase(&file) {
                if inner.executables.remove(&file) {
                    inner.executables.insert(moved.clone());
                }
                inner.files.insert(moved, content);
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        let mut inner = self.write_guard()?;
        inner.require_parent(to)?;
        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "No such file"))?;
        inner.files.insert(to.to_path_buf(), content);
        if inner.executables.contains(from) {
            inner.executables.insert(to.to_path_buf());
        }
        Ok(())
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        let mut inner = self.write_guard()?;
        if inner.directories.contains(to) || inner.files.contains_key(to) {
            return Err(ApplicationError::DestinationExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        if !inner.directories.contains(from) {
            return Err(not_found(from, "No such directory"));
        }

        let rebase = |p: &Path| p.strip_prefix(from).ok().map(|rel| to.join(rel));

        let dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|d| d.starts_with(from))
            .filter_map(|d| rebase(d))
            .collect();
        for dir in dirs {
            inner.add_dir_with_parents(&dir);
        }

        let files: Vec<(PathBuf, String, bool)> = inner
            .files
            .iter()
            .filter(|(f, _)| f.starts_with(from))
            .filter_map(|(f, c)| Some((rebase(f)?, c.clone(), inner.executables.contains(f))))
            .collect();
        for (path, content, executable) in files {
            if executable {
                inner.executables.insert(path.clone());
            }
            inner.files.insert(path, content);
        }
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> AppforgeResult<()> {
        let mut inner = self.write_guard()?;
        if !inner.files.contains_key(path) {
            return Err(not_found(path, "No such file"));
        }
        inner.executables.insert(path.to_path_buf());
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}

fn not_found(path: &Path, reason: &str) -> AppforgeError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        operation: "access",
        reason: reason.to_string(),
    }
    .into()
}

fn lock_error() -> AppforgeError {
    AppforgeError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn read_dir_lists_direct_children_sorted() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/root/zeta.txt", "");
        fs.seed_file("/root/alpha/nested.txt", "");
        fs.seed_dir("/root/beta");

        let names: Vec<_> = fs
            .read_dir(Path::new("/root"))
            .unwrap()
            .into_iter()
            .map(|e| (e.name, e.is_dir))
            .collect();
        assert_eq!(
            names,
            vec![
                ("alpha".to_string(), true),
                ("beta".to_string(), true),
                ("zeta.txt".to_string(), false),
            ]
        );
    }

    #[test]
    fn rename_moves_whole_subtree() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/t/src/old/a.py", "a");
        fs.seed_file("/t/src/old/deep/b.py", "b");
        fs.seed_file("/t/src/keep.py", "k");

        fs.rename(Path::new("/t/src/old"), Path::new("/t/src/new"))
            .unwrap();

        assert!(fs.is_dir(Path::new("/t/src/new/deep")));
        assert!(!fs.is_dir(Path::new("/t/src/old")));
        assert_eq!(fs.read_file(Path::new("/t/src/new/deep/b.py")).as_deref(), Some("b"));
        assert_eq!(fs.read_file(Path::new("/t/src/keep.py")).as_deref(), Some("k"));
    }

    #[test]
    fn copy_dir_rejects_existing_target_and_keeps_exec_bits() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/from/run.sh", "#!/bin/sh");
        fs.set_executable(Path::new("/from/run.sh")).unwrap();
        fs.seed_dir("/out");

        fs.copy_dir(Path::new("/from"), Path::new("/out/to")).unwrap();
        assert!(fs.is_executable(Path::new("/out/to/run.sh")));

        let err = fs
            .copy_dir(Path::new("/from"), Path::new("/out/to"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppforgeError::Application(ApplicationError::DestinationExists { .. })
        ));
    }
}
