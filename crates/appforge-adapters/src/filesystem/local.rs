//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::Path;

use appforge_core::{
    application::{ApplicationError, DirEntry, Filesystem},
    error::{AppforgeError, AppforgeResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> AppforgeResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, &e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> AppforgeResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, &e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> AppforgeResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, &e, "create directory"))
    }

    fn read_dir(&self, path: &Path) -> AppforgeResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io_error(path, &e, "read directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, &e, "read directory"))?;
            // Symlinked directories count as files so walks cannot loop.
            let file_type = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), &e, "read file type"))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
                path: entry.path(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn rename(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        fs::rename(from, to).map_err(|e| map_io_error(from, &e, "rename"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(to, &e, "copy file"))
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> AppforgeResult<()> {
        if to.exists() {
            return Err(ApplicationError::DestinationExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        copy_tree(from, to)
    }

    fn set_executable(&self, path: &Path) -> AppforgeResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(path).map_err(|e| map_io_error(path, &e, "get metadata"))?;
            let mut perms = metadata.permissions();
            perms.set_mode(perms.mode() | 0o111);
            fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, &e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = path;
        }
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Recursively copy the contents of `from` into `to`, creating `to` if
/// needed and overwriting files that already exist. Symlinks are followed.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> AppforgeResult<()> {
    for entry in WalkDir::new(from).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(from).to_path_buf();
            AppforgeError::from(ApplicationError::Filesystem {
                path,
                operation: "walk directory",
                reason: e.to_string(),
            })
        })?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| map_io_error(&target, &e, "create directory"))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| map_io_error(&target, &e, "copy file"))?;
        }
    }
    Ok(())
}

fn map_io_error(path: &Path, e: &io::Error, operation: &'static str) -> AppforgeError {
    ApplicationError::io(path, operation, e).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_is_sorted_and_typed() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("b_dir")).unwrap();
        fs::write(temp.path().join("a.txt"), "x").unwrap();
        fs::write(temp.path().join("c.txt"), "y").unwrap();

        let entries = LocalFilesystem.read_dir(temp.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b_dir", "c.txt"]);
        assert!(entries[1].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[test]
    fn copy_dir_copies_nested_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("pkg/inner")).unwrap();
        fs::write(src.join("pkg/inner/mod.py"), "x = 1\n").unwrap();

        let dst = temp.path().join("out/src");
        fs::create_dir_all(temp.path().join("out")).unwrap();
        LocalFilesystem.copy_dir(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("pkg/inner/mod.py")).unwrap(),
            "x = 1\n"
        );
    }

    #[test]
    fn copy_dir_refuses_existing_target() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a");
        let dst = temp.path().join("b");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();

        let err = LocalFilesystem.copy_dir(&src, &dst).unwrap_err();
        assert!(matches!(
            err,
            AppforgeError::Application(ApplicationError::DestinationExists { .. })
        ));
    }

    #[test]
    fn missing_file_read_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_to_string(&temp.path().join("nope.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            AppforgeError::Application(ApplicationError::Filesystem { operation: "read file", .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn read_dir_does_not_follow_directory_symlinks() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        std::os::unix::fs::symlink(&pkg, pkg.join("loop")).unwrap();

        let entries = LocalFilesystem.read_dir(&pkg).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "loop");
        assert!(!entries[0].is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn set_executable_adds_exec_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();

        LocalFilesystem.set_executable(&script).unwrap();
        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
