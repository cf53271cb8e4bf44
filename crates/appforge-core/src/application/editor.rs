//! Line-oriented file editor on top of the [`Filesystem`] port.

use std::path::Path;

use tracing::trace;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        PrefixRule,
        text::{self, apply_prefix_rules, normalize_lines, split_lines},
    },
    error::AppforgeResult,
};

/// Reads, rewrites, and writes text files line by line.
#[derive(Clone, Copy)]
pub struct LineEditor<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> LineEditor<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Lines of `path` without their terminators.
    pub fn read_lines(&self, path: &Path) -> AppforgeResult<Vec<String>> {
        Ok(split_lines(&self.fs.read_to_string(path)?))
    }

    /// Write `lines` joined by `\n`, trailing whitespace trimmed, with one
    /// final newline when non-empty.
    pub fn write_lines(&self, path: &Path, lines: &[String]) -> AppforgeResult<()> {
        self.fs.write_file(path, &normalize_lines(lines))
    }

    /// Write `lines` joined by `\n` exactly, without normalization.
    pub fn write_joined(&self, path: &Path, lines: &[String]) -> AppforgeResult<()> {
        self.fs.write_file(path, &lines.join("\n"))
    }

    /// Replace every occurrence of `old` with `new` in `path`.
    ///
    /// The file must exist. Returns the number of lines changed.
    pub fn replace_in_file(&self, path: &Path, old: &str, new: &str) -> AppforgeResult<usize> {
        self.require_file(path)?;
        let mut lines = self.read_lines(path)?;
        let changed = text::replace_in_lines(&mut lines, old, new);
        self.write_lines(path, &lines)?;
        trace!(path = %path.display(), changed, "replaced '{old}'");
        Ok(changed)
    }

    /// Apply column-zero prefix rules to `path`, optionally collapsing blank
    /// runs, and write the result back with [`Self::write_joined`].
    pub fn rewrite_prefixed(
        &self,
        path: &Path,
        rules: &[PrefixRule],
        collapse_blank_runs: bool,
    ) -> AppforgeResult<usize> {
        self.require_file(path)?;
        let mut lines = self.read_lines(path)?;
        let changed = apply_prefix_rules(&mut lines, rules);
        if collapse_blank_runs {
            lines = text::remove_double_blank_lines(lines);
        }
        self.write_joined(path, &lines)?;
        Ok(changed)
    }

    fn require_file(&self, path: &Path) -> AppforgeResult<()> {
        if self.fs.is_file(path) {
            Ok(())
        } else {
            Err(ApplicationError::MissingFile {
                path: path.to_path_buf(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockFilesystem;

    #[test]
    fn replace_writes_back_normalized_text() {
        let path = PathBuf::from("/t/a.py");
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("foo_project x\nno match\nfoo_project foo_project\n\n".into()));
        fs.expect_write_file()
            .withf(|p, content| {
                p == Path::new("/t/a.py") && content == "myapp x\nno match\nmyapp myapp\n"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let changed = LineEditor::new(&fs)
            .replace_in_file(&path, "foo_project", "myapp")
            .unwrap();
        assert_eq!(changed, 2);
    }

    #[test]
    fn replace_on_missing_file_is_precondition_failure() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(false);
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let err = LineEditor::new(&fs)
            .replace_in_file(Path::new("/t/gone.py"), "a", "b")
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppforgeError::Application(ApplicationError::MissingFile { .. })
        ));
    }

    #[test]
    fn prefix_rewrite_collapses_and_joins_without_trailing_newline() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .returning(|_| Ok("name = \"x\"\n\n\n\nversion = \"0.1\"\n".into()));
        fs.expect_write_file()
            .withf(|_, content| content == "name = \"app\"\n\nversion = \"0.1\"")
            .times(1)
            .returning(|_, _| Ok(()));

        let rules = [PrefixRule::new("name =", "name = \"app\"")];
        let changed = LineEditor::new(&fs)
            .rewrite_prefixed(Path::new("/t/pyproject.toml"), &rules, true)
            .unwrap();
        assert_eq!(changed, 1);
    }
}
