//! Create-app service - the template transformer.
//!
//! This service coordinates the entire workflow:
//! 1. Validate the descriptor (nothing is touched on failure)
//! 2. Fetch the template into a scratch workspace
//! 3. Rename the placeholder directory to the package name
//! 4. Rewrite the manifest and the build descriptor
//! 5. Substitute the placeholder token across the known files
//! 6. Copy everything but `.git` into the destination and mark scripts
//!    executable
//!
//! There is no rollback: a failure in step 6 leaves the destination
//! partially written. The scratch workspace is always removed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, LineEditor, ScratchWorkspace,
        ports::{ExecutableMarker, Filesystem, TemplateFetcher},
    },
    domain::{
        AppDescriptor, CreationReport, DomainValidator, TemplateProfile, VCS_DIR,
        build_descriptor_rules, manifest_rules,
    },
    error::AppforgeResult,
};

/// Extension of the scripts marked executable during finalization.
const SCRIPT_EXTENSION: &str = "sh";

/// Main transformation service.
pub struct CreateAppService {
    profile: TemplateProfile,
    fetcher: Box<dyn TemplateFetcher>,
    filesystem: Box<dyn Filesystem>,
    marker: Box<dyn ExecutableMarker>,
}

impl CreateAppService {
    /// Create a new service with the given template profile and adapters.
    pub fn new(
        profile: TemplateProfile,
        fetcher: Box<dyn TemplateFetcher>,
        filesystem: Box<dyn Filesystem>,
        marker: Box<dyn ExecutableMarker>,
    ) -> Self {
        Self {
            profile,
            fetcher,
            filesystem,
            marker,
        }
    }

    /// Generate the application described by `app`.
    #[instrument(
        skip_all,
        fields(
            app = %app.name(),
            destination = %app.destination().display(),
        )
    )]
    pub fn create(&self, app: &AppDescriptor) -> AppforgeResult<CreationReport> {
        DomainValidator::validate_descriptor(app)?;

        let scratch = ScratchWorkspace::new()?;
        self.create_in(app, scratch.path())
    }

    /// Run every step after validation, using `scratch` as the clone root.
    fn create_in(&self, app: &AppDescriptor, scratch: &Path) -> AppforgeResult<CreationReport> {
        let package = app.package_name();

        info!(url = %self.profile.url, "Fetching template");
        self.fetcher.fetch(&self.profile.url, scratch)?;

        let renamed = self.rename_placeholder(scratch, &package)?;
        info!(from = %self.profile.placeholder_dir, to = %renamed.display(), "Placeholder directory renamed");

        let mut lines_rewritten = self.rewrite_manifests(scratch, app)?;
        lines_rewritten += self.substitute_tree(scratch, app)?;
        debug!(lines_rewritten, "Template transformed");

        let (copied, executables) = self.finalize(scratch, app.destination())?;
        info!(
            entries = copied.len(),
            scripts = executables.len(),
            strategy = self.marker.strategy(),
            "Project written"
        );

        Ok(CreationReport {
            app_name: app.name().to_string(),
            package_name: package,
            destination: app.destination().to_path_buf(),
            copied,
            executables,
            lines_rewritten,
        })
    }

    // -------------------------------------------------------------------------
    // Directory renamer
    // -------------------------------------------------------------------------

    /// Move the first directory named like the placeholder to a sibling named
    /// `package`. Fails when there is none.
    fn rename_placeholder(&self, root: &Path, package: &str) -> AppforgeResult<PathBuf> {
        let found = self
            .find_placeholder(root)?
            .ok_or_else(|| ApplicationError::PlaceholderNotFound {
                placeholder: self.profile.placeholder_dir.clone(),
                root: root.to_path_buf(),
            })?;

        let target = found.with_file_name(package);
        self.filesystem.rename(&found, &target)?;
        Ok(target)
    }

    /// Depth-first, checking a directory's children before descending.
    fn find_placeholder(&self, dir: &Path) -> AppforgeResult<Option<PathBuf>> {
        let subdirs: Vec<_> = self
            .filesystem
            .read_dir(dir)?
            .into_iter()
            .filter(|e| e.is_dir && e.name != VCS_DIR)
            .collect();

        if let Some(hit) = subdirs
            .iter()
            .find(|e| e.name == self.profile.placeholder_dir)
        {
            return Ok(Some(hit.path.clone()));
        }
        for sub in &subdirs {
            if let Some(hit) = self.find_placeholder(&sub.path)? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    // -------------------------------------------------------------------------
    // Manifest rewriters
    // -------------------------------------------------------------------------

    fn rewrite_manifests(&self, root: &Path, app: &AppDescriptor) -> AppforgeResult<usize> {
        let editor = LineEditor::new(self.filesystem.as_ref());

        let manifest = root.join(&self.profile.manifest);
        let mut changed = editor.rewrite_prefixed(&manifest, &manifest_rules(app), true)?;
        debug!(path = %manifest.display(), changed, "Manifest rewritten");

        let setup = root.join(&self.profile.build_descriptor);
        let setup_changed = editor.rewrite_prefixed(&setup, &build_descriptor_rules(app), false)?;
        debug!(path = %setup.display(), changed = setup_changed, "Build descriptor rewritten");

        changed += setup_changed;
        Ok(changed)
    }

    // -------------------------------------------------------------------------
    // Tree-wide substitution
    // -------------------------------------------------------------------------

    fn substitute_tree(&self, root: &Path, app: &AppDescriptor) -> AppforgeResult<usize> {
        let editor = LineEditor::new(self.filesystem.as_ref());
        let package = app.package_name();
        let token = self.profile.placeholder_token.as_str();
        let mut changed = 0;

        for file in self.source_files(&root.join(self.profile.package_dir(&package)))? {
            changed += editor.replace_in_file(&file, token, &package)?;
        }

        for rule in self.profile.fixed_rules(app) {
            changed += editor.replace_in_file(&root.join(&rule.file), &rule.find, &rule.replace)?;
        }

        for file in self.source_files(&root.join(&self.profile.tests_dir))? {
            changed += editor.replace_in_file(&file, token, &package)?;
        }

        Ok(changed)
    }

    /// Source files directly inside `dir` (not recursive).
    fn source_files(&self, dir: &Path) -> AppforgeResult<Vec<PathBuf>> {
        if !self.filesystem.is_dir(dir) {
            return Err(ApplicationError::MissingDirectory {
                path: dir.to_path_buf(),
            }
            .into());
        }
        Ok(self
            .filesystem
            .read_dir(dir)?
            .into_iter()
            .filter(|e| !e.is_dir && self.profile.is_source_file(&e.path))
            .map(|e| e.path)
            .collect())
    }

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Copy the transformed tree into `destination`, then mark scripts
    /// executable there. Returns the copied top-level names and the marked
    /// scripts, both relative to `destination`.
    fn finalize(
        &self,
        root: &Path,
        destination: &Path,
    ) -> AppforgeResult<(Vec<PathBuf>, Vec<PathBuf>)> {
        self.filesystem.create_dir_all(destination)?;

        let mut copied = Vec::new();
        for entry in self.filesystem.read_dir(root)? {
            if entry.name == VCS_DIR {
                continue;
            }
            let target = destination.join(&entry.name);
            if entry.is_dir {
                if self.filesystem.exists(&target) {
                    return Err(ApplicationError::DestinationExists { path: target }.into());
                }
                self.filesystem.copy_dir(&entry.path, &target)?;
            } else {
                self.filesystem.copy_file(&entry.path, &target)?;
            }
            copied.push(PathBuf::from(&entry.name));
        }

        let mut scripts = Vec::new();
        self.collect_scripts(root, root, &mut scripts)?;
        for script in &scripts {
            self.marker.mark_executable(&destination.join(script))?;
        }

        Ok((copied, scripts))
    }

    fn collect_scripts(
        &self,
        root: &Path,
        dir: &Path,
        out: &mut Vec<PathBuf>,
    ) -> AppforgeResult<()> {
        for entry in self.filesystem.read_dir(dir)? {
            if entry.is_dir {
                if entry.name != VCS_DIR {
                    self.collect_scripts(root, &entry.path, out)?;
                }
            } else if entry
                .path
                .extension()
                .is_some_and(|e| e == SCRIPT_EXTENSION)
            {
                let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
                out.push(relative.to_path_buf());
            }
        }
        Ok(())
    }
}
