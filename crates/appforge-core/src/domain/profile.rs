//! Template profile: where the template lives and what it looks like inside.
//!
//! The defaults describe the FastAPI template the tool was built for. Every
//! field can be overridden from configuration, which is also how tests point
//! the transformer at fixture templates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{descriptor::AppDescriptor, rules::ReplacementRule};

pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/zackees/template-fastapi-project";
pub const DEFAULT_PLACEHOLDER: &str = "fastapi_template_project";
pub const DEFAULT_README_TAGLINE: &str =
    "Example FastAPI Project with Docker, ready for Render.com / DigitalOcean";
pub const DEFAULT_README_TAGLINE_SUFFIX: &str = " with Docker, ready for Render.com / DigitalOcean";

/// Version-control metadata directory; never renamed into, copied, or walked.
pub const VCS_DIR: &str = ".git";

/// Extra token in one source file that is replaced by the package name.
///
/// `file` is relative to the renamed package directory (`src/<pkg>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRule {
    pub file: PathBuf,
    pub token: String,
}

/// Shape of the template repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateProfile {
    /// Repository URL (or local directory) to fetch.
    pub url: String,
    /// Directory name renamed to the package name.
    pub placeholder_dir: String,
    /// Token replaced by the package name inside files.
    pub placeholder_token: String,
    pub manifest: PathBuf,
    pub build_descriptor: PathBuf,
    pub readme: PathBuf,
    pub dev_script: PathBuf,
    pub entry_point: PathBuf,
    pub source_root: PathBuf,
    pub tests_dir: PathBuf,
    /// Extension (without dot) of the source files rewritten in bulk.
    pub source_extension: String,
    /// Marketing sentence in the README.
    pub readme_tagline: String,
    /// Appended to the package name to replace [`Self::readme_tagline`].
    pub readme_tagline_suffix: String,
    pub token_rules: Vec<TokenRule>,
}

impl Default for TemplateProfile {
    fn default() -> Self {
        Self {
            url: DEFAULT_TEMPLATE_URL.into(),
            placeholder_dir: DEFAULT_PLACEHOLDER.into(),
            placeholder_token: DEFAULT_PLACEHOLDER.into(),
            manifest: "pyproject.toml".into(),
            build_descriptor: "setup.py".into(),
            readme: "README.md".into(),
            dev_script: "run_dev.py".into(),
            entry_point: "entry_point.sh".into(),
            source_root: "src".into(),
            tests_dir: "tests".into(),
            source_extension: "py".into(),
            readme_tagline: DEFAULT_README_TAGLINE.into(),
            readme_tagline_suffix: DEFAULT_README_TAGLINE_SUFFIX.into(),
            token_rules: vec![
                TokenRule {
                    file: "app.py".into(),
                    token: "template_fastapi_project".into(),
                },
                TokenRule {
                    file: "app.py".into(),
                    token: "FastAPI Template Project".into(),
                },
            ],
        }
    }
}

impl TemplateProfile {
    /// Same profile, different source.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// `src/<pkg>` relative to the clone root.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.source_root.join(package)
    }

    /// Whether `path` has the bulk-rewritten source extension.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.source_extension)
    }

    /// Per-file rules applied after the package directory's bulk pass and
    /// before the test directory's: token rules, dev script, entry point,
    /// README placeholder, README tagline.
    pub fn fixed_rules(&self, app: &AppDescriptor) -> Vec<ReplacementRule> {
        let package = app.package_name();
        let package_dir = self.package_dir(&package);
        let token = self.placeholder_token.as_str();

        let mut rules: Vec<ReplacementRule> = self
            .token_rules
            .iter()
            .map(|r| ReplacementRule::new(package_dir.join(&r.file), r.token.clone(), package.clone()))
            .collect();

        rules.extend([
            ReplacementRule::new(&self.dev_script, token, package.clone()),
            ReplacementRule::new(&self.entry_point, token, package.clone()),
            ReplacementRule::new(&self.readme, token, package.clone()),
            ReplacementRule::new(
                &self.readme,
                self.readme_tagline.clone(),
                format!("{package}{}", self.readme_tagline_suffix),
            ),
        ]);
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppDescriptor {
        AppDescriptor::builder()
            .name("my-app")
            .destination("/tmp/out")
            .build()
            .unwrap()
    }

    #[test]
    fn default_profile_targets_fastapi_template() {
        let profile = TemplateProfile::default();
        assert_eq!(profile.url, DEFAULT_TEMPLATE_URL);
        assert_eq!(profile.placeholder_dir, "fastapi_template_project");
        assert_eq!(profile.package_dir("my_app"), PathBuf::from("src/my_app"));
    }

    #[test]
    fn fixed_rules_use_package_name() {
        let rules = TemplateProfile::default().fixed_rules(&app());
        assert!(rules.iter().all(|r| r.replace.starts_with("my_app")));
        assert!(
            rules
                .iter()
                .any(|r| r.file == PathBuf::from("src/my_app/app.py"))
        );
        let tagline = rules.last().unwrap();
        assert_eq!(tagline.file, PathBuf::from("README.md"));
        assert_eq!(
            tagline.replace,
            "my_app with Docker, ready for Render.com / DigitalOcean"
        );
    }

    #[test]
    fn source_extension_match() {
        let profile = TemplateProfile::default();
        assert!(profile.is_source_file(Path::new("x/__init__.py")));
        assert!(!profile.is_source_file(Path::new("x/README.md")));
        assert!(!profile.is_source_file(Path::new("x/py")));
    }

    #[test]
    fn partial_profile_deserializes_with_defaults() {
        let profile: TemplateProfile =
            serde_json::from_str(r#"{ "placeholder_dir": "demo_pkg" }"#).unwrap();
        assert_eq!(profile.placeholder_dir, "demo_pkg");
        assert_eq!(profile.manifest, PathBuf::from("pyproject.toml"));
    }
}
