//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`TemplateProfile`] extracted from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `APPFORGE__<SECTION>__<KEY>`
//! 3. Config file (`--config`, or [`AppConfig::config_path`] when present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use appforge_core::domain::{DEFAULT_VERSION, TemplateProfile};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::ExecMode;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "APPFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Runtime behaviour.
    pub behavior: BehaviorConfig,
    /// Where the template comes from and how it is laid out.
    pub template: TemplateProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
    pub version: String,
    pub keywords: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: String::new(),
            version: DEFAULT_VERSION.into(),
            keywords: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub exec_mode: ExecMode,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path.as_path()).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path().as_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to read configuration")?;

        let cfg: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        debug!(template = %cfg.template.url, exec_mode = %cfg.behavior.exec_mode, "Configuration loaded");
        Ok(cfg)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.appforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "appforge", "appforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".appforge.toml"))
    }

    /// The file `load` reads: `explicit` if given, else [`Self::config_path`].
    pub fn active_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_core::domain::profile::DEFAULT_TEMPLATE_URL;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_target_the_fastapi_template() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.template.url, DEFAULT_TEMPLATE_URL);
        assert_eq!(cfg.defaults.version, "1.0.0");
        assert_eq!(cfg.behavior.exec_mode, ExecMode::Auto);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("appforge.toml");
        fs::write(
            &path,
            "[defaults]\nauthor = \"Jane Doe\"\n\n[behavior]\nexec_mode = \"permission\"\n\n\
             [template]\nplaceholder_dir = \"my_template\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.author, "Jane Doe");
        assert_eq!(cfg.behavior.exec_mode, ExecMode::Permission);
        assert_eq!(cfg.template.placeholder_dir, "my_template");
        // untouched fields keep their defaults
        assert_eq!(cfg.template.manifest, PathBuf::from("pyproject.toml"));
        assert_eq!(cfg.defaults.version, "1.0.0");
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.template, TemplateProfile::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
