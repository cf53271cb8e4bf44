//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "appforge",
    bin_name = "appforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Turn a template repository into a named project",
    long_about = "Appforge clones a template repository, renames its placeholder \
                  package, rewrites the project metadata, and writes the result \
                  into your project directory.",
    after_help = "EXAMPLES:\n\
        \x20 appforge new myapp --author \"Jane Doe\" --github-url https://github.com/jane/myapp\n\
        \x20 appforge new --template ./my-template --output ./out --no-input\n\
        \x20 appforge init\n\
        \x20 appforge completions bash > /usr/share/bash-completion/completions/appforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the template.
    #[command(
        visible_alias = "n",
        about = "Create a new project from the template",
        after_help = "EXAMPLES:\n\
            \x20 appforge new myapp\n\
            \x20 appforge new --github-url https://github.com/jane/my-service --yes\n\
            \x20 appforge new myapp --template ../template-fastapi-project --exec-mode permission"
    )]
    New(NewArgs),

    /// Initialise an Appforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 appforge init          # default location\n\
            \x20 appforge init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 appforge completions bash > ~/.local/share/bash-completion/completions/appforge\n\
            \x20 appforge completions zsh  > ~/.zfunc/_appforge\n\
            \x20 appforge completions fish > ~/.config/fish/completions/appforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Appforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 appforge config get template.url\n\
            \x20 appforge config list\n\
            \x20 appforge config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `appforge new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Application name. Derived from `--github-url` or the output
    /// directory when omitted.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: Option<String>,

    #[arg(short = 'd', long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author / maintainer")]
    pub author: Option<String>,

    #[arg(short = 'k', long = "keywords", value_name = "WORDS", help = "Space separated keywords")]
    pub keywords: Option<String>,

    /// Semantic version written to the manifest (default 1.0.0).
    #[arg(long = "version", value_name = "X.Y.Z", help = "Initial project version")]
    pub version: Option<String>,

    /// Repository URL of the new project; a trailing `/` or `.git` is stripped.
    #[arg(short = 'g', long = "github-url", value_name = "URL", help = "GitHub URL of the new project")]
    pub github_url: Option<String>,

    /// Directory the project is written into.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Template to start from: a git URL or a local directory.
    #[arg(
        short = 't',
        long = "template",
        value_name = "URL|PATH",
        help = "Template repository URL or local directory"
    )]
    pub template: Option<String>,

    /// How shell scripts are made executable.
    #[arg(long = "exec-mode", value_enum, value_name = "MODE", help = "How scripts are marked executable")]
    pub exec_mode: Option<ExecMode>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Never prompt; missing values stay empty.
    #[arg(long = "no-input", help = "Do not prompt for missing values")]
    pub no_input: bool,
}

/// Strategy for the final mark-executable step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecMode {
    /// Git index when the output is inside a work tree, file mode otherwise.
    #[default]
    Auto,
    /// `git update-index --chmod=+x`.
    Index,
    /// `chmod +x` on the file.
    Permission,
}

impl std::fmt::Display for ExecMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Index => write!(f, "index"),
            Self::Permission => write!(f, "permission"),
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `appforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `appforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `appforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
