//! Implementation of the `appforge new` command.
//!
//! Responsibility: turn CLI arguments, configuration, and prompt answers into
//! an `AppDescriptor`, pick the adapters, call the core service, and display
//! results. No transformation logic lives here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use appforge_adapters::{
    GitCli, GitFetcher, GitIndexMarker, LocalFetcher, LocalFilesystem, PermissionBitMarker,
};
use appforge_core::{
    application::{CreateAppService, ExecutableMarker, TemplateFetcher},
    domain::{AppDescriptor, CreationReport, check_name, check_semantic_version, normalize_github_url},
};

use crate::{
    cli::{ExecMode, NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::Prompter,
};

/// Where the template is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateSource {
    Git(String),
    Local(PathBuf),
}

impl TemplateSource {
    /// An existing directory is a local template; anything else is cloned.
    fn resolve(raw: &str) -> Self {
        let path = Path::new(raw);
        if path.is_dir() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Git(raw.to_string())
        }
    }

    fn location(&self) -> String {
        match self {
            Self::Git(url) => url.clone(),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

/// JSON document printed with `--output-format json`.
#[derive(Debug, Serialize)]
struct CreationOutput<'a> {
    #[serde(flatten)]
    report: &'a CreationReport,
    template: String,
    exec_mode: &'static str,
    created_at: DateTime<Utc>,
}

/// Execute the `appforge new` command.
///
/// Dispatch sequence:
/// 1. Resolve the template source; check `git` up front when it is needed
/// 2. Collect missing values (flags, then prompts, then config defaults)
/// 3. Build and validate the descriptor
/// 4. Confirm with the user unless `--yes`
/// 5. Run `CreateAppService` behind a spinner
/// 6. Print the report
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Template source and tooling
    let raw_source = args
        .template
        .clone()
        .unwrap_or_else(|| config.template.url.clone());
    let source = TemplateSource::resolve(&raw_source);
    let git = match source {
        TemplateSource::Git(_) => Some(GitCli::locate()?),
        TemplateSource::Local(_) => None,
    };
    debug!(?source, "Template source resolved");

    // 2-3. Descriptor
    let prompter = Prompter::new(args.no_input)?;
    let destination = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| CliError::IoError {
                message: "failed to read the current directory".into(),
                source: e,
            })?,
    };
    let exec_mode = args.exec_mode.unwrap_or(config.behavior.exec_mode);
    let app = build_descriptor(&args, &config, &prompter, destination)?;

    // 4. Confirm
    if !args.yes && prompter.is_enabled() {
        show_summary(&app, &source, &output)?;
        if !prompter.confirm("Create the project?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 5. Adapters + service
    let fetcher: Box<dyn TemplateFetcher> = match (&source, &git) {
        (TemplateSource::Git(_), Some(git)) => Box::new(GitFetcher::new(git.clone())),
        _ => Box::new(LocalFetcher::new()),
    };
    let marker = select_marker(exec_mode, app.destination())?;
    let strategy = marker.strategy();
    let service = CreateAppService::new(
        config.template.clone().with_url(source.location()),
        fetcher,
        Box::new(LocalFilesystem::new()),
        marker,
    );

    info!(app = %app.name(), destination = %app.destination().display(), "Creating project");
    let spinner = output.spinner(&format!("Fetching template from {}", source.location()));
    let result = service.create(&app);
    spinner.finish_and_clear();
    let report = result?;
    info!(app = %report.app_name, "Project created");

    // 6. Report
    if output.format() == OutputFormat::Json {
        output.json(&CreationOutput {
            report: &report,
            template: source.location(),
            exec_mode: strategy,
            created_at: Utc::now(),
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created in {}",
        report.app_name,
        report.destination.display()
    ))?;
    if global.verbose > 0 {
        for script in &report.executables {
            output.info(&format!("{} marked executable ({strategy})", script.display()))?;
        }
    }
    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.destination.display()))?;
        output.print("  pip install -e .")?;
    }

    Ok(())
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// Prompt order: name, description, keywords, author, GitHub URL, version.
fn build_descriptor(
    args: &NewArgs,
    config: &AppConfig,
    prompter: &Prompter,
    destination: PathBuf,
) -> CliResult<AppDescriptor> {
    let name = prompter.value(args.name.clone(), "App name", "", Some(validate_name))?;
    let description = prompter.value(args.description.clone(), "App description", "", None)?;
    let keywords = prompter.value(
        args.keywords.clone(),
        "App keywords",
        &config.defaults.keywords,
        None,
    )?;
    let author = prompter.value(args.author.clone(), "App author", &config.defaults.author, None)?;
    let github_url = prompter.value(args.github_url.clone(), "GitHub URL", "", None)?;
    let version = prompter.value(
        args.version.clone(),
        "Version",
        &config.defaults.version,
        Some(validate_version),
    )?;

    let mut builder = AppDescriptor::builder()
        .description(description)
        .author(author)
        .keywords(keywords)
        .version(version)
        .github_url(normalize_github_url(&github_url))
        .destination(destination);
    if !name.trim().is_empty() {
        builder = builder.name(name);
    }
    builder.build().map_err(|e| CliError::Core(e.into()))
}

fn validate_name(answer: &str) -> Result<(), String> {
    if answer.trim().is_empty() {
        return Ok(());
    }
    check_name(&answer.trim().replace('-', "_")).map_err(|e| e.to_string())
}

fn validate_version(answer: &str) -> Result<(), String> {
    if answer.trim().is_empty() {
        return Ok(());
    }
    check_semantic_version(answer.trim()).map_err(|e| e.to_string())
}

// ── Executable marker ─────────────────────────────────────────────────────────

fn select_marker(mode: ExecMode, destination: &Path) -> CliResult<Box<dyn ExecutableMarker>> {
    let marker: Box<dyn ExecutableMarker> = match mode {
        ExecMode::Permission => Box::new(PermissionBitMarker::new(LocalFilesystem::new())),
        ExecMode::Index => Box::new(GitIndexMarker::new(GitCli::locate()?)),
        ExecMode::Auto => match GitCli::locate() {
            Ok(git) if git.is_inside_work_tree(destination) => Box::new(GitIndexMarker::new(git)),
            _ => Box::new(PermissionBitMarker::new(LocalFilesystem::new())),
        },
    };
    debug!(%mode, strategy = marker.strategy(), "Executable marker selected");
    Ok(marker)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_summary(app: &AppDescriptor, source: &TemplateSource, out: &OutputManager) -> CliResult<()> {
    out.header("Project")?;
    out.print(&format!("  Name:        {}", app.name()))?;
    out.print(&format!("  Package:     {}", app.package_name()))?;
    out.print(&format!("  Description: {}", app.description()))?;
    out.print(&format!("  Author:      {}", app.author()))?;
    out.print(&format!("  Keywords:    {}", app.keywords()))?;
    out.print(&format!("  Version:     {}", app.version()))?;
    out.print(&format!("  GitHub URL:  {}", app.github_url()))?;
    out.print(&format!("  Template:    {}", source.location()))?;
    out.print(&format!("  Location:    {}", app.destination().display()))?;
    out.print("")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
