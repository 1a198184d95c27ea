//! `stratum init`: create a new project.
//!
//! Values come from flags first, then prompts, then the tool configuration.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use stratum_core::domain::{Feature, ProjectConfig, capabilities};
use stratum_core::error::StratumError;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, Defaults, OverwriteMode},
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, report_json},
    policy,
    prompt::{Prompter, terminal_prompter},
};

/// Execute `stratum init`.
///
/// 1. Resolve the configuration (flags, prompts, defaults)
/// 2. Confirm with the user when prompting
/// 3. Refuse early if a template is missing
/// 4. Materialize the plan under `./<slug>` and persist `stratum.json`
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let prompter = terminal_prompter(!args.yes && !global.quiet);
    let project = resolve_project(&args, &config.defaults, prompter.as_deref())?;

    let cwd = std::env::current_dir().with_cli_context(|| "reading the current directory")?;
    let root = cwd.join(project.slug());

    debug!(
        framework = %project.framework,
        architecture = %project.architecture,
        database = %project.database,
        root = %root.display(),
        "project resolved"
    );

    if let Some(p) = prompter.as_deref() {
        show_configuration(&project, &root, &output)?;
        if !p.confirm("Generate this project?")? {
            return Err(CliError::Cancelled);
        }
    }

    let service = super::scaffold_service(&config)?;
    if let Some(key) = service.missing_templates(&project)?.into_iter().next() {
        return Err(StratumError::from(
            stratum_core::application::ApplicationError::TemplateNotFound {
                key: key.to_string(),
            },
        )
        .into());
    }

    let mode = policy::resolve_mode(args.overwrite, config.defaults.overwrite);
    if root.exists() {
        warn!(root = %root.display(), mode = mode.as_str(), "target directory exists");
        output.warning(&format!(
            "{} already exists; existing files follow the '{}' overwrite mode",
            root.display(),
            mode.as_str()
        ))?;
    }

    let spinner = if mode == OverwriteMode::Prompt {
        indicatif::ProgressBar::hidden()
    } else {
        output.spinner(&format!("Creating '{}'...", project.name))
    };
    let result = service.init_project(&root, &project, policy::policy_for(mode).as_ref());
    spinner.finish_and_clear();
    let report = result?;

    info!(written = report.written.len(), declined = report.declined.len(), "project created");

    output.success(&format!(
        "Project '{}' created at {}",
        project.name,
        root.display()
    ))?;
    output.report(&report)?;
    output.json(&serde_json::json!({
        "project": project.name,
        "root": root.display().to_string(),
        "config": project,
        "files": report_json(&report),
    }))?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", project.slug()))?;
    if capabilities::entry_point(project.framework, project.architecture).is_some() {
        output.print("  stratum add resource items")?;
    }

    Ok(())
}

/// Merge flags, answers and defaults into a validated configuration.
///
/// Explicit `--feature` flags are validated strictly.  Configured default
/// features that the chosen architecture does not allow are dropped.
pub fn resolve_project(
    args: &InitArgs,
    defaults: &Defaults,
    prompter: Option<&dyn Prompter>,
) -> CliResult<ProjectConfig> {
    let name = match (&args.name, prompter) {
        (Some(name), _) => name.clone(),
        (None, Some(p)) => p.project_name()?,
        (None, None) => {
            return Err(CliError::invalid_input(
                "a project name is required; pass --name when not running interactively",
            ));
        }
    };

    let framework = match (args.framework, prompter) {
        (Some(fw), _) => fw.into(),
        (None, Some(p)) => p.framework(defaults.framework)?,
        (None, None) => defaults.framework,
    };
    let architecture = match (args.architecture, prompter) {
        (Some(arch), _) => arch.into(),
        (None, Some(p)) => p.architecture(defaults.architecture)?,
        (None, None) => defaults.architecture,
    };
    let database = match (args.database, prompter) {
        (Some(db), _) => db.into(),
        (None, Some(p)) => p.database(defaults.database)?,
        (None, None) => defaults.database,
    };

    let features: Vec<Feature> = if !args.features.is_empty() {
        args.features.iter().map(|f| (*f).into()).collect()
    } else {
        let allowed = capabilities::allowed_features(architecture);
        let preselected: Vec<Feature> = defaults
            .features
            .iter()
            .copied()
            .filter(|f| {
                let legal = allowed.contains(f);
                if !legal {
                    warn!(feature = %f, %architecture, "default feature not allowed; dropped");
                }
                legal
            })
            .collect();
        match prompter {
            Some(p) if !allowed.is_empty() => p.features(allowed, &preselected)?,
            _ => preselected,
        }
    };

    ProjectConfig::builder()
        .name(name)
        .framework(framework)
        .architecture(architecture)
        .database(database)
        .features(features)
        .build()
        .map_err(|e| CliError::Core(e.into()))
}

fn show_configuration(project: &ProjectConfig, root: &Path, out: &OutputManager) -> CliResult<()> {
    let features: Vec<&str> = project.features.iter().map(Feature::label).collect();
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", project.name))?;
    out.print(&format!("  Framework:    {}", project.framework))?;
    out.print(&format!("  Architecture: {}", project.architecture))?;
    out.print(&format!("  Database:     {}", project.database))?;
    out.print(&format!(
        "  Features:     {}",
        if features.is_empty() {
            "none".to_owned()
        } else {
            features.join(", ")
        }
    ))?;
    out.print(&format!("  Location:     {}", display_path(root).display()))?;
    out.print("")?;
    Ok(())
}

fn display_path(root: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| root.strip_prefix(cwd).ok().map(|p| Path::new(".").join(p)))
        .unwrap_or_else(|| root.to_path_buf())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
