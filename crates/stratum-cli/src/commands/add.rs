//! `stratum add`: generate one component inside an existing project.

use std::path::Path;

use tracing::{info, instrument};

use stratum_core::application::{AddReport, RegistrationOutcome, ScaffoldService};
use stratum_core::domain::{ComponentKind, capabilities};

use crate::{
    cli::AddArgs,
    config::{AppConfig, OverwriteMode},
    error::CliResult,
    output::{OutputManager, report_json},
    policy,
};

#[instrument(skip_all, fields(kind = ?args.kind, name = %args.name))]
pub fn execute(args: AddArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let kind: ComponentKind = args.kind.into();
    let service = super::scaffold_service(&config)?;
    let mode = policy::resolve_mode(args.overwrite, config.defaults.overwrite);

    let spinner = if mode == OverwriteMode::Prompt {
        indicatif::ProgressBar::hidden()
    } else {
        output.spinner(&format!("Adding {kind} '{}'...", args.name))
    };
    let result = service.add_component(
        &args.project_dir,
        kind,
        &args.name,
        policy::policy_for(mode).as_ref(),
    );
    spinner.finish_and_clear();
    let report = result?;

    info!(component = %report.component, registration = ?report.registration, "add finished");

    output.success(&format!("Added {kind} '{}'", report.component))?;
    output.report(&report.materialized)?;
    describe_registration(&service, &args.project_dir, &report, &output)?;
    output.json(&serde_json::json!({
        "kind": kind.as_str(),
        "component": report.component.snake(),
        "files": report_json(&report.materialized),
        "registration": report.registration.map(|r| r.to_string()),
    }))?;

    Ok(())
}

fn describe_registration(
    service: &ScaffoldService,
    project_root: &Path,
    report: &AddReport,
    output: &OutputManager,
) -> CliResult<()> {
    let Some(outcome) = report.registration else {
        return Ok(());
    };

    match outcome {
        RegistrationOutcome::Registered => {
            output.info(&format!("Registered '{}' in the entry point", report.component))?
        }
        RegistrationOutcome::AlreadyRegistered => {
            output.info(&format!("'{}' was already registered", report.component))?
        }
        RegistrationOutcome::MissingEntryPoint | RegistrationOutcome::SentinelMissing => {
            output.warning(&format!(
                "Could not register '{}' automatically ({outcome})",
                report.component
            ))?;
            let project = service.load_config(project_root)?;
            if let Some(def) = capabilities::entry_point(project.framework, project.architecture) {
                let name = report.component.snake();
                output.print(&format!("  Add these lines to {}:", def.path))?;
                output.print(&format!("    {}", def.import_line(name)))?;
                output.print(&format!("    {}", def.register_line(name)))?;
            }
        }
    }
    Ok(())
}
