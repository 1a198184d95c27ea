//! `stratum gen`: Docker or CI files for an existing project.

use tracing::{info, instrument};

use stratum_core::domain::Artifact;

use crate::{
    cli::GenArgs,
    config::{AppConfig, OverwriteMode},
    error::CliResult,
    output::{OutputManager, report_json},
    policy,
};

#[instrument(skip_all, fields(artifact = ?args.artifact))]
pub fn execute(args: GenArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let artifact: Artifact = args.artifact.into();
    let service = super::scaffold_service(&config)?;
    let mode = policy::resolve_mode(args.overwrite, config.defaults.overwrite);

    let spinner = if mode == OverwriteMode::Prompt {
        indicatif::ProgressBar::hidden()
    } else {
        output.spinner(&format!("Generating {artifact} files..."))
    };
    let result =
        service.generate_artifact(&args.project_dir, artifact, policy::policy_for(mode).as_ref());
    spinner.finish_and_clear();
    let report = result?;

    info!(written = report.written.len(), declined = report.declined.len(), "gen finished");

    if report.written.is_empty() {
        output.info(&format!("No {artifact} files written"))?;
    } else {
        output.success(&format!("Generated {artifact} files"))?;
    }
    output.report(&report)?;
    output.json(&serde_json::json!({
        "artifact": artifact.as_str(),
        "files": report_json(&report),
    }))?;

    Ok(())
}
