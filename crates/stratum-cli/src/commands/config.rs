//! `stratum config`: inspect and initialise the tool configuration.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` override; `path` and `init` act on it
/// instead of the platform default when given.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = config_file.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
            output.json(&serde_json::json!({ "key": key, "value": value }))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
            output.json(&serde_json::to_value(&config).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?)?;
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
            output.json(&serde_json::json!({ "path": path.display().to_string() }))?;
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {}  (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }

            let toml = AppConfig::default().to_toml()?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_cli_context(|| {
                    format!("Failed to create config directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&path, &toml)
                .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let d = &config.defaults;
    match key {
        "defaults.framework" => Ok(d.framework.as_str().to_owned()),
        "defaults.architecture" => Ok(d.architecture.as_str().to_owned()),
        "defaults.database" => Ok(d.database.as_str().to_owned()),
        "defaults.features" => Ok(d
            .features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")),
        "defaults.overwrite" => Ok(d.overwrite.as_str().to_owned()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(format!("{:?}", config.output.format).to_ascii_lowercase()),
        "templates.local_path" => Ok(config
            .templates
            .local_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
