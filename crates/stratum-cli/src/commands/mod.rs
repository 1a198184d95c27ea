//! Command handlers.  Each translates parsed arguments into a core service
//! call and prints the outcome; no scaffolding logic lives here.

use stratum_adapters::{
    InMemoryStore, JsonConfigStore, LocalFilesystem, SimpleRenderer, resolve_override_dir,
};
use stratum_core::application::ScaffoldService;

use crate::config::AppConfig;
use crate::error::CliResult;

pub mod add;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;

/// Wire the production adapters into a [`ScaffoldService`].
pub fn scaffold_service(config: &AppConfig) -> CliResult<ScaffoldService> {
    let overrides = resolve_override_dir(config.templates.local_path.as_deref());
    let store = InMemoryStore::with_overrides(overrides.as_deref())?;

    Ok(ScaffoldService::new(
        Box::new(store),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(JsonConfigStore::new()),
    ))
}
