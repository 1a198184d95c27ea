//! `stratum.json` persistence.
//!
//! Pretty JSON with four-space indentation, written atomically. Loading is
//! all-or-nothing: an absent, unreadable or mistyped file is
//! `ApplicationError::ConfigNotFound`, and nothing partial is returned.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, instrument};

use stratum_core::{
    application::{ApplicationError, ports::ConfigStore},
    domain::ProjectConfig,
    error::StratumResult,
};

use crate::filesystem::{map_io_error, write_atomic};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigStore;

impl JsonConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `config` the way it is written to disk.
    pub fn to_json(config: &ProjectConfig) -> StratumResult<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        config
            .serialize(&mut ser)
            .map_err(|e| ApplicationError::SerializationFailed {
                reason: e.to_string(),
            })?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| {
            ApplicationError::SerializationFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl ConfigStore for JsonConfigStore {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn load(&self, path: &Path) -> StratumResult<ProjectConfig> {
        let not_found = |reason: String| ApplicationError::ConfigNotFound {
            path: path.to_path_buf(),
            reason,
        };

        let raw = fs::read_to_string(path).map_err(|e| not_found(e.to_string()))?;
        let config: ProjectConfig =
            serde_json::from_str(&raw).map_err(|e| not_found(e.to_string()))?;

        debug!(project = %config.name, "configuration loaded");
        Ok(config)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn save(&self, path: &Path, config: &ProjectConfig) -> StratumResult<()> {
        let json = Self::to_json(config)?;
        write_atomic(path, &json).map_err(|e| map_io_error(path, e, "write configuration"))?;
        debug!(project = %config.name, "configuration saved");
        Ok(())
    }
}
