//! Incremental Registrar - wires a new endpoint into the entry point.

use std::fmt;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::application::ports::Filesystem;
use crate::domain::capabilities;
use crate::domain::{ComponentName, EntryPointDocument, Insertion, ProjectConfig};
use crate::error::StratumResult;

/// Result of a registration attempt. Only I/O failures are errors; every
/// outcome here leaves the generated component files in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
    /// The project layout has no entry point, or the file was deleted.
    MissingEntryPoint,
    /// The entry point exists but its insertion sentinel was removed.
    SentinelMissing,
}

impl RegistrationOutcome {
    /// Outcomes the user has to act on by hand.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Self::MissingEntryPoint | Self::SentinelMissing)
    }
}

impl fmt::Display for RegistrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registered => "registered",
            Self::AlreadyRegistered => "already registered",
            Self::MissingEntryPoint => "entry point missing",
            Self::SentinelMissing => "registration sentinel missing",
        })
    }
}

pub struct Registrar<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> Registrar<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Splice the registration block for `component` into the project's entry
    /// point. Repeated calls for the same component leave the file unchanged.
    #[instrument(skip_all, fields(component = %component))]
    pub fn register(
        &self,
        project_root: &Path,
        config: &ProjectConfig,
        component: &ComponentName,
    ) -> StratumResult<RegistrationOutcome> {
        let Some(def) = capabilities::entry_point(config.framework, config.architecture) else {
            warn!(architecture = %config.architecture, "layout has no entry point");
            return Ok(RegistrationOutcome::MissingEntryPoint);
        };

        let path = project_root.join(def.path);
        if !self.filesystem.exists(&path) {
            warn!(path = %path.display(), "entry point not found");
            return Ok(RegistrationOutcome::MissingEntryPoint);
        }

        let text = self.filesystem.read_file(&path)?;
        let mut doc = EntryPointDocument::parse(def, &text);

        let outcome = match doc.insert(component.snake()) {
            Insertion::Inserted => {
                self.filesystem.write_file(&path, &doc.render())?;
                info!(entry_point = def.path, "component registered");
                RegistrationOutcome::Registered
            }
            Insertion::AlreadyPresent => RegistrationOutcome::AlreadyRegistered,
            Insertion::SentinelMissing => {
                warn!(entry_point = def.path, "sentinel removed; not registering");
                RegistrationOutcome::SentinelMissing
            }
        };
        Ok(outcome)
    }
}
