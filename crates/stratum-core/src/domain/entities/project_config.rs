//! The persisted project configuration.
//!
//! `ProjectConfig` is written to `stratum.json` at the project root by `init`
//! and reloaded by every later command. It is the single source of truth for
//! what the project was generated with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::capabilities;
use crate::domain::value_objects::{Architecture, Database, Feature, Framework};
use crate::domain::DomainError;

/// File name of the persisted configuration, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "stratum.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub framework: Framework,
    pub architecture: Architecture,
    pub database: Database,
    #[serde(default)]
    pub features: BTreeSet<Feature>,
}

impl ProjectConfig {
    pub fn builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::default()
    }

    /// Directory and package name: lowercase, spaces and hyphens become `_`.
    pub fn slug(&self) -> String {
        self.name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Check the name and that every feature is legal for the architecture.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.name.trim();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: self.name.clone(),
            reason: reason.to_owned(),
        };

        if !name.chars().any(char::is_alphanumeric) {
            return Err(invalid("must contain at least one letter or digit"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("must not contain path separators"));
        }

        if let Some(feature) = self
            .features
            .iter()
            .find(|f| !capabilities::feature_allowed(self.architecture, **f))
        {
            return Err(DomainError::FeatureNotAllowed {
                feature: feature.label().to_owned(),
                architecture: self.architecture.label().to_owned(),
            });
        }

        Ok(())
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Fluent builder. Unset choices fall back to Flask, Clean Architecture and
/// no database; `build` validates.
#[derive(Debug, Default)]
pub struct ProjectConfigBuilder {
    name: Option<String>,
    framework: Option<Framework>,
    architecture: Option<Architecture>,
    database: Option<Database>,
    features: BTreeSet<Feature>,
}

impl ProjectConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let config = ProjectConfig {
            name: self.name.unwrap_or_default(),
            framework: self.framework.unwrap_or(Framework::Flask),
            architecture: self.architecture.unwrap_or(Architecture::Clean),
            database: self.database.unwrap_or(Database::None),
            features: self.features,
        };
        config.validate()?;
        Ok(config)
    }
}
