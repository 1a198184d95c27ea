//! Scaffold Service - main application orchestrator.
//!
//! Control flow for the three mutating commands:
//! - `init`: validate → plan project → materialize → persist config
//! - `add`: load config → normalize name → check matrix → plan →
//!   materialize → register endpoint
//! - `gen`: load config → plan artifact → materialize
//!
//! Every guard (config load, name, matrix, validation) runs before the first
//! filesystem write.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::ports::{
    ConfigStore, Filesystem, OverwritePolicy, TemplateRenderer, TemplateStore,
};
use crate::application::services::materializer::{MaterializeReport, Materializer};
use crate::application::services::registrar::{Registrar, RegistrationOutcome};
use crate::domain::{
    AssemblyPlan, AssemblyPlanner, Artifact, CONFIG_FILE_NAME, ComponentKind, ComponentName,
    ProjectConfig, TemplateKey,
};
use crate::error::StratumResult;

/// Result of `add`.
#[derive(Debug, Clone)]
pub struct AddReport {
    pub component: ComponentName,
    pub materialized: MaterializeReport,
    /// `None` for components that expose no endpoint.
    pub registration: Option<RegistrationOutcome>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    configs: Box<dyn ConfigStore>,
}

impl ScaffoldService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        configs: Box<dyn ConfigStore>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            configs,
        }
    }

    /// Path of the persisted configuration under `project_root`.
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Load the persisted configuration. A hand-edited file whose features
    /// break the architecture's rules is refused before anything is planned.
    pub fn load_config(&self, project_root: &Path) -> StratumResult<ProjectConfig> {
        let config = self.configs.load(&Self::config_path(project_root))?;
        config.validate()?;
        Ok(config)
    }

    /// Plan without executing.
    pub fn plan_project(&self, config: &ProjectConfig) -> StratumResult<AssemblyPlan> {
        Ok(AssemblyPlanner::new(config).project_plan()?)
    }

    /// Template keys a plan for `config` needs that the store cannot serve.
    pub fn missing_templates(&self, config: &ProjectConfig) -> StratumResult<Vec<TemplateKey>> {
        let plan = self.plan_project(config)?;
        let mut missing: Vec<TemplateKey> = plan
            .files()
            .map(|(key, _)| key)
            .filter(|key| !self.store.contains(key))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        Ok(missing)
    }

    /// Generate a new project under `project_root` and persist its config.
    #[instrument(
        skip_all,
        fields(
            project = %config.name,
            framework = %config.framework,
            architecture = %config.architecture,
            root = %project_root.display()
        )
    )]
    pub fn init_project(
        &self,
        project_root: &Path,
        config: &ProjectConfig,
        policy: &dyn OverwritePolicy,
    ) -> StratumResult<MaterializeReport> {
        let plan = self.plan_project(config)?;
        info!(actions = plan.len(), "initializing project");

        let report = self.materializer().execute(project_root, &plan, policy)?;
        self.configs.save(&Self::config_path(project_root), config)?;

        info!("project initialized");
        Ok(report)
    }

    /// Add one component (or a whole resource) to an existing project.
    #[instrument(skip_all, fields(kind = %kind, name = raw_name, root = %project_root.display()))]
    pub fn add_component(
        &self,
        project_root: &Path,
        kind: ComponentKind,
        raw_name: &str,
        policy: &dyn OverwritePolicy,
    ) -> StratumResult<AddReport> {
        let config = self.load_config(project_root)?;
        let component = ComponentName::parse(raw_name)?;
        let plan = AssemblyPlanner::new(&config).component_plan(kind, &component)?;

        let materialized = self.materializer().execute(project_root, &plan, policy)?;

        let registration = if kind.is_endpoint() {
            let outcome = Registrar::new(self.filesystem.as_ref()).register(
                project_root,
                &config,
                &component,
            )?;
            Some(outcome)
        } else {
            None
        };

        info!(component = %component, registration = ?registration, "component added");
        Ok(AddReport {
            component,
            materialized,
            registration,
        })
    }

    /// Generate deployment or CI files for an existing project.
    #[instrument(skip_all, fields(artifact = %artifact, root = %project_root.display()))]
    pub fn generate_artifact(
        &self,
        project_root: &Path,
        artifact: Artifact,
        policy: &dyn OverwritePolicy,
    ) -> StratumResult<MaterializeReport> {
        let config = self.load_config(project_root)?;
        let plan = AssemblyPlanner::new(&config).artifact_plan(artifact)?;
        self.materializer().execute(project_root, &plan, policy)
    }

    fn materializer(&self) -> Materializer<'_> {
        Materializer::new(
            self.store.as_ref(),
            self.renderer.as_ref(),
            self.filesystem.as_ref(),
        )
    }
}
