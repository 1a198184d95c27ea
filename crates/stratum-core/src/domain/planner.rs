//! Assembly planner: configuration (+ component name) → ordered plan.
//!
//! Pure. Reads the tables in `blueprints.rs` and `capabilities.rs`, performs
//! no I/O, and produces plans that satisfy the ordering invariant checked by
//! [`AssemblyPlan::validate`].

use tracing::debug;

use crate::domain::blueprints::{
    self, ARTIFACT_PLANS, Blueprint, FEATURE_BRANCHES, REQUIREMENTS, Slice, Step, Trigger,
};
use crate::domain::capabilities::{self, Verdict};
use crate::domain::entities::{
    AssemblyPlan, PlanBuilder, ProjectConfig, RelativePath, RenderContext, TemplateKey,
};
use crate::domain::naming::ComponentName;
use crate::domain::value_objects::{Artifact, ComponentKind};
use crate::domain::DomainError;

pub struct AssemblyPlanner<'a> {
    config: &'a ProjectConfig,
    context: RenderContext,
}

impl<'a> AssemblyPlanner<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        let run_command = blueprints::base_plan(config.framework, config.architecture)
            .map_or("", |p| p.run_command);

        let context = RenderContext::for_project(config)
            .with_variable("EXTRA_REQUIREMENTS", extra_requirements(config))
            .with_variable("RUN_COMMAND", run_command);

        Self { config, context }
    }

    /// The project context every file action of this planner starts from.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    // ── init ─────────────────────────────────────────────────────────────────

    /// Full project: base plan for the framework/architecture pair, then each
    /// selected feature's branches in catalog order.
    pub fn project_plan(&self) -> Result<AssemblyPlan, DomainError> {
        self.config.validate()?;

        let base = blueprints::base_plan(self.config.framework, self.config.architecture)
            .ok_or_else(|| DomainError::UnknownValue {
                field: "architecture",
                value: self.config.architecture.as_str().to_owned(),
            })?;

        let mut builder = AssemblyPlan::builder();
        self.apply(&mut builder, base.steps, &self.context)?;

        for feature in &self.config.features {
            for branch in FEATURE_BRANCHES.iter().filter(|b| {
                b.feature == *feature
                    && b.applies_to(self.config.framework, self.config.architecture)
            }) {
                self.apply(&mut builder, branch.steps, &self.context)?;
            }
        }

        let plan = builder.build()?;
        debug!(
            actions = plan.len(),
            framework = %self.config.framework,
            architecture = %self.config.architecture,
            "project plan computed"
        );
        Ok(plan)
    }

    // ── add ──────────────────────────────────────────────────────────────────

    /// Fail with a suggestion when `kind` is not available on this project.
    pub fn check_command(&self, kind: ComponentKind, name: &str) -> Result<(), DomainError> {
        match capabilities::check_command(kind, self.config.framework, self.config.architecture) {
            Verdict::Allowed => Ok(()),
            Verdict::Denied { suggestion } => Err(DomainError::UnsupportedCommandForCombination {
                command: kind.as_str().to_owned(),
                framework: self.config.framework.label().to_owned(),
                architecture: self.config.architecture.label().to_owned(),
                suggestion: suggestion.map(|alt| format!("stratum add {alt} {name}")),
            }),
        }
    }

    pub fn component_plan(
        &self,
        kind: ComponentKind,
        name: &ComponentName,
    ) -> Result<AssemblyPlan, DomainError> {
        self.check_command(kind, name.raw())?;

        let is_resource = kind == ComponentKind::Resource;
        let slices: Vec<Slice> = if is_resource {
            blueprints::resource_recipe(self.config.framework, self.config.architecture)
                .map(|r| r.slices.to_vec())
                .unwrap_or_default()
        } else {
            vec![single_slice(kind)]
        };

        let context = self.context.clone().with_component(name, is_resource);
        let mut builder = AssemblyPlan::builder();

        for slice in slices {
            let bp = blueprints::slice_blueprint(
                slice,
                self.config.framework,
                self.config.architecture,
            )
            .ok_or_else(|| DomainError::UnsupportedCommandForCombination {
                command: kind.as_str().to_owned(),
                framework: self.config.framework.label().to_owned(),
                architecture: self.config.architecture.label().to_owned(),
                suggestion: None,
            })?;

            let output = RelativePath::try_new(bp.output.replace("{name}", name.snake()))?;
            builder.file(TemplateKey::new(bp.template), output, context.clone());
        }

        let plan = builder.build()?;
        debug!(kind = %kind, name = %name, actions = plan.len(), "component plan computed");
        Ok(plan)
    }

    // ── gen ──────────────────────────────────────────────────────────────────

    /// Deployment/CI files. Not subject to the command matrix.
    pub fn artifact_plan(&self, artifact: Artifact) -> Result<AssemblyPlan, DomainError> {
        let mut builder = AssemblyPlan::builder();
        for plan in ARTIFACT_PLANS.iter().filter(|p| p.artifact == artifact) {
            self.apply(&mut builder, plan.steps, &self.context)?;
        }
        builder.build()
    }

    fn apply(
        &self,
        builder: &mut PlanBuilder,
        steps: &[Blueprint],
        context: &RenderContext,
    ) -> Result<(), DomainError> {
        for bp in steps.iter().filter(|b| b.when.holds(self.config.database)) {
            match bp.step {
                Step::Dir(path) => {
                    builder.directory(RelativePath::try_new(path)?);
                }
                Step::File { template, output } => {
                    builder.file(
                        TemplateKey::new(template),
                        RelativePath::try_new(output)?,
                        context.clone(),
                    );
                }
            }
        }
        Ok(())
    }
}

fn single_slice(kind: ComponentKind) -> Slice {
    match kind {
        ComponentKind::Service => Slice::Service,
        ComponentKind::Repository => Slice::Repository,
        ComponentKind::Model => Slice::Model,
        ComponentKind::Route | ComponentKind::Resource => Slice::Route,
        ComponentKind::Template => Slice::Template,
        ComponentKind::View => Slice::View,
        ComponentKind::Form => Slice::Form,
        ComponentKind::Middleware => Slice::Middleware,
    }
}

/// Newline-separated packages the configuration adds to `requirements.txt`.
fn extra_requirements(config: &ProjectConfig) -> String {
    let mut packages: Vec<&str> = Vec::new();
    for req in REQUIREMENTS {
        let triggered = match req.trigger {
            Trigger::Feature(f) => config.has_feature(f),
            Trigger::SqlDatabase => config.database.is_sql(),
            Trigger::Database(db) => config.database == db,
        };
        let framework_ok = req.framework.is_none_or(|f| f == config.framework);
        if triggered && framework_ok && !packages.contains(&req.package) {
            packages.push(req.package);
        }
    }
    packages.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::allowed_features;
    use crate::domain::entities::PlanAction;
    use crate::domain::value_objects::{Architecture, Database, Feature, Framework};

    fn config(
        framework: Framework,
        architecture: Architecture,
        database: Database,
        features: &[Feature],
    ) -> ProjectConfig {
        ProjectConfig::builder()
            .name("My Shop")
            .framework(framework)
            .architecture(architecture)
            .database(database)
            .features(features.iter().copied())
            .build()
            .unwrap()
    }

    fn outputs(plan: &AssemblyPlan) -> Vec<String> {
        plan.files().map(|(_, o)| o.to_string()).collect()
    }

    fn keys(plan: &AssemblyPlan) -> Vec<String> {
        plan.files().map(|(k, _)| k.to_string()).collect()
    }

    #[test]
    fn every_legal_configuration_plans_cleanly() {
        for framework in Framework::ALL {
            for arch in Architecture::ALL {
                for database in Database::ALL {
                    let all = config(framework, arch, database, allowed_features(arch));
                    let none = config(framework, arch, database, &[]);
                    for cfg in [all, none] {
                        let plan = AssemblyPlanner::new(&cfg).project_plan().unwrap();
                        plan.validate().unwrap();
                        assert!(!plan.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn scenario_fastapi_clean_postgres_jwt_docker() {
        let cfg = config(
            Framework::FastApi,
            Architecture::Clean,
            Database::Postgres,
            &[Feature::JwtAuth, Feature::Docker],
        );
        let plan = AssemblyPlanner::new(&cfg).project_plan().unwrap();
        let out = outputs(&plan);

        for expected in [
            "app/main.py",
            "app/core/config.py",
            "app/dependencies/db.py",
            "app/core/security.py",
            "app/api/v1/routers/auth.py",
            "app/models/user.py",
            "Dockerfile",
            "docker-compose.yml",
            ".env",
            "requirements.txt",
        ] {
            assert!(out.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!out.iter().any(|o| o.starts_with(".github")));
        assert!(!out.iter().any(|o| o.starts_with("tasks")));
    }

    #[test]
    fn database_conditions_drop_db_files() {
        let cfg = config(
            Framework::Flask,
            Architecture::Clean,
            Database::None,
            &[Feature::Migrations],
        );
        let plan = AssemblyPlanner::new(&cfg).project_plan().unwrap();
        let out = outputs(&plan);

        assert!(!out.contains(&"app/extensions/db.py".to_string()));
        assert!(!plan.directories().any(|d| d.to_string() == "migrations"));
    }

    #[test]
    fn mongo_gets_db_module_but_no_migrations() {
        let cfg = config(
            Framework::Flask,
            Architecture::Clean,
            Database::Mongo,
            &[Feature::Migrations],
        );
        let plan = AssemblyPlanner::new(&cfg).project_plan().unwrap();

        assert!(outputs(&plan).contains(&"app/extensions/db.py".to_string()));
        assert!(!plan.directories().any(|d| d.to_string() == "migrations"));
    }

    #[test]
    fn architecture_specific_keys_do_not_cross() {
        for framework in Framework::ALL {
            let clean = config(
                framework,
                Architecture::Clean,
                Database::Sqlite,
                allowed_features(Architecture::Clean),
            );
            let mvc = config(
                framework,
                Architecture::Mvc,
                Database::Sqlite,
                allowed_features(Architecture::Mvc),
            );

            let clean_keys = keys(&AssemblyPlanner::new(&clean).project_plan().unwrap());
            let mvc_keys = keys(&AssemblyPlanner::new(&mvc).project_plan().unwrap());

            assert!(!clean_keys.iter().any(|k| k.contains("/mvc/")));
            assert!(!mvc_keys.iter().any(|k| k.contains("/clean/")));
        }
    }

    #[test]
    fn feature_branches_only_append() {
        let bare = config(Framework::Flask, Architecture::Mvc, Database::Sqlite, &[]);
        let rich = config(
            Framework::Flask,
            Architecture::Mvc,
            Database::Sqlite,
            &[Feature::SessionAuth, Feature::Logging],
        );

        let bare_out = outputs(&AssemblyPlanner::new(&bare).project_plan().unwrap());
        let rich_out = outputs(&AssemblyPlanner::new(&rich).project_plan().unwrap());

        assert_eq!(&rich_out[..bare_out.len()], &bare_out[..]);
        assert!(rich_out.contains(&"app/routes/auth.py".to_string()));
        assert!(rich_out.contains(&"app/templates/auth/login.html".to_string()));
    }

    #[test]
    fn service_in_mvc_is_denied_with_suggestion() {
        let cfg = config(Framework::Flask, Architecture::Mvc, Database::None, &[]);
        let name = ComponentName::parse("payment").unwrap();

        let err = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Service, &name)
            .unwrap_err();

        match err {
            DomainError::UnsupportedCommandForCombination { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("stratum add model payment"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn minimal_denies_add_without_suggestion() {
        let cfg = config(Framework::FastApi, Architecture::Minimal, Database::None, &[]);
        let name = ComponentName::parse("user").unwrap();

        let err = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Route, &name)
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::UnsupportedCommandForCombination {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn clean_resource_expands_to_four_slices() {
        let cfg = config(Framework::Flask, Architecture::Clean, Database::Sqlite, &[]);
        let name = ComponentName::parse("products").unwrap();
        let plan = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Resource, &name)
            .unwrap();

        assert_eq!(
            outputs(&plan),
            vec![
                "app/models/product.py",
                "app/repositories/product_repository.py",
                "app/services/product_service.py",
                "app/routes/product.py",
            ]
        );

        let PlanAction::File { context, .. } = plan.actions().last().unwrap() else {
            panic!("last action is not a file");
        };
        assert_eq!(context.get("IS_RESOURCE"), Some("true"));
        assert_eq!(context.get("NAME_PASCAL"), Some("Product"));
    }

    #[test]
    fn fastapi_resource_includes_schema() {
        let cfg = config(Framework::FastApi, Architecture::Clean, Database::Sqlite, &[]);
        let name = ComponentName::parse("orders").unwrap();
        let plan = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Resource, &name)
            .unwrap();

        assert!(outputs(&plan).contains(&"app/schemas/order.py".to_string()));
        assert_eq!(plan.files().count(), 5);
    }

    #[test]
    fn mvc_resource_has_view_templates() {
        let cfg = config(Framework::FastApi, Architecture::Mvc, Database::Sqlite, &[]);
        let name = ComponentName::parse("posts").unwrap();
        let plan = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Resource, &name)
            .unwrap();

        assert_eq!(
            outputs(&plan),
            vec![
                "app/models/post.py",
                "app/routers/post.py",
                "app/templates/post/index.html",
                "app/templates/post/detail.html",
                "app/templates/post/form.html",
            ]
        );
        plan.validate().unwrap();
    }

    #[test]
    fn single_route_is_not_a_resource() {
        let cfg = config(Framework::Flask, Architecture::Clean, Database::None, &[]);
        let name = ComponentName::parse("user").unwrap();
        let plan = AssemblyPlanner::new(&cfg)
            .component_plan(ComponentKind::Route, &name)
            .unwrap();

        assert_eq!(outputs(&plan), vec!["app/routes/user.py"]);
        let PlanAction::File { context, .. } = plan.actions().last().unwrap() else {
            panic!("last action is not a file");
        };
        assert_eq!(context.get("IS_RESOURCE"), Some("false"));
    }

    #[test]
    fn artifacts_ignore_the_command_matrix() {
        let cfg = config(Framework::Flask, Architecture::Minimal, Database::None, &[]);
        let planner = AssemblyPlanner::new(&cfg);

        assert_eq!(
            outputs(&planner.artifact_plan(Artifact::Docker).unwrap()),
            vec!["Dockerfile", "docker-compose.yml"]
        );

        let ci = planner.artifact_plan(Artifact::Ci).unwrap();
        assert_eq!(outputs(&ci), vec![".github/workflows/ci.yml"]);
        assert_eq!(ci.directories().count(), 2);
    }

    #[test]
    fn requirements_follow_configuration() {
        let cfg = config(
            Framework::Flask,
            Architecture::Clean,
            Database::Postgres,
            &[Feature::Orm, Feature::JwtAuth],
        );
        let planner = AssemblyPlanner::new(&cfg);
        let reqs = planner.context().get("EXTRA_REQUIREMENTS").unwrap();

        assert_eq!(reqs, "Flask-SQLAlchemy\npsycopg2-binary\nFlask-JWT-Extended");
    }
}
