//! Every plan the planner can produce must resolve and render against the
//! built-in catalog.

use stratum_adapters::{InMemoryStore, SimpleRenderer};
use stratum_core::application::ports::{TemplateRenderer, TemplateStore};
use stratum_core::domain::capabilities::{self, Verdict};
use stratum_core::domain::{
    Architecture, AssemblyPlan, AssemblyPlanner, Artifact, ComponentKind, ComponentName,
    Database, Feature, Framework, PlanAction, ProjectConfig,
};

fn configs() -> Vec<ProjectConfig> {
    let mut out = Vec::new();
    for framework in Framework::ALL {
        for architecture in Architecture::ALL {
            let legal = capabilities::allowed_features(architecture);
            let mut feature_sets: Vec<Vec<Feature>> = vec![Vec::new(), legal.to_vec()];
            feature_sets.extend(legal.iter().map(|f| vec![*f]));

            for database in Database::ALL {
                for features in &feature_sets {
                    out.push(
                        ProjectConfig::builder()
                            .name("Catalog Check")
                            .framework(framework)
                            .architecture(architecture)
                            .database(database)
                            .features(features.iter().copied())
                            .build()
                            .unwrap(),
                    );
                }
            }
        }
    }
    out
}

fn render_all(plan: &AssemblyPlan, store: &InMemoryStore, label: &str) {
    for action in plan.actions() {
        if let PlanAction::File {
            template, context, ..
        } = action
        {
            let body = store
                .get(template)
                .unwrap_or_else(|e| panic!("{label}: {e}"));
            let rendered = SimpleRenderer
                .render(&body, context)
                .unwrap_or_else(|e| panic!("{label}: {template}: {e}"));
            assert!(
                !rendered.contains("{{#") && !rendered.contains("{{/"),
                "{label}: {template} left block tags behind"
            );
        }
    }
}

#[test]
fn every_project_plan_renders() {
    let store = InMemoryStore::with_builtin().unwrap();

    for config in configs() {
        let label = format!(
            "{}/{}/{}/{:?}",
            config.framework, config.architecture, config.database, config.features
        );
        let plan = AssemblyPlanner::new(&config).project_plan().unwrap();
        render_all(&plan, &store, &label);
    }
}

#[test]
fn every_allowed_component_renders() {
    let store = InMemoryStore::with_builtin().unwrap();
    let name = ComponentName::parse("categories").unwrap();

    for config in configs().into_iter().filter(|c| c.features.is_empty()) {
        let planner = AssemblyPlanner::new(&config);
        for kind in ComponentKind::ALL {
            let verdict = capabilities::check_command(kind, config.framework, config.architecture);
            if verdict != Verdict::Allowed {
                continue;
            }
            let label = format!("{} {}/{}", kind, config.framework, config.architecture);
            let plan = planner.component_plan(kind, &name).unwrap();
            render_all(&plan, &store, &label);
        }
        for artifact in [Artifact::Docker, Artifact::Ci] {
            let plan = planner.artifact_plan(artifact).unwrap();
            render_all(&plan, &store, &format!("gen {artifact}"));
        }
    }
}

#[test]
fn entry_points_carry_the_sentinel() {
    let store = InMemoryStore::with_builtin().unwrap();
    let cases = [
        ("flask/clean/app/routes/__init__.py", Framework::Flask, Architecture::Clean),
        ("flask/mvc/app/__init__.py", Framework::Flask, Architecture::Mvc),
    ];

    for (key, framework, architecture) in cases {
        let def = capabilities::entry_point(framework, architecture).unwrap();
        assert_eq!(def.strategy, capabilities::InsertionStrategy::BeforeSentinel);
        let body = store.get(&key.into()).unwrap();
        assert!(
            body.lines()
                .any(|l| l == format!("{}{}", def.indent, capabilities::REGISTRATION_SENTINEL)),
            "{key}"
        );
    }
}
