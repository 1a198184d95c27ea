//! Integration tests for stratum-core's public API.

use stratum_core::domain::capabilities::{self, Verdict};
use stratum_core::domain::{
    Architecture, AssemblyPlanner, ComponentKind, ComponentName, Database, EntryPointDocument,
    Feature, Framework, Insertion, ProjectConfig,
};
use stratum_core::error::StratumError;

fn config(
    framework: Framework,
    architecture: Architecture,
    database: Database,
    features: &[Feature],
) -> ProjectConfig {
    ProjectConfig::builder()
        .name("Inventory Service")
        .framework(framework)
        .architecture(architecture)
        .database(database)
        .features(features.iter().copied())
        .build()
        .unwrap()
}

#[test]
fn test_fastapi_clean_project_plan() {
    let cfg = config(
        Framework::FastApi,
        Architecture::Clean,
        Database::Postgres,
        &[Feature::JwtAuth, Feature::Docker],
    );

    let plan = AssemblyPlanner::new(&cfg).project_plan().unwrap();
    let outputs: Vec<String> = plan.files().map(|(_, out)| out.to_string()).collect();

    for expected in [
        "app/main.py",
        "app/core/config.py",
        "app/core/security.py",
        "requirements.txt",
        "Dockerfile",
        "docker-compose.yml",
    ] {
        assert!(
            outputs.iter().any(|o| o == expected),
            "missing {expected} in {outputs:?}"
        );
    }
    assert!(plan.validate().is_ok());
}

#[test]
fn test_mvc_service_is_denied_with_alternative() {
    let cfg = config(Framework::Flask, Architecture::Mvc, Database::Sqlite, &[]);
    let name = ComponentName::parse("payment").unwrap();

    let err: StratumError = AssemblyPlanner::new(&cfg)
        .component_plan(ComponentKind::Service, &name)
        .unwrap_err()
        .into();

    assert!(err.is_guard());
    assert!(
        err.suggestions()
            .iter()
            .any(|s| s.contains("stratum add model payment"))
    );
}

#[test]
fn test_minimal_denies_every_component() {
    for framework in Framework::ALL {
        for kind in ComponentKind::ALL {
            assert_eq!(
                capabilities::check_command(kind, framework, Architecture::Minimal),
                Verdict::Denied { suggestion: None },
                "{kind} on {framework} minimal"
            );
        }
    }
}

#[test]
fn test_resource_names_are_singularized() {
    let cfg = config(Framework::Flask, Architecture::Clean, Database::Sqlite, &[]);
    let name = ComponentName::parse("categories").unwrap();

    let plan = AssemblyPlanner::new(&cfg)
        .component_plan(ComponentKind::Resource, &name)
        .unwrap();
    let outputs: Vec<String> = plan.files().map(|(_, out)| out.to_string()).collect();

    assert!(outputs.contains(&"app/models/category.py".to_owned()));
    assert!(outputs.contains(&"app/routes/category.py".to_owned()));
    assert!(outputs.iter().all(|o| !o.contains("categories")));
}

#[test]
fn test_entry_point_insertion_is_idempotent() {
    let def = capabilities::entry_point(Framework::Flask, Architecture::Clean).unwrap();
    let source = format!(
        "def register_blueprints(app):\n    from app.routes.main import main_bp\n    app.register_blueprint(main_bp)\n    {}\n",
        capabilities::REGISTRATION_SENTINEL
    );

    let mut doc = EntryPointDocument::parse(def, &source);
    assert_eq!(doc.insert("user"), Insertion::Inserted);
    let once = doc.render();

    let mut again = EntryPointDocument::parse(def, &once);
    assert_eq!(again.insert("user"), Insertion::AlreadyPresent);
    assert_eq!(again.render(), once);
}

#[test]
fn test_config_file_uses_display_labels() {
    let cfg = config(
        Framework::FastApi,
        Architecture::Mvc,
        Database::Mongo,
        &[Feature::Mail],
    );

    let json = serde_json::to_value(&cfg).unwrap();
    assert_eq!(json["framework"], "FastAPI");
    assert_eq!(json["architecture"], "MVC");

    let back: ProjectConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, cfg);
}
