//! Tests for error handling, exit codes and suggestions.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stratum(dir: &TempDir) -> Command {
    let config = dir.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "[defaults]\noverwrite = \"never\"\n").unwrap();
    }
    let mut cmd = Command::cargo_bin("stratum").unwrap();
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("STRATUM_TEMPLATES_DIR")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_unknown_subcommand_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    stratum(&dir)
        .args(["deploy"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("deploy"));
}

#[test]
fn test_unknown_component_kind_lists_choices() {
    let dir = TempDir::new().unwrap();
    stratum(&dir)
        .args(["add", "widget", "thing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("resource"));
}

#[test]
fn test_feature_not_allowed_for_architecture() {
    let dir = TempDir::new().unwrap();
    stratum(&dir)
        .args([
            "init",
            "--name",
            "tiny",
            "--framework",
            "flask",
            "--architecture",
            "minimal",
            "--feature",
            "cache",
            "-y",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!dir.path().join("tiny").exists());
}

#[test]
fn test_minimal_denies_components_without_suggestion() {
    let dir = TempDir::new().unwrap();
    stratum(&dir)
        .args([
            "init",
            "--name",
            "tiny",
            "--framework",
            "fastapi",
            "--architecture",
            "minimal",
            "-y",
        ])
        .assert()
        .success();

    stratum(&dir)
        .args(["add", "route", "users", "--project-dir", "tiny"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Clean Architecture layout"));
}

#[test]
fn test_broken_project_file_is_refused() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("broken");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("stratum.json"), "{ not json").unwrap();

    stratum(&dir)
        .args(["gen", "ci", "--project-dir", "broken"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No usable project configuration"));

    assert!(!root.join(".github").exists());
}

#[test]
fn test_broken_override_template_fails_mid_plan() {
    let dir = TempDir::new().unwrap();
    let overrides = dir.path().join("overrides/flask/minimal");
    fs::create_dir_all(&overrides).unwrap();
    fs::write(overrides.join("app.py.tmpl"), "{{#if HAS_DATABASE}}\nimport db\n").unwrap();

    stratum(&dir)
        .env("STRATUM_TEMPLATES_DIR", dir.path().join("overrides"))
        .args([
            "init",
            "--name",
            "tiny",
            "--framework",
            "flask",
            "--architecture",
            "minimal",
            "-y",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to render template"));
}

#[test]
fn test_override_template_shadows_builtin() {
    let dir = TempDir::new().unwrap();
    let overrides = dir.path().join("overrides/flask/minimal");
    fs::create_dir_all(&overrides).unwrap();
    fs::write(overrides.join("app.py.tmpl"), "# {{PROJECT_NAME}} custom\n").unwrap();

    stratum(&dir)
        .env("STRATUM_TEMPLATES_DIR", dir.path().join("overrides"))
        .args([
            "init",
            "--name",
            "tiny",
            "--framework",
            "flask",
            "--architecture",
            "minimal",
            "-y",
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("tiny/app.py")).unwrap(),
        "# tiny custom\n"
    );
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[defaults]\nframework = \"django\"\n",
    )
    .unwrap();

    stratum(&dir)
        .args(["config", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_verbose_error_shows_cause_chain() {
    let dir = TempDir::new().unwrap();
    stratum(&dir)
        .args(["-v", "add", "model", "user"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}

#[test]
fn test_hand_edited_config_with_illegal_features_is_refused() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("tiny");
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("stratum.json"),
        r#"{
    "name": "tiny",
    "framework": "Flask",
    "architecture": "Minimal",
    "database": "None",
    "features": ["JWT / Auth Template", "Session-Based Auth"]
}"#,
    )
    .unwrap();

    stratum(&dir)
        .args(["gen", "docker", "--project-dir", "tiny"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available"));

    assert!(!root.join("Dockerfile").exists());
    assert!(!root.join("docker-compose.yml").exists());
}
