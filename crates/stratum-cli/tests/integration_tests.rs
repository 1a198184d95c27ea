//! Integration tests for the `stratum` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch working directory with its own tool configuration, so the
/// user's real config never leaks into a test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[defaults]\noverwrite = \"never\"\n",
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn project(&self, slug: &str) -> PathBuf {
        self.dir.path().join(slug)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stratum").unwrap();
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("STRATUM_TEMPLATES_DIR")
            .arg("--config")
            .arg(self.path().join("config.toml"));
        cmd
    }

    fn init(&self, name: &str, framework: &str, architecture: &str, extra: &[&str]) {
        self.cmd()
            .args([
                "init",
                "--name",
                name,
                "--framework",
                framework,
                "--architecture",
                architecture,
                "-y",
            ])
            .args(extra)
            .assert()
            .success();
    }
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("stratum")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stratum"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("stratum")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_fastapi_clean_project() {
    let sb = Sandbox::new();

    sb.init(
        "My Shop",
        "fastapi",
        "clean",
        &["--database", "postgres", "--feature", "jwt-auth,docker"],
    );

    let root = sb.project("my_shop");
    for file in [
        "app/main.py",
        "app/core/config.py",
        "app/core/security.py",
        "Dockerfile",
        "docker-compose.yml",
        "stratum.json",
    ] {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    assert!(!root.join(".github/workflows/ci.yml").exists());

    let config = fs::read_to_string(root.join("stratum.json")).unwrap();
    assert!(config.contains("\"framework\": \"FastAPI\""));
    assert!(config.contains("\"database\": \"PostgreSQL\""));
}

#[test]
fn test_init_without_name_is_refused() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["init", "--framework", "flask", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_denied_command_suggests_alternative_and_writes_nothing() {
    let sb = Sandbox::new();
    sb.init("blog", "flask", "mvc", &[]);
    let root = sb.project("blog");
    let entry_before = fs::read_to_string(root.join("app/__init__.py")).unwrap();

    sb.cmd()
        .args(["add", "service", "payment", "--project-dir"])
        .arg(&root)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not supported"))
        .stderr(predicate::str::contains("stratum add model payment"));

    assert!(!root.join("app/services").exists());
    assert_eq!(
        fs::read_to_string(root.join("app/__init__.py")).unwrap(),
        entry_before
    );
}

#[test]
fn test_route_registration_is_idempotent() {
    let sb = Sandbox::new();
    sb.init("api", "flask", "clean", &[]);
    let root = sb.project("api");
    let entry = root.join("app/routes/__init__.py");

    sb.cmd()
        .args(["add", "route", "users", "--project-dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered"));
    let after_first = fs::read_to_string(&entry).unwrap();
    assert!(after_first.contains("from app.routes.user import user_bp"));
    assert!(root.join("app/routes/user.py").is_file());

    sb.cmd()
        .args(["add", "route", "users", "--project-dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"));

    assert_eq!(fs::read_to_string(&entry).unwrap(), after_first);
}

#[test]
fn test_add_defaults_to_current_directory() {
    let sb = Sandbox::new();
    sb.init("svc", "fastapi", "clean", &[]);
    let root = sb.project("svc");

    Command::cargo_bin("stratum")
        .unwrap()
        .current_dir(&root)
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(sb.path().join("config.toml"))
        .args(["add", "resource", "products"])
        .assert()
        .success();

    assert!(root.join("app/models/product.py").is_file());
    let main = fs::read_to_string(root.join("app/main.py")).unwrap();
    assert!(main.contains("product_router"));
}

#[test]
fn test_add_outside_a_project_is_refused() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["add", "model", "user"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stratum.json"));
}

#[test]
fn test_gen_docker_keeps_existing_files() {
    let sb = Sandbox::new();
    sb.init("tiny", "flask", "minimal", &[]);
    let root = sb.project("tiny");

    sb.cmd()
        .args(["gen", "docker", "--project-dir"])
        .arg(&root)
        .assert()
        .success();
    assert!(root.join("Dockerfile").is_file());

    fs::write(root.join("Dockerfile"), "FROM scratch\n").unwrap();
    sb.cmd()
        .args(["gen", "docker", "--skip-existing", "--project-dir"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("kept existing Dockerfile"));

    assert_eq!(
        fs::read_to_string(root.join("Dockerfile")).unwrap(),
        "FROM scratch\n"
    );
}

#[test]
fn test_gen_force_overwrites() {
    let sb = Sandbox::new();
    sb.init("tiny", "fastapi", "minimal", &["--feature", "docker"]);
    let root = sb.project("tiny");
    fs::write(root.join("Dockerfile"), "FROM scratch\n").unwrap();

    sb.cmd()
        .args(["gen", "docker", "--force", "--project-dir"])
        .arg(&root)
        .assert()
        .success();

    assert_ne!(
        fs::read_to_string(root.join("Dockerfile")).unwrap(),
        "FROM scratch\n"
    );
}

#[test]
fn test_json_output_format() {
    let sb = Sandbox::new();
    sb.init("api", "fastapi", "mvc", &[]);
    let root = sb.project("api");

    let out = sb
        .cmd()
        .args(["--output-format", "json", "gen", "ci", "--project-dir"])
        .arg(&root)
        .output()
        .unwrap();

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["artifact"], "ci");
    assert_eq!(json["files"]["written"][0], ".github/workflows/ci.yml");
}

#[test]
fn test_quiet_flag() {
    let sb = Sandbox::new();

    sb.cmd()
        .args([
            "-q",
            "init",
            "--name",
            "quiet",
            "--framework",
            "flask",
            "--architecture",
            "clean",
            "-y",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_log_file_receives_events() {
    let sb = Sandbox::new();
    let log = sb.path().join("logs/stratum.log");

    sb.cmd()
        .arg("-vv")
        .arg("--log-file")
        .arg(&log)
        .args(["init", "--name", "logged", "--framework", "flask", "-y"])
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("project created"));
}

#[test]
fn test_config_path_honours_flag() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_get() {
    let sb = Sandbox::new();
    let fresh = sb.path().join("fresh/config.toml");

    Command::cargo_bin("stratum")
        .unwrap()
        .arg("--config")
        .arg(&fresh)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(fs::read_to_string(&fresh).unwrap().contains("[defaults]"));

    Command::cargo_bin("stratum")
        .unwrap()
        .arg("--config")
        .arg(&fresh)
        .args(["config", "get", "defaults.framework"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fastapi"));
}

#[test]
fn test_environment_overrides_config_file() {
    let sb = Sandbox::new();

    sb.cmd()
        .env("STRATUM_DEFAULTS__FRAMEWORK", "flask")
        .args(["config", "get", "defaults.framework"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flask"));
}

#[test]
fn test_shell_completions() {
    Command::cargo_bin("stratum")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stratum"));
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    let sb = Sandbox::new();

    for value in ["1", "0", "", "yes"] {
        sb.cmd()
            .env("NO_COLOR", value)
            .args(["config", "path"])
            .assert()
            .success();
    }

    sb.cmd()
        .args(["--no-color", "config", "path"])
        .assert()
        .success();
}
