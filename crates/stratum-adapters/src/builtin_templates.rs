//! Built-in template catalog.
//!
//! Every template the planner can reference ships inside the binary, embedded
//! from `templates/<key>.tmpl` at compile time. A user override directory can
//! shadow individual keys (see [`resolve_override_dir`]).
//!
//! # Override resolution
//!
//! The first of these that exists is used:
//!
//! 1. **`$STRATUM_TEMPLATES_DIR`**: environment variable override.
//! 2. **`templates.local_path`** from the tool configuration, passed in by
//!    the caller.
//!
//! Missing candidates are skipped silently; a configured path that does not
//! exist is logged at `WARN`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Environment variable naming a template override directory.
pub const TEMPLATES_DIR_ENV: &str = "STRATUM_TEMPLATES_DIR";

/// Expands each key to `(key, embedded body)`.
macro_rules! builtin {
    ($($key:literal),* $(,)?) => {
        &[$(($key, include_str!(concat!("../templates/", $key, ".tmpl")))),*]
    };
}

/// `(template key, raw body)`, sorted by key.
pub static BUILTIN_TEMPLATES: &[(&str, &str)] = builtin![
    "fastapi/clean/app/api/v1/routers/auth.py",
    "fastapi/clean/app/core/cache.py",
    "fastapi/clean/app/core/config.py",
    "fastapi/clean/app/core/mail.py",
    "fastapi/clean/app/core/security.py",
    "fastapi/clean/app/dependencies/db.py",
    "fastapi/clean/app/main.py",
    "fastapi/clean/app/models/user.py",
    "fastapi/clean/app/repositories/base_repository.py",
    "fastapi/clean/middleware.py",
    "fastapi/clean/model.py",
    "fastapi/clean/repository.py",
    "fastapi/clean/router.py",
    "fastapi/clean/schema.py",
    "fastapi/clean/service.py",
    "fastapi/clean/tests/conftest.py",
    "fastapi/clean/tests/test_app.py",
    "fastapi/minimal/main.py",
    "fastapi/mvc/app/main.py",
    "fastapi/mvc/app/models/user.py",
    "fastapi/mvc/app/routers/auth.py",
    "fastapi/mvc/app/routers/main.py",
    "fastapi/mvc/app/templates/auth/login.html",
    "fastapi/mvc/app/templates/index.html",
    "fastapi/mvc/middleware.py",
    "fastapi/mvc/model.py",
    "fastapi/mvc/router.py",
    "fastapi/mvc/view.py",
    "flask/clean/app/__init__.py",
    "flask/clean/app/auth/routes.py",
    "flask/clean/app/auth/utils.py",
    "flask/clean/app/celery_utils.py",
    "flask/clean/app/config/__init__.py",
    "flask/clean/app/config/base.py",
    "flask/clean/app/config/development.py",
    "flask/clean/app/config/production.py",
    "flask/clean/app/config/testing.py",
    "flask/clean/app/extensions/__init__.py",
    "flask/clean/app/extensions/cache.py",
    "flask/clean/app/extensions/db.py",
    "flask/clean/app/extensions/jwt.py",
    "flask/clean/app/extensions/mail.py",
    "flask/clean/app/models/user.py",
    "flask/clean/app/repositories/base_repository.py",
    "flask/clean/app/routes/__init__.py",
    "flask/clean/app/routes/main.py",
    "flask/clean/model.py",
    "flask/clean/repository.py",
    "flask/clean/route.py",
    "flask/clean/service.py",
    "flask/clean/tests/conftest.py",
    "flask/clean/tests/test_app.py",
    "flask/minimal/app.py",
    "flask/mvc/app/__init__.py",
    "flask/mvc/app/config.py",
    "flask/mvc/app/models/user.py",
    "flask/mvc/app/routes/auth.py",
    "flask/mvc/app/routes/main.py",
    "flask/mvc/app/templates/auth/login.html",
    "flask/mvc/app/templates/auth/register.html",
    "flask/mvc/app/templates/base.html",
    "flask/mvc/app/templates/home.html",
    "flask/mvc/app/templates/index.html",
    "flask/mvc/form.py",
    "flask/mvc/model.py",
    "flask/mvc/route.py",
    "flask/mvc/run.py",
    "flask/mvc/view.py",
    "shared/.env",
    "shared/Dockerfile",
    "shared/README.md",
    "shared/ci.yml",
    "shared/docker-compose.yml",
    "shared/empty",
    "shared/logging_config.py",
    "shared/mail.py",
    "shared/migrations/README",
    "shared/models/base.py",
    "shared/requirements/fastapi.txt",
    "shared/requirements/flask.txt",
    "shared/tasks/__init__.py",
    "shared/tasks/example_task.py",
    "shared/utils/email.py",
    "shared/views/detail.html",
    "shared/views/form.html",
    "shared/views/index.html",
    "shared/views/page.html",
];

/// Look up an embedded template body.
pub fn builtin(key: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|i| BUILTIN_TEMPLATES[i].1)
}

/// Pick the override directory, if any.
pub fn resolve_override_dir(configured: Option<&Path>) -> Option<PathBuf> {
    let from_env = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);

    for (source, candidate) in [
        ("env", from_env),
        ("config", configured.map(Path::to_path_buf)),
    ] {
        let Some(path) = candidate else { continue };
        if path.is_dir() {
            debug!(source, path = %path.display(), "using template override directory");
            return Some(path);
        }
        warn!(source, path = %path.display(), "template override directory not found, ignoring");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_unique() {
        for pair in BUILTIN_TEMPLATES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} / {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookup_finds_embedded_bodies() {
        assert_eq!(builtin("shared/empty"), Some(""));
        assert!(
            builtin("flask/clean/app/routes/__init__.py")
                .is_some_and(|body| body.contains(
                    "# Additional blueprints will be registered here automatically"
                ))
        );
        assert!(builtin("flask/clean/nope.py").is_none());
    }

    #[test]
    fn missing_configured_dir_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        // Only meaningful when the env override is unset in the test environment.
        if std::env::var_os(TEMPLATES_DIR_ENV).is_none() {
            assert_eq!(resolve_override_dir(Some(&missing)), None);
            assert_eq!(
                resolve_override_dir(Some(dir.path())),
                Some(dir.path().to_path_buf())
            );
        }
    }
}
