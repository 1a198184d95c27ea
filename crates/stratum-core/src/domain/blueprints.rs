//! Declarative plan tables.
//!
//! The planner in `planner.rs` is a small interpreter over these tables:
//!
//! - [`BASE_PLANS`]: unconditional layout per framework and architecture
//! - [`FEATURE_BRANCHES`]: actions appended per selected feature
//! - [`SLICES`] and [`RESOURCE_RECIPES`]: files produced by `add`
//! - [`ARTIFACT_PLANS`]: files produced by `gen`
//! - [`REQUIREMENTS`]: extra Python packages per feature or database
//!
//! Template keys are `<framework>/<architecture>/<path>` for layout-specific
//! assets and `shared/<path>` for everything else. Outputs may use `{name}`,
//! replaced with the component's snake-case name.

use crate::domain::value_objects::{Architecture, Artifact, Database, Feature, Framework};

// ── Steps ────────────────────────────────────────────────────────────────────

/// When a step applies, judged against the configured database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    HasDatabase,
    SqlDatabase,
}

impl Condition {
    pub const fn holds(self, database: Database) -> bool {
        match self {
            Self::Always => true,
            Self::HasDatabase => database.is_present(),
            Self::SqlDatabase => database.is_sql(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Dir(&'static str),
    File {
        template: &'static str,
        output: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    pub when: Condition,
    pub step: Step,
}

const fn dir(path: &'static str) -> Blueprint {
    dir_if(Condition::Always, path)
}

const fn dir_if(when: Condition, path: &'static str) -> Blueprint {
    Blueprint {
        when,
        step: Step::Dir(path),
    }
}

const fn file(template: &'static str, output: &'static str) -> Blueprint {
    file_if(Condition::Always, template, output)
}

const fn file_if(when: Condition, template: &'static str, output: &'static str) -> Blueprint {
    Blueprint {
        when,
        step: Step::File { template, output },
    }
}

/// Package marker with no content.
const fn marker(output: &'static str) -> Blueprint {
    file("shared/empty", output)
}

// ── Base plans ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct BasePlan {
    pub framework: Framework,
    pub architecture: Architecture,
    /// Command that starts the service; used by the Docker artifact.
    pub run_command: &'static str,
    pub steps: &'static [Blueprint],
}

use Architecture::{Clean, Minimal, Mvc};
use Condition::{HasDatabase, SqlDatabase};
use Framework::{FastApi, Flask};

pub static BASE_PLANS: &[BasePlan] = &[
    BasePlan {
        framework: Flask,
        architecture: Minimal,
        run_command: "python app.py",
        steps: &[
            file("flask/minimal/app.py", "app.py"),
            file("shared/requirements/flask.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
    BasePlan {
        framework: FastApi,
        architecture: Minimal,
        run_command: "uvicorn main:app --host 0.0.0.0 --port 8000",
        steps: &[
            file("fastapi/minimal/main.py", "main.py"),
            file("shared/requirements/fastapi.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
    BasePlan {
        framework: Flask,
        architecture: Mvc,
        run_command: "python run.py",
        steps: &[
            dir("app"),
            file("flask/mvc/app/__init__.py", "app/__init__.py"),
            file("flask/mvc/app/config.py", "app/config.py"),
            marker("app/routes/__init__.py"),
            file("flask/mvc/app/routes/main.py", "app/routes/main.py"),
            dir("app/templates"),
            dir("app/static"),
            file("flask/mvc/app/templates/index.html", "app/templates/index.html"),
            marker("app/models/__init__.py"),
            file("flask/mvc/run.py", "run.py"),
            file("shared/requirements/flask.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
    BasePlan {
        framework: FastApi,
        architecture: Mvc,
        run_command: "uvicorn app.main:app --host 0.0.0.0 --port 8000",
        steps: &[
            dir("app"),
            marker("app/__init__.py"),
            file("fastapi/mvc/app/main.py", "app/main.py"),
            marker("app/routers/__init__.py"),
            file("fastapi/mvc/app/routers/main.py", "app/routers/main.py"),
            dir("app/templates"),
            dir("app/static"),
            file("fastapi/mvc/app/templates/index.html", "app/templates/index.html"),
            marker("app/models/__init__.py"),
            file("shared/requirements/fastapi.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
    BasePlan {
        framework: Flask,
        architecture: Clean,
        run_command: "flask --app app run --host 0.0.0.0 --port 5000",
        steps: &[
            dir("app"),
            file("flask/clean/app/__init__.py", "app/__init__.py"),
            dir("app/routes"),
            file("flask/clean/app/routes/__init__.py", "app/routes/__init__.py"),
            file("flask/clean/app/routes/main.py", "app/routes/main.py"),
            file("flask/clean/app/extensions/__init__.py", "app/extensions/__init__.py"),
            file_if(HasDatabase, "flask/clean/app/extensions/db.py", "app/extensions/db.py"),
            file("flask/clean/app/config/__init__.py", "app/config/__init__.py"),
            file("flask/clean/app/config/base.py", "app/config/base.py"),
            file("flask/clean/app/config/development.py", "app/config/development.py"),
            file("flask/clean/app/config/testing.py", "app/config/testing.py"),
            file("flask/clean/app/config/production.py", "app/config/production.py"),
            marker("app/models/__init__.py"),
            marker("app/services/__init__.py"),
            marker("app/repositories/__init__.py"),
            file(
                "flask/clean/app/repositories/base_repository.py",
                "app/repositories/base_repository.py",
            ),
            marker("app/utils/__init__.py"),
            file("shared/utils/email.py", "app/utils/email.py"),
            file("shared/requirements/flask.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
    BasePlan {
        framework: FastApi,
        architecture: Clean,
        run_command: "uvicorn app.main:app --host 0.0.0.0 --port 8000",
        steps: &[
            dir("app"),
            marker("app/__init__.py"),
            file("fastapi/clean/app/main.py", "app/main.py"),
            marker("app/core/__init__.py"),
            file("fastapi/clean/app/core/config.py", "app/core/config.py"),
            marker("app/dependencies/__init__.py"),
            file_if(
                HasDatabase,
                "fastapi/clean/app/dependencies/db.py",
                "app/dependencies/db.py",
            ),
            marker("app/models/__init__.py"),
            marker("app/services/__init__.py"),
            marker("app/repositories/__init__.py"),
            file(
                "fastapi/clean/app/repositories/base_repository.py",
                "app/repositories/base_repository.py",
            ),
            marker("app/routes/__init__.py"),
            marker("app/utils/__init__.py"),
            file("shared/utils/email.py", "app/utils/email.py"),
            file("shared/requirements/fastapi.txt", "requirements.txt"),
            file("shared/README.md", "README.md"),
            file("shared/.env", ".env"),
        ],
    },
];

pub fn base_plan(framework: Framework, architecture: Architecture) -> Option<&'static BasePlan> {
    BASE_PLANS
        .iter()
        .find(|p| p.framework == framework && p.architecture == architecture)
}

// ── Feature branches ─────────────────────────────────────────────────────────

/// Actions a selected feature appends. `None` filters match anything.
#[derive(Debug, Clone, Copy)]
pub struct FeatureBranch {
    pub feature: Feature,
    pub framework: Option<Framework>,
    pub architecture: Option<Architecture>,
    pub steps: &'static [Blueprint],
}

impl FeatureBranch {
    pub fn applies_to(&self, framework: Framework, architecture: Architecture) -> bool {
        self.framework.is_none_or(|f| f == framework)
            && self.architecture.is_none_or(|a| a == architecture)
    }
}

pub static FEATURE_BRANCHES: &[FeatureBranch] = &[
    // Any architecture
    FeatureBranch {
        feature: Feature::Orm,
        framework: None,
        architecture: None,
        steps: &[file_if(SqlDatabase, "shared/models/base.py", "app/models/base.py")],
    },
    FeatureBranch {
        feature: Feature::Migrations,
        framework: None,
        architecture: None,
        steps: &[
            dir_if(SqlDatabase, "migrations"),
            file_if(SqlDatabase, "shared/migrations/README", "migrations/README"),
        ],
    },
    FeatureBranch {
        feature: Feature::Docker,
        framework: None,
        architecture: None,
        steps: DOCKER_STEPS,
    },
    FeatureBranch {
        feature: Feature::Ci,
        framework: None,
        architecture: None,
        steps: CI_STEPS,
    },
    // Clean
    FeatureBranch {
        feature: Feature::BackgroundTasks,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[file("flask/clean/app/celery_utils.py", "app/celery_utils.py")],
    },
    FeatureBranch {
        feature: Feature::BackgroundTasks,
        framework: None,
        architecture: Some(Clean),
        steps: &[
            file("shared/tasks/__init__.py", "tasks/__init__.py"),
            file("shared/tasks/example_task.py", "tasks/example_task.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::JwtAuth,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[
            marker("app/auth/__init__.py"),
            file("flask/clean/app/auth/utils.py", "app/auth/utils.py"),
            file("flask/clean/app/auth/routes.py", "app/auth/routes.py"),
            file("flask/clean/app/extensions/jwt.py", "app/extensions/jwt.py"),
            file("flask/clean/app/models/user.py", "app/models/user.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::JwtAuth,
        framework: Some(FastApi),
        architecture: Some(Clean),
        steps: &[
            file("fastapi/clean/app/core/security.py", "app/core/security.py"),
            marker("app/api/__init__.py"),
            marker("app/api/v1/__init__.py"),
            marker("app/api/v1/routers/__init__.py"),
            file(
                "fastapi/clean/app/api/v1/routers/auth.py",
                "app/api/v1/routers/auth.py",
            ),
            file("fastapi/clean/app/models/user.py", "app/models/user.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::Mail,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[file("flask/clean/app/extensions/mail.py", "app/extensions/mail.py")],
    },
    FeatureBranch {
        feature: Feature::Mail,
        framework: Some(FastApi),
        architecture: Some(Clean),
        steps: &[file("fastapi/clean/app/core/mail.py", "app/core/mail.py")],
    },
    FeatureBranch {
        feature: Feature::Cache,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[file("flask/clean/app/extensions/cache.py", "app/extensions/cache.py")],
    },
    FeatureBranch {
        feature: Feature::Cache,
        framework: Some(FastApi),
        architecture: Some(Clean),
        steps: &[file("fastapi/clean/app/core/cache.py", "app/core/cache.py")],
    },
    FeatureBranch {
        feature: Feature::Logging,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[file("shared/logging_config.py", "app/logging_config.py")],
    },
    FeatureBranch {
        feature: Feature::Logging,
        framework: Some(FastApi),
        architecture: Some(Clean),
        steps: &[file("shared/logging_config.py", "app/core/logging.py")],
    },
    FeatureBranch {
        feature: Feature::Testing,
        framework: Some(Flask),
        architecture: Some(Clean),
        steps: &[
            marker("tests/__init__.py"),
            file("flask/clean/tests/conftest.py", "tests/conftest.py"),
            file("flask/clean/tests/test_app.py", "tests/test_app.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::Testing,
        framework: Some(FastApi),
        architecture: Some(Clean),
        steps: &[
            marker("tests/__init__.py"),
            file("fastapi/clean/tests/conftest.py", "tests/conftest.py"),
            file("fastapi/clean/tests/test_app.py", "tests/test_app.py"),
        ],
    },
    // MVC
    FeatureBranch {
        feature: Feature::SessionAuth,
        framework: Some(Flask),
        architecture: Some(Mvc),
        steps: &[
            file("flask/mvc/app/templates/base.html", "app/templates/base.html"),
            file("flask/mvc/app/templates/home.html", "app/templates/home.html"),
            file(
                "flask/mvc/app/templates/auth/login.html",
                "app/templates/auth/login.html",
            ),
            file(
                "flask/mvc/app/templates/auth/register.html",
                "app/templates/auth/register.html",
            ),
            file("flask/mvc/app/models/user.py", "app/models/user.py"),
            file("flask/mvc/app/routes/auth.py", "app/routes/auth.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::SessionAuth,
        framework: Some(FastApi),
        architecture: Some(Mvc),
        steps: &[
            file(
                "fastapi/mvc/app/templates/auth/login.html",
                "app/templates/auth/login.html",
            ),
            file("fastapi/mvc/app/models/user.py", "app/models/user.py"),
            file("fastapi/mvc/app/routers/auth.py", "app/routers/auth.py"),
        ],
    },
    FeatureBranch {
        feature: Feature::Mail,
        framework: None,
        architecture: Some(Mvc),
        steps: &[file("shared/mail.py", "app/mail.py")],
    },
    FeatureBranch {
        feature: Feature::Logging,
        framework: None,
        architecture: Some(Mvc),
        steps: &[file("shared/logging_config.py", "app/logging_config.py")],
    },
];

// ── Artifacts ────────────────────────────────────────────────────────────────

const DOCKER_STEPS: &[Blueprint] = &[
    file("shared/Dockerfile", "Dockerfile"),
    file("shared/docker-compose.yml", "docker-compose.yml"),
];

const CI_STEPS: &[Blueprint] = &[file("shared/ci.yml", ".github/workflows/ci.yml")];

#[derive(Debug, Clone, Copy)]
pub struct ArtifactPlan {
    pub artifact: Artifact,
    pub steps: &'static [Blueprint],
}

pub static ARTIFACT_PLANS: &[ArtifactPlan] = &[
    ArtifactPlan {
        artifact: Artifact::Docker,
        steps: DOCKER_STEPS,
    },
    ArtifactPlan {
        artifact: Artifact::Ci,
        steps: CI_STEPS,
    },
];

// ── Component slices ─────────────────────────────────────────────────────────

/// One generated file of an `add` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Model,
    Schema,
    Repository,
    Service,
    Route,
    Template,
    View,
    Form,
    Middleware,
    IndexPage,
    DetailPage,
    FormPage,
}

#[derive(Debug, Clone, Copy)]
pub struct SliceBlueprint {
    pub slice: Slice,
    pub framework: Option<Framework>,
    pub architecture: Architecture,
    pub template: &'static str,
    pub output: &'static str,
}

const fn slice(
    slice: Slice,
    framework: Option<Framework>,
    architecture: Architecture,
    template: &'static str,
    output: &'static str,
) -> SliceBlueprint {
    SliceBlueprint {
        slice,
        framework,
        architecture,
        template,
        output,
    }
}

pub static SLICES: &[SliceBlueprint] = &[
    // Clean
    slice(Slice::Model, Some(Flask), Clean, "flask/clean/model.py", "app/models/{name}.py"),
    slice(Slice::Model, Some(FastApi), Clean, "fastapi/clean/model.py", "app/models/{name}.py"),
    slice(Slice::Schema, Some(FastApi), Clean, "fastapi/clean/schema.py", "app/schemas/{name}.py"),
    slice(
        Slice::Repository,
        Some(Flask),
        Clean,
        "flask/clean/repository.py",
        "app/repositories/{name}_repository.py",
    ),
    slice(
        Slice::Repository,
        Some(FastApi),
        Clean,
        "fastapi/clean/repository.py",
        "app/repositories/{name}_repository.py",
    ),
    slice(
        Slice::Service,
        Some(Flask),
        Clean,
        "flask/clean/service.py",
        "app/services/{name}_service.py",
    ),
    slice(
        Slice::Service,
        Some(FastApi),
        Clean,
        "fastapi/clean/service.py",
        "app/services/{name}_service.py",
    ),
    slice(Slice::Route, Some(Flask), Clean, "flask/clean/route.py", "app/routes/{name}.py"),
    slice(Slice::Route, Some(FastApi), Clean, "fastapi/clean/router.py", "app/routes/{name}.py"),
    slice(
        Slice::Middleware,
        Some(FastApi),
        Clean,
        "fastapi/clean/middleware.py",
        "app/middleware/{name}.py",
    ),
    // MVC
    slice(Slice::Model, Some(Flask), Mvc, "flask/mvc/model.py", "app/models/{name}.py"),
    slice(Slice::Model, Some(FastApi), Mvc, "fastapi/mvc/model.py", "app/models/{name}.py"),
    slice(Slice::Route, Some(Flask), Mvc, "flask/mvc/route.py", "app/routes/{name}.py"),
    slice(Slice::Route, Some(FastApi), Mvc, "fastapi/mvc/router.py", "app/routers/{name}.py"),
    slice(Slice::Template, None, Mvc, "shared/views/page.html", "app/templates/{name}.html"),
    slice(Slice::View, Some(Flask), Mvc, "flask/mvc/view.py", "app/views/{name}.py"),
    slice(Slice::View, Some(FastApi), Mvc, "fastapi/mvc/view.py", "app/views/{name}.py"),
    slice(Slice::Form, Some(Flask), Mvc, "flask/mvc/form.py", "app/forms/{name}_form.py"),
    slice(
        Slice::Middleware,
        Some(FastApi),
        Mvc,
        "fastapi/mvc/middleware.py",
        "app/middleware/{name}.py",
    ),
    slice(
        Slice::IndexPage,
        None,
        Mvc,
        "shared/views/index.html",
        "app/templates/{name}/index.html",
    ),
    slice(
        Slice::DetailPage,
        None,
        Mvc,
        "shared/views/detail.html",
        "app/templates/{name}/detail.html",
    ),
    slice(
        Slice::FormPage,
        None,
        Mvc,
        "shared/views/form.html",
        "app/templates/{name}/form.html",
    ),
];

pub fn slice_blueprint(
    slice: Slice,
    framework: Framework,
    architecture: Architecture,
) -> Option<&'static SliceBlueprint> {
    SLICES.iter().find(|s| {
        s.slice == slice
            && s.architecture == architecture
            && s.framework.is_none_or(|f| f == framework)
    })
}

/// Slices a `resource` expands to.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRecipe {
    pub framework: Option<Framework>,
    pub architecture: Architecture,
    pub slices: &'static [Slice],
}

pub static RESOURCE_RECIPES: &[ResourceRecipe] = &[
    ResourceRecipe {
        framework: Some(Flask),
        architecture: Clean,
        slices: &[Slice::Model, Slice::Repository, Slice::Service, Slice::Route],
    },
    ResourceRecipe {
        framework: Some(FastApi),
        architecture: Clean,
        slices: &[
            Slice::Model,
            Slice::Schema,
            Slice::Repository,
            Slice::Service,
            Slice::Route,
        ],
    },
    ResourceRecipe {
        framework: None,
        architecture: Mvc,
        slices: &[
            Slice::Model,
            Slice::Route,
            Slice::IndexPage,
            Slice::DetailPage,
            Slice::FormPage,
        ],
    },
];

pub fn resource_recipe(
    framework: Framework,
    architecture: Architecture,
) -> Option<&'static ResourceRecipe> {
    RESOURCE_RECIPES
        .iter()
        .find(|r| r.architecture == architecture && r.framework.is_none_or(|f| f == framework))
}

// ── Requirements ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    Feature(Feature),
    SqlDatabase,
    Database(Database),
}

/// An extra `requirements.txt` line.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub trigger: Trigger,
    pub framework: Option<Framework>,
    pub package: &'static str,
}

const fn req(trigger: Trigger, framework: Option<Framework>, package: &'static str) -> Requirement {
    Requirement {
        trigger,
        framework,
        package,
    }
}

pub static REQUIREMENTS: &[Requirement] = &[
    req(Trigger::SqlDatabase, Some(Flask), "Flask-SQLAlchemy"),
    req(Trigger::SqlDatabase, Some(FastApi), "SQLAlchemy"),
    req(Trigger::Database(Database::Postgres), None, "psycopg2-binary"),
    req(Trigger::Database(Database::Mysql), None, "PyMySQL"),
    req(Trigger::Database(Database::Mongo), None, "pymongo"),
    req(Trigger::Feature(Feature::Orm), Some(Flask), "Flask-SQLAlchemy"),
    req(Trigger::Feature(Feature::Orm), Some(FastApi), "SQLAlchemy"),
    req(Trigger::Feature(Feature::Migrations), Some(Flask), "Flask-Migrate"),
    req(Trigger::Feature(Feature::Migrations), Some(FastApi), "alembic"),
    req(Trigger::Feature(Feature::Cache), Some(Flask), "Flask-Caching"),
    req(Trigger::Feature(Feature::Cache), None, "redis"),
    req(Trigger::Feature(Feature::BackgroundTasks), None, "celery"),
    req(Trigger::Feature(Feature::Mail), Some(Flask), "Flask-Mail"),
    req(Trigger::Feature(Feature::Mail), Some(FastApi), "fastapi-mail"),
    req(Trigger::Feature(Feature::JwtAuth), Some(Flask), "Flask-JWT-Extended"),
    req(Trigger::Feature(Feature::JwtAuth), Some(FastApi), "python-jose[cryptography]"),
    req(Trigger::Feature(Feature::JwtAuth), Some(FastApi), "passlib[bcrypt]"),
    req(Trigger::Feature(Feature::SessionAuth), Some(Flask), "Flask-Login"),
    req(Trigger::Feature(Feature::SessionAuth), Some(FastApi), "itsdangerous"),
    req(Trigger::Feature(Feature::Testing), None, "pytest"),
    req(Trigger::Feature(Feature::Testing), Some(FastApi), "httpx"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_combination_has_a_base_plan() {
        for framework in Framework::ALL {
            for arch in Architecture::ALL {
                assert!(base_plan(framework, arch).is_some(), "{framework} {arch}");
            }
        }
    }

    #[test]
    fn slice_outputs_are_name_templated() {
        for s in SLICES {
            assert!(s.output.contains("{name}"), "{} lacks {{name}}", s.template);
        }
    }

    #[test]
    fn resource_recipes_resolve() {
        for recipe in RESOURCE_RECIPES {
            let frameworks = recipe.framework.map_or(Framework::ALL.to_vec(), |f| vec![f]);
            for framework in frameworks {
                for slice in recipe.slices {
                    assert!(
                        slice_blueprint(*slice, framework, recipe.architecture).is_some(),
                        "{slice:?} missing for {framework} {}",
                        recipe.architecture
                    );
                }
            }
        }
    }

    #[test]
    fn conditions() {
        assert!(Condition::Always.holds(Database::None));
        assert!(Condition::HasDatabase.holds(Database::Mongo));
        assert!(!Condition::SqlDatabase.holds(Database::Mongo));
        assert!(Condition::SqlDatabase.holds(Database::Sqlite));
    }
}
