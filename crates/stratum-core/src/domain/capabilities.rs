//! Capability registry.
//!
//! Every rule about which choices combine lives in one of three static
//! tables:
//!
//! - [`ARCHITECTURE_REGISTRY`]: features legal per architecture
//! - [`COMMAND_MATRIX`]: which `add` commands run on which framework and
//!   architecture, and what to suggest instead when they don't
//! - [`ENTRY_POINT_REGISTRY`]: which file receives endpoint registrations and
//!   how the registration block is spliced in
//!
//! # Adding a New Component Kind
//!
//! 1. Add the variant to `ComponentKind` in `value_objects.rs`
//! 2. Add its [`CommandRule`] rows here
//! 3. Add its slice rows in `blueprints.rs`

use crate::domain::value_objects::{Architecture, ComponentKind, Feature, Framework};

// ── Architecture definitions ─────────────────────────────────────────────────

/// Describes what an architecture allows at init time.
#[derive(Debug, Clone, Copy)]
pub struct ArchitectureDef {
    pub architecture: Architecture,

    /// Features the user may select. Anything else fails validation.
    pub allowed_features: &'static [Feature],
}

pub static ARCHITECTURE_REGISTRY: &[ArchitectureDef] = &[
    ArchitectureDef {
        architecture: Architecture::Clean,
        allowed_features: &[
            Feature::Orm,
            Feature::Migrations,
            Feature::Cache,
            Feature::BackgroundTasks,
            Feature::Mail,
            Feature::JwtAuth,
            Feature::Docker,
            Feature::Ci,
            Feature::Testing,
            Feature::Logging,
        ],
    },
    ArchitectureDef {
        architecture: Architecture::Mvc,
        allowed_features: &[
            Feature::Orm,
            Feature::Migrations,
            Feature::Mail,
            Feature::SessionAuth,
            Feature::Docker,
            Feature::Ci,
            Feature::Logging,
        ],
    },
    ArchitectureDef {
        architecture: Architecture::Minimal,
        allowed_features: &[Feature::Docker],
    },
];

pub fn architecture_def(architecture: Architecture) -> Option<&'static ArchitectureDef> {
    ARCHITECTURE_REGISTRY
        .iter()
        .find(|d| d.architecture == architecture)
}

/// Features legal for `architecture`, in catalog order.
pub fn allowed_features(architecture: Architecture) -> &'static [Feature] {
    architecture_def(architecture).map_or(&[], |d| d.allowed_features)
}

pub fn feature_allowed(architecture: Architecture, feature: Feature) -> bool {
    allowed_features(architecture).contains(&feature)
}

// ── Command matrix ───────────────────────────────────────────────────────────

/// Outcome of looking a command up in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied { suggestion: Option<ComponentKind> },
}

/// One row of the matrix. `framework: None` matches both frameworks.
#[derive(Debug, Clone, Copy)]
pub struct CommandRule {
    pub command: ComponentKind,
    pub framework: Option<Framework>,
    pub architecture: Architecture,
    pub verdict: Verdict,
}

const fn allow(
    command: ComponentKind,
    framework: Option<Framework>,
    architecture: Architecture,
) -> CommandRule {
    CommandRule {
        command,
        framework,
        architecture,
        verdict: Verdict::Allowed,
    }
}

const fn deny(
    command: ComponentKind,
    framework: Option<Framework>,
    architecture: Architecture,
    suggestion: Option<ComponentKind>,
) -> CommandRule {
    CommandRule {
        command,
        framework,
        architecture,
        verdict: Verdict::Denied { suggestion },
    }
}

use Architecture::{Clean, Mvc};
use ComponentKind as K;

/// Combinations with no row are denied without a suggestion. That covers
/// every command on the Minimal architecture.
pub static COMMAND_MATRIX: &[CommandRule] = &[
    // Clean
    allow(K::Service, None, Clean),
    allow(K::Repository, None, Clean),
    allow(K::Model, None, Clean),
    allow(K::Route, None, Clean),
    allow(K::Resource, None, Clean),
    deny(K::Template, None, Clean, Some(K::Route)),
    deny(K::View, None, Clean, Some(K::Route)),
    deny(K::Form, None, Clean, Some(K::Model)),
    allow(K::Middleware, Some(Framework::FastApi), Clean),
    deny(K::Middleware, Some(Framework::Flask), Clean, None),
    // MVC
    deny(K::Service, None, Mvc, Some(K::Model)),
    deny(K::Repository, None, Mvc, Some(K::Model)),
    allow(K::Model, None, Mvc),
    allow(K::Route, None, Mvc),
    allow(K::Resource, None, Mvc),
    allow(K::Template, None, Mvc),
    allow(K::View, None, Mvc),
    allow(K::Form, Some(Framework::Flask), Mvc),
    deny(K::Form, Some(Framework::FastApi), Mvc, Some(K::Template)),
    allow(K::Middleware, Some(Framework::FastApi), Mvc),
    deny(K::Middleware, Some(Framework::Flask), Mvc, None),
];

/// Look a command up in [`COMMAND_MATRIX`].
pub fn check_command(
    command: ComponentKind,
    framework: Framework,
    architecture: Architecture,
) -> Verdict {
    COMMAND_MATRIX
        .iter()
        .find(|r| {
            r.command == command
                && r.architecture == architecture
                && r.framework.is_none_or(|f| f == framework)
        })
        .map_or(Verdict::Denied { suggestion: None }, |r| r.verdict)
}

// ── Entry points ─────────────────────────────────────────────────────────────

/// Line the generated entry points carry at their insertion point.
pub const REGISTRATION_SENTINEL: &str =
    "# Additional blueprints will be registered here automatically";

/// How a registration block is spliced into the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionStrategy {
    /// Insert indented lines directly before the sentinel line.
    BeforeSentinel,
    /// Append a block at end of file, separated by a blank line.
    Append,
}

/// Where and how a framework/architecture pair registers endpoints.
///
/// The import and register patterns use `{name}` for the component's
/// snake-case name.
#[derive(Debug, Clone, Copy)]
pub struct EntryPointDef {
    pub framework: Framework,
    pub architecture: Architecture,
    pub path: &'static str,
    pub strategy: InsertionStrategy,
    /// Indentation the generated sentinel carries, and of appended blocks.
    pub indent: &'static str,
    pub import: &'static str,
    pub register: &'static str,
}

impl EntryPointDef {
    /// Import line for `name`; also the marker that identifies its block.
    pub fn import_line(&self, name: &str) -> String {
        self.import.replace("{name}", name)
    }

    pub fn register_line(&self, name: &str) -> String {
        self.register.replace("{name}", name)
    }
}

pub static ENTRY_POINT_REGISTRY: &[EntryPointDef] = &[
    EntryPointDef {
        framework: Framework::Flask,
        architecture: Clean,
        path: "app/routes/__init__.py",
        strategy: InsertionStrategy::BeforeSentinel,
        indent: "    ",
        import: "from app.routes.{name} import {name}_bp",
        register: "app.register_blueprint({name}_bp, url_prefix='/{name}')",
    },
    EntryPointDef {
        framework: Framework::Flask,
        architecture: Mvc,
        path: "app/__init__.py",
        strategy: InsertionStrategy::BeforeSentinel,
        indent: "    ",
        import: "from app.routes.{name} import {name}_bp",
        register: "app.register_blueprint({name}_bp, url_prefix='/{name}')",
    },
    EntryPointDef {
        framework: Framework::FastApi,
        architecture: Clean,
        path: "app/main.py",
        strategy: InsertionStrategy::Append,
        indent: "",
        import: "from app.routes.{name} import router as {name}_router",
        register: "app.include_router({name}_router, prefix='/api/v1/{name}', tags=['{name}'])",
    },
    EntryPointDef {
        framework: Framework::FastApi,
        architecture: Mvc,
        path: "app/main.py",
        strategy: InsertionStrategy::Append,
        indent: "",
        import: "from app.routers.{name} import router as {name}_router",
        register: "app.include_router({name}_router, prefix='/{name}', tags=['{name}'])",
    },
];

pub fn entry_point(
    framework: Framework,
    architecture: Architecture,
) -> Option<&'static EntryPointDef> {
    ENTRY_POINT_REGISTRY
        .iter()
        .find(|d| d.framework == framework && d.architecture == architecture)
}
