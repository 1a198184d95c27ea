//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stratum_core::domain::{
    Architecture as CoreArchitecture, Artifact as CoreArtifact, ComponentKind as CoreKind,
    Database as CoreDatabase, Feature as CoreFeature, Framework as CoreFramework,
};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stratum",
    bin_name = "stratum",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Backend scaffolding with incremental vertical slices",
    long_about = "Stratum generates Flask and FastAPI projects in a chosen \
                  architecture, then grows them one component at a time.",
    after_help = "EXAMPLES:\n\
        \x20 stratum init --name shop --framework fastapi --architecture clean -y\n\
        \x20 stratum add resource products --project-dir shop\n\
        \x20 stratum gen docker --project-dir shop\n\
        \x20 stratum completions bash > /usr/share/bash-completion/completions/stratum",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "new",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 stratum init                                  # interactive\n\
            \x20 stratum init --name blog --framework flask --architecture mvc -y\n\
            \x20 stratum init --name api --framework fastapi --database postgres \\\n\
            \x20              --feature jwt-auth --feature docker -y"
    )]
    Init(InitArgs),

    /// Add a component to an existing project.
    #[command(
        about = "Add a component to an existing project",
        after_help = "EXAMPLES:\n\
            \x20 stratum add resource products\n\
            \x20 stratum add route users --project-dir ./shop\n\
            \x20 stratum add model payment --skip-existing"
    )]
    Add(AddArgs),

    /// Generate deployment or CI files.
    #[command(
        visible_alias = "g",
        about = "Generate Docker or CI files",
        after_help = "EXAMPLES:\n\
            \x20 stratum gen docker\n\
            \x20 stratum gen ci --project-dir ./shop --force"
    )]
    Gen(GenArgs),

    /// Manage the Stratum tool configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stratum config get defaults.framework\n\
            \x20 stratum config list\n\
            \x20 stratum config init"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stratum completions bash > ~/.local/share/bash-completion/completions/stratum\n\
            \x20 stratum completions zsh  > ~/.zfunc/_stratum\n\
            \x20 stratum completions fish > ~/.config/fish/completions/stratum.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Commands that run without loading the tool configuration.
    pub fn reads_config(&self) -> bool {
        !matches!(
            self,
            Self::Completions(_) | Self::Config(ConfigCommands::Init { .. })
        )
    }
}

// ── shared ────────────────────────────────────────────────────────────────────

/// What to do with files that already exist.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OverwriteArgs {
    /// Overwrite existing files without asking.
    #[arg(
        long = "force",
        conflicts_with = "skip_existing",
        help = "Overwrite existing files"
    )]
    pub force: bool,

    /// Keep every existing file without asking.
    #[arg(long = "skip-existing", help = "Never overwrite existing files")]
    pub skip_existing: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stratum init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Human-readable project name. The directory is its lower snake case.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long = "framework",
        value_enum,
        value_name = "FRAMEWORK",
        help = "Web framework"
    )]
    pub framework: Option<Framework>,

    #[arg(
        short = 'a',
        long = "architecture",
        visible_alias = "arch",
        value_enum,
        value_name = "ARCH",
        help = "Project architecture"
    )]
    pub architecture: Option<Architecture>,

    #[arg(
        short = 'd',
        long = "database",
        visible_alias = "db",
        value_enum,
        value_name = "DB",
        help = "Database backend"
    )]
    pub database: Option<Database>,

    /// Optional features; repeat the flag or separate with commas.
    #[arg(
        long = "feature",
        value_enum,
        value_delimiter = ',',
        value_name = "FEATURE",
        help = "Enable a feature (repeatable)"
    )]
    pub features: Vec<Feature>,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,

    /// Skip prompts; unspecified values come from the tool configuration.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Accept defaults for anything not given on the command line"
    )]
    pub yes: bool,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `stratum add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(value_enum, value_name = "KIND", help = "Component kind")]
    pub kind: ComponentKind,

    /// Component name; plural names are singularized.
    #[arg(value_name = "NAME", help = "Component name")]
    pub name: String,

    #[arg(
        short = 'p',
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root containing stratum.json"
    )]
    pub project_dir: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

// ── gen ───────────────────────────────────────────────────────────────────────

/// Arguments for `stratum gen`.
#[derive(Debug, Args)]
pub struct GenArgs {
    #[arg(value_enum, value_name = "ARTIFACT", help = "What to generate")]
    pub artifact: Artifact,

    #[arg(
        short = 'p',
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project root containing stratum.json"
    )]
    pub project_dir: PathBuf,

    #[command(flatten)]
    pub overwrite: OverwriteArgs,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stratum completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stratum config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the built-in defaults.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Framework {
    Flask,
    #[value(name = "fastapi", alias = "fast-api")]
    FastApi,
}

impl From<Framework> for CoreFramework {
    fn from(value: Framework) -> Self {
        match value {
            Framework::Flask => Self::Flask,
            Framework::FastApi => Self::FastApi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Architecture {
    Clean,
    Mvc,
    Minimal,
}

impl From<Architecture> for CoreArchitecture {
    fn from(value: Architecture) -> Self {
        match value {
            Architecture::Clean => Self::Clean,
            Architecture::Mvc => Self::Mvc,
            Architecture::Minimal => Self::Minimal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Database {
    Sqlite,
    #[value(alias = "postgresql")]
    Postgres,
    Mysql,
    #[value(alias = "mongodb")]
    Mongo,
    None,
}

impl From<Database> for CoreDatabase {
    fn from(value: Database) -> Self {
        match value {
            Database::Sqlite => Self::Sqlite,
            Database::Postgres => Self::Postgres,
            Database::Mysql => Self::Mysql,
            Database::Mongo => Self::Mongo,
            Database::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Feature {
    Orm,
    Migrations,
    Cache,
    BackgroundTasks,
    Mail,
    JwtAuth,
    SessionAuth,
    Docker,
    Ci,
    Testing,
    Logging,
}

impl From<Feature> for CoreFeature {
    fn from(value: Feature) -> Self {
        match value {
            Feature::Orm => Self::Orm,
            Feature::Migrations => Self::Migrations,
            Feature::Cache => Self::Cache,
            Feature::BackgroundTasks => Self::BackgroundTasks,
            Feature::Mail => Self::Mail,
            Feature::JwtAuth => Self::JwtAuth,
            Feature::SessionAuth => Self::SessionAuth,
            Feature::Docker => Self::Docker,
            Feature::Ci => Self::Ci,
            Feature::Testing => Self::Testing,
            Feature::Logging => Self::Logging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentKind {
    Service,
    #[value(alias = "repo")]
    Repository,
    Model,
    #[value(alias = "router")]
    Route,
    Resource,
    Template,
    View,
    Form,
    Middleware,
}

impl From<ComponentKind> for CoreKind {
    fn from(value: ComponentKind) -> Self {
        match value {
            ComponentKind::Service => Self::Service,
            ComponentKind::Repository => Self::Repository,
            ComponentKind::Model => Self::Model,
            ComponentKind::Route => Self::Route,
            ComponentKind::Resource => Self::Resource,
            ComponentKind::Template => Self::Template,
            ComponentKind::View => Self::View,
            ComponentKind::Form => Self::Form,
            ComponentKind::Middleware => Self::Middleware,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    Docker,
    #[value(alias = "github-actions")]
    Ci,
}

impl From<Artifact> for CoreArtifact {
    fn from(value: Artifact) -> Self {
        match value {
            Artifact::Docker => Self::Docker,
            Artifact::Ci => Self::Ci,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
