//! Stratum Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stratum
//! backend scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stratum-cli (CLI)             │
//! │  (prompts, overwrite policy, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, Materializer,         │
//! │  Registrar)                             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (TemplateStore, Filesystem, Renderer,   │
//! │  ConfigStore, OverwritePolicy)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stratum-adapters (Infrastructure)     │
//! │ (BuiltinStore, LocalFilesystem, ...)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, AssemblyPlanner,        │
//! │  capabilities, blueprints)              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stratum_core::prelude::*;
//!
//! let config = ProjectConfig::builder()
//!     .name("My Shop")
//!     .framework(Framework::FastApi)
//!     .architecture(Architecture::Clean)
//!     .database(Database::Postgres)
//!     .feature(Feature::JwtAuth)
//!     .build()?;
//!
//! // Adapters are injected by the caller.
//! let service = ScaffoldService::new(store, renderer, filesystem, configs);
//! service.init_project(Path::new("./my_shop"), &config, &policy)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        AddReport, MaterializeReport, RegistrationOutcome, ScaffoldService,
        ports::{
            ConfigStore, Filesystem, OverwriteDecision, OverwritePolicy, TemplateRenderer,
            TemplateStore,
        },
    };
    pub use crate::domain::{
        Architecture, Artifact, AssemblyPlan, CONFIG_FILE_NAME, ComponentKind, ComponentName,
        Database, Feature, Framework, ProjectConfig, RenderContext, TemplateKey,
    };
    pub use crate::error::{StratumError, StratumResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
