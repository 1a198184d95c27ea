//! Core domain layer for Stratum.
//!
//! Pure logic: no filesystem, no prompts, no rendering engine. Everything
//! that touches the outside world goes through the ports in
//! `crate::application::ports`.
//!
//! - `value_objects`: the closed choice sets (framework, architecture, ...)
//! - `capabilities`: which choices combine, and where endpoints register
//! - `blueprints`: what each choice generates
//! - `planner`: turns a configuration into an ordered `AssemblyPlan`
//! - `naming`: singularization and casing of component names
//! - `entities`: configuration, plan, render context, entry-point document

pub mod blueprints;
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod naming;
pub mod planner;
pub mod value_objects;

pub use entities::{
    AssemblyPlan, CONFIG_FILE_NAME, EntryPointDocument, Insertion, PlanAction, PlanBuilder,
    ProjectConfig, ProjectConfigBuilder, RelativePath, RenderContext, TemplateKey,
};

pub use error::{DomainError, ErrorCategory};

pub use naming::{ComponentName, singularize, to_lower_snake, to_pascal_case};

pub use planner::AssemblyPlanner;

pub use value_objects::{Architecture, Artifact, ComponentKind, Database, Feature, Framework};
