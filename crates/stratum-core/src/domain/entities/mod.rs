pub mod assembly_plan;
pub mod common;
pub mod entry_point;
pub mod project_config;
pub mod render_context;

pub use crate::domain::DomainError;
pub use assembly_plan::{AssemblyPlan, PlanAction, PlanBuilder, TemplateKey};
pub use common::RelativePath;
pub use entry_point::{EntryPointDocument, Insertion};
pub use project_config::{CONFIG_FILE_NAME, ProjectConfig, ProjectConfigBuilder};
pub use render_context::RenderContext;
