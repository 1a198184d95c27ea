//! Infrastructure adapters for Stratum.
//!
//! This crate implements the ports defined in `stratum-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod config_store;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use builtin_templates::{TEMPLATES_DIR_ENV, resolve_override_dir};
pub use config_store::JsonConfigStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
