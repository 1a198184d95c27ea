//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{ProjectConfig, RenderContext, TemplateKey};
use crate::error::StratumResult;

/// Port for filesystem operations. All paths are absolute or relative to the
/// process working directory; services resolve them against the project root.
///
/// Implemented by:
/// - `stratum_adapters::filesystem::LocalFilesystem` (production)
/// - `stratum_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> StratumResult<()>;

    /// Replace the file's content atomically: readers see the old or the new
    /// content, never a truncated file.
    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()>;

    fn read_file(&self, path: &Path) -> StratumResult<String>;

    fn exists(&self, path: &Path) -> bool;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `stratum_adapters::template_store::BuiltinStore` (embedded catalog)
/// - `stratum_adapters::template_store::LayeredStore` (user overrides first)
pub trait TemplateStore: Send + Sync {
    /// Raw template content. Unknown keys are `ApplicationError::TemplateNotFound`.
    fn get(&self, key: &TemplateKey) -> StratumResult<String>;

    fn contains(&self, key: &TemplateKey) -> bool;

    /// Every key the store can serve, sorted.
    fn keys(&self) -> Vec<TemplateKey>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `stratum_adapters::renderer::SimpleRenderer` (`{{VAR}}` substitution)
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &RenderContext) -> StratumResult<String>;
}

/// Port for the persisted project configuration.
///
/// Implemented by:
/// - `stratum_adapters::config_store::JsonConfigStore`
pub trait ConfigStore: Send + Sync {
    /// Whole-or-nothing: a missing file, bad JSON or an unknown value is
    /// `ApplicationError::ConfigNotFound`.
    fn load(&self, path: &Path) -> StratumResult<ProjectConfig>;

    fn save(&self, path: &Path, config: &ProjectConfig) -> StratumResult<()>;
}

/// Answer to "this file already exists, write it anyway?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    Overwrite,
    Skip,
}

/// Decides per existing file. Injected by the caller so prompting stays in
/// the CLI.
#[cfg_attr(test, mockall::automock)]
pub trait OverwritePolicy {
    fn decide(&self, path: &Path) -> OverwriteDecision;
}
