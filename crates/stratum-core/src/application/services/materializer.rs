//! File Materializer - executes an assembly plan against the filesystem.

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::application::ports::{
    Filesystem, OverwriteDecision, OverwritePolicy, TemplateRenderer, TemplateStore,
};
use crate::domain::{AssemblyPlan, PlanAction, RelativePath, RenderContext, TemplateKey};
use crate::error::StratumResult;

/// What a plan execution did, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories: Vec<RelativePath>,
    pub written: Vec<RelativePath>,
    /// Existing files the overwrite policy chose to keep.
    pub declined: Vec<RelativePath>,
}

/// Runs plans. Borrowed ports; cheap to construct per command.
pub struct Materializer<'a> {
    store: &'a dyn TemplateStore,
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
}

impl<'a> Materializer<'a> {
    pub fn new(
        store: &'a dyn TemplateStore,
        renderer: &'a dyn TemplateRenderer,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Look up `key` and render it. Unknown keys fail with
    /// `ApplicationError::TemplateNotFound`.
    pub fn render(&self, key: &TemplateKey, context: &RenderContext) -> StratumResult<String> {
        let raw = self.store.get(key)?;
        self.renderer.render(&raw, context)
    }

    /// Execute `plan` under `root`, in order.
    ///
    /// Stops at the first error; files written before it stay on disk.
    #[instrument(skip_all, fields(root = %root.display(), actions = plan.len()))]
    pub fn execute(
        &self,
        root: &Path,
        plan: &AssemblyPlan,
        policy: &dyn OverwritePolicy,
    ) -> StratumResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        self.filesystem.create_dir_all(root)?;

        for action in plan.actions() {
            match action {
                PlanAction::Directory { path } => {
                    self.filesystem.create_dir_all(&path.under(root))?;
                    report.directories.push(path.clone());
                }
                PlanAction::File {
                    template,
                    output,
                    context,
                } => {
                    let target = output.under(root);
                    if self.filesystem.exists(&target)
                        && policy.decide(&target) == OverwriteDecision::Skip
                    {
                        info!(path = %output, "keeping existing file");
                        report.declined.push(output.clone());
                        continue;
                    }

                    let content = self.render(template, context)?;
                    self.filesystem.write_file(&target, &content)?;
                    debug!(path = %output, template = %template, "wrote file");
                    report.written.push(output.clone());
                }
            }
        }

        info!(
            written = report.written.len(),
            declined = report.declined.len(),
            "plan materialized"
        );
        Ok(report)
    }
}
