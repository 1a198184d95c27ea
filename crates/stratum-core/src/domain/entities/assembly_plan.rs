use std::collections::HashSet;
use std::fmt;

use crate::domain::entities::common::RelativePath;
use crate::domain::entities::render_context::RenderContext;
use crate::domain::error::DomainError;

/// Path-like identifier of a template asset, e.g. `flask/clean/app/__init__.py`
/// or `shared/Dockerfile`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey(String);

impl TemplateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One step of an [`AssemblyPlan`].
#[derive(Debug, Clone)]
pub enum PlanAction {
    Directory {
        path: RelativePath,
    },
    File {
        template: TemplateKey,
        output: RelativePath,
        context: RenderContext,
    },
}

impl PlanAction {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::Directory { path } => path,
            Self::File { output, .. } => output,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

/// Ordered list of directory and file actions for one command.
///
/// Ephemeral: computed, executed, dropped.
///
/// Invariants (checked by [`AssemblyPlan::validate`]):
/// - every file's ancestor directories appear earlier as directory actions
/// - no output path appears twice
#[derive(Debug, Clone, Default)]
pub struct AssemblyPlan {
    actions: Vec<PlanAction>,
}

impl AssemblyPlan {
    pub fn builder() -> PlanBuilder {
        PlanBuilder::default()
    }

    pub fn actions(&self) -> &[PlanAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = (&TemplateKey, &RelativePath)> {
        self.actions.iter().filter_map(|a| match a {
            PlanAction::File {
                template, output, ..
            } => Some((template, output)),
            PlanAction::Directory { .. } => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.actions.iter().filter_map(|a| match a {
            PlanAction::Directory { path } => Some(path),
            PlanAction::File { .. } => None,
        })
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut dirs = HashSet::new();
        let mut outputs = HashSet::new();

        for action in &self.actions {
            match action {
                PlanAction::Directory { path } => {
                    dirs.insert(path.clone());
                }
                PlanAction::File { output, .. } => {
                    if let Some(missing) = output.ancestors().into_iter().find(|d| !dirs.contains(d))
                    {
                        return Err(DomainError::PlanOrderViolation {
                            file: output.to_string(),
                            directory: missing.to_string(),
                        });
                    }
                    if !outputs.insert(output.clone()) {
                        return Err(DomainError::DuplicatePath {
                            path: output.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Accumulates actions while keeping the ordering invariant.
///
/// Adding a file first adds any ancestor directory not yet in the plan.
/// Directory actions are deduplicated; duplicate file outputs are kept so
/// `build` can report them.
#[derive(Debug, Default)]
pub struct PlanBuilder {
    actions: Vec<PlanAction>,
    dirs: HashSet<RelativePath>,
}

impl PlanBuilder {
    pub fn directory(&mut self, path: RelativePath) -> &mut Self {
        for ancestor in path.ancestors() {
            self.push_dir(ancestor);
        }
        self.push_dir(path);
        self
    }

    pub fn file(
        &mut self,
        template: TemplateKey,
        output: RelativePath,
        context: RenderContext,
    ) -> &mut Self {
        for ancestor in output.ancestors() {
            self.push_dir(ancestor);
        }
        self.actions.push(PlanAction::File {
            template,
            output,
            context,
        });
        self
    }

    fn push_dir(&mut self, path: RelativePath) {
        if self.dirs.insert(path.clone()) {
            self.actions.push(PlanAction::Directory { path });
        }
    }

    pub fn build(self) -> Result<AssemblyPlan, DomainError> {
        let plan = AssemblyPlan {
            actions: self.actions,
        };
        plan.validate()?;
        Ok(plan)
    }
}
