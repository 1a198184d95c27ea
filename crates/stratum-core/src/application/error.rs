//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading, rendering or writing.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// `stratum.json` is absent or unreadable. Raised before any mutation.
    #[error("No usable project configuration at {path}: {reason}")]
    ConfigNotFound { path: PathBuf, reason: String },

    /// A plan referenced a template key the catalog does not have.
    #[error("Template '{key}' not found")]
    TemplateNotFound { key: String },

    /// A template body was malformed (unbalanced conditional block).
    #[error("Failed to render template: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Configuration could not be serialized.
    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigNotFound { path, .. } => vec![
                format!("Expected a Stratum project configuration at {}", path.display()),
                "Run this command from the project root or pass --project-dir".into(),
                "Create a project first with: stratum init".into(),
            ],
            Self::TemplateNotFound { key } => vec![
                format!("The template catalog has no entry for '{key}'"),
                "Check STRATUM_TEMPLATES_DIR or templates.local_path if you override templates"
                    .into(),
                "Files written before this point were kept; inspect the project".into(),
            ],
            Self::RenderingFailed { .. } => vec![
                "A template override may be malformed; check its {{#if}}/{{/if}} blocks".into(),
                "Files written before this point were kept; inspect the project".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before this point were kept; inspect the project".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::SerializationFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } => ErrorCategory::Guard,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::SerializationFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
