//! Unified error handling for Stratum Core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions and a category the CLI maps to exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stratum Core operations.
#[derive(Debug, Error, Clone)]
pub enum StratumError {
    /// Business rule violations (invalid input, unsupported combination).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Orchestration and I/O failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StratumError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Stratum".into(),
                "Please report this issue at: https://github.com/cosecruz/stratum/issues".into(),
            ],
        }
    }

    /// Get error category for display and exit-code purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Guard => ErrorCategory::Guard,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Raised before anything was written; the project is untouched.
    pub fn is_guard(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Guard | ErrorCategory::Validation
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Combination or precondition not met.
    Guard,
    Validation,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type StratumResult<T> = Result<T, StratumError>;

/// Extension trait for adding context to foreign errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> StratumResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> StratumResult<T> {
        self.map_err(|e| StratumError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
