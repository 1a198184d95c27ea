// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported from several layers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: String },

    #[error("unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    #[error("Duplicate path in plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Guard Errors (combination not supported)
    // ========================================================================
    #[error("feature '{feature}' is not available for the {architecture} architecture")]
    FeatureNotAllowed {
        feature: String,
        architecture: String,
    },

    #[error("'{command}' is not supported for {framework} + {architecture}")]
    UnsupportedCommandForCombination {
        command: String,
        framework: String,
        architecture: String,
        /// Full alternative invocation, e.g. `stratum add model user`.
        suggestion: Option<String>,
    },

    // ========================================================================
    // Invariant Violations
    // ========================================================================
    #[error("Plan writes '{file}' before its directory '{directory}' exists")]
    PlanOrderViolation { file: String, directory: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Project names must contain at least one letter or digit".into(),
                "Example: stratum init --name \"My Shop\"".into(),
            ],
            Self::InvalidComponentName { .. } => vec![
                "Component names are identifiers: letters, digits, '_' or '-'".into(),
                "Example: stratum add resource products".into(),
            ],
            Self::UnknownValue { field, .. } => vec![
                format!("Run with --help to see accepted values for {field}"),
            ],
            Self::FeatureNotAllowed { architecture, .. } => vec![
                format!("Remove the feature or choose an architecture other than {architecture}"),
            ],
            Self::UnsupportedCommandForCombination { suggestion, .. } => match suggestion {
                Some(alternative) => vec![format!("Try: {alternative}")],
                None => vec![
                    "This architecture has no equivalent for that component".into(),
                    "Switch to the Clean Architecture layout for the full component set".into(),
                ],
            },
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidComponentName { .. }
            | Self::UnknownValue { .. } => ErrorCategory::Validation,
            Self::FeatureNotAllowed { .. } | Self::UnsupportedCommandForCombination { .. } => {
                ErrorCategory::Guard
            }
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PlanOrderViolation { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Guard,
    Validation,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_command_suggests_alternative() {
        let err = DomainError::UnsupportedCommandForCombination {
            command: "service".into(),
            framework: "Flask".into(),
            architecture: "MVC".into(),
            suggestion: Some("stratum add model payment".into()),
        };

        assert_eq!(err.category(), ErrorCategory::Guard);
        assert_eq!(err.suggestions(), vec!["Try: stratum add model payment"]);
        assert!(err.to_string().contains("Flask + MVC"));
    }

    #[test]
    fn plan_invariants_are_internal() {
        let err = DomainError::PlanOrderViolation {
            file: "app/main.py".into(),
            directory: "app".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
