//! Application layer for Stratum.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, Materializer, Registrar)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    AddReport, MaterializeReport, Materializer, Registrar, RegistrationOutcome, ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ConfigStore, Filesystem, OverwriteDecision, OverwritePolicy, TemplateRenderer, TemplateStore,
};

pub use error::ApplicationError;
