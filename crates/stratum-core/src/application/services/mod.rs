//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: initialize a project, add a component, generate an
//! artifact.

pub mod materializer;
pub mod registrar;
pub mod scaffold_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use materializer::{MaterializeReport, Materializer};
pub use registrar::{Registrar, RegistrationOutcome};
pub use scaffold_service::{AddReport, ScaffoldService};
