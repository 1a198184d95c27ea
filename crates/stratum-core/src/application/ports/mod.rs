//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `stratum-adapters` implement the storage, rendering and
//! filesystem ports; the CLI implements the overwrite policy.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation and whole-file I/O
//!   - `TemplateStore`: template key → raw content
//!   - `TemplateRenderer`: raw content + context → file content
//!   - `ConfigStore`: load/save `stratum.json`
//!   - `OverwritePolicy`: what to do when a generated file already exists

pub mod output;

pub use output::{
    ConfigStore, Filesystem, OverwriteDecision, OverwritePolicy, TemplateRenderer, TemplateStore,
};

#[cfg(test)]
pub use output::MockOverwritePolicy;
