//! Overwrite policies handed to the core when a generated file exists.

use std::io::IsTerminal as _;
use std::path::Path;

use tracing::debug;

use stratum_core::application::{OverwriteDecision, OverwritePolicy};

use crate::cli::OverwriteArgs;
use crate::config::OverwriteMode;

/// `--force`.
pub struct AlwaysOverwrite;

impl OverwritePolicy for AlwaysOverwrite {
    fn decide(&self, path: &Path) -> OverwriteDecision {
        debug!(path = %path.display(), "overwriting existing file");
        OverwriteDecision::Overwrite
    }
}

/// `--skip-existing`, and the fallback when nobody can be asked.
pub struct NeverOverwrite;

impl OverwritePolicy for NeverOverwrite {
    fn decide(&self, path: &Path) -> OverwriteDecision {
        debug!(path = %path.display(), "keeping existing file");
        OverwriteDecision::Skip
    }
}

/// Ask on the terminal, defaulting to keep the file.
#[cfg(feature = "interactive")]
pub struct PromptOverwrite;

#[cfg(feature = "interactive")]
impl OverwritePolicy for PromptOverwrite {
    fn decide(&self, path: &Path) -> OverwriteDecision {
        let answer = dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact();

        match answer {
            Ok(true) => OverwriteDecision::Overwrite,
            Ok(false) => OverwriteDecision::Skip,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "prompt failed; keeping file");
                OverwriteDecision::Skip
            }
        }
    }
}

/// Flags first, then the configured mode.  `Prompt` degrades to `Never`
/// when stdin is not a terminal or the build has no prompts.
pub fn resolve_mode(args: OverwriteArgs, configured: OverwriteMode) -> OverwriteMode {
    let mode = if args.force {
        OverwriteMode::Always
    } else if args.skip_existing {
        OverwriteMode::Never
    } else {
        configured
    };

    if mode == OverwriteMode::Prompt && !can_prompt() {
        return OverwriteMode::Never;
    }
    mode
}

pub fn policy_for(mode: OverwriteMode) -> Box<dyn OverwritePolicy> {
    match mode {
        OverwriteMode::Always => Box::new(AlwaysOverwrite),
        OverwriteMode::Never => Box::new(NeverOverwrite),
        #[cfg(feature = "interactive")]
        OverwriteMode::Prompt => Box::new(PromptOverwrite),
        #[cfg(not(feature = "interactive"))]
        OverwriteMode::Prompt => Box::new(NeverOverwrite),
    }
}

/// Whether prompts can reach a person.
pub fn can_prompt() -> bool {
    cfg!(feature = "interactive") && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}
