//! Interactive questions for `stratum init`.
//!
//! Commands talk to a [`Prompter`] so the value-resolution logic can be
//! tested without a terminal.  The dialoguer implementation only exists in
//! builds with the `interactive` feature.

use stratum_core::domain::{Architecture, Database, Feature, Framework};

use crate::error::CliResult;

#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn project_name(&self) -> CliResult<String>;
    fn framework(&self, default: Framework) -> CliResult<Framework>;
    fn architecture(&self, default: Architecture) -> CliResult<Architecture>;
    fn database(&self, default: Database) -> CliResult<Database>;
    /// Offer `allowed`; `preselected` starts ticked.
    fn features(&self, allowed: &[Feature], preselected: &[Feature]) -> CliResult<Vec<Feature>>;
    fn confirm(&self, question: &str) -> CliResult<bool>;
}

/// The terminal prompter, or `None` when prompts are off or impossible.
pub fn terminal_prompter(enabled: bool) -> Option<Box<dyn Prompter>> {
    #[cfg(feature = "interactive")]
    {
        if enabled && crate::policy::can_prompt() {
            return Some(Box::new(dialog::DialoguerPrompter::default()));
        }
    }
    #[cfg(not(feature = "interactive"))]
    let _ = enabled;
    None
}

#[cfg(feature = "interactive")]
mod dialog {
    use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

    use super::*;

    #[derive(Default)]
    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
    }

    impl DialoguerPrompter {
        fn select<T: Copy + PartialEq + std::fmt::Display>(
            &self,
            prompt: &str,
            options: &[T],
            default: T,
        ) -> CliResult<T> {
            let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
            let start = options.iter().position(|o| *o == default).unwrap_or(0);
            let picked = Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(&labels)
                .default(start)
                .interact()?;
            Ok(options[picked])
        }
    }

    impl Prompter for DialoguerPrompter {
        fn project_name(&self) -> CliResult<String> {
            let name: String = Input::with_theme(&self.theme)
                .with_prompt("Project name")
                .validate_with(|input: &String| {
                    if input.chars().any(|c| c.is_ascii_alphanumeric()) {
                        Ok(())
                    } else {
                        Err("use at least one letter or digit")
                    }
                })
                .interact_text()?;
            Ok(name)
        }

        fn framework(&self, default: Framework) -> CliResult<Framework> {
            self.select("Framework", &Framework::ALL, default)
        }

        fn architecture(&self, default: Architecture) -> CliResult<Architecture> {
            self.select("Architecture", &Architecture::ALL, default)
        }

        fn database(&self, default: Database) -> CliResult<Database> {
            self.select("Database", &Database::ALL, default)
        }

        fn features(
            &self,
            allowed: &[Feature],
            preselected: &[Feature],
        ) -> CliResult<Vec<Feature>> {
            let labels: Vec<&str> = allowed.iter().map(Feature::label).collect();
            let checked: Vec<bool> = allowed.iter().map(|f| preselected.contains(f)).collect();
            let picked = MultiSelect::with_theme(&self.theme)
                .with_prompt("Features (space to toggle)")
                .items(&labels)
                .defaults(&checked)
                .interact()?;
            Ok(picked.into_iter().map(|i| allowed[i]).collect())
        }

        fn confirm(&self, question: &str) -> CliResult<bool> {
            Ok(Confirm::with_theme(&self.theme)
                .with_prompt(question)
                .default(true)
                .interact()?)
        }
    }
}
