//! Structured view of a generated entry-point file.
//!
//! The registration record is never stored on its own. It is read back out of
//! the entry point each time: a component counts as registered when its exact
//! import line is present as a line of the file.

use crate::domain::capabilities::{EntryPointDef, InsertionStrategy, REGISTRATION_SENTINEL};

/// Result of asking the document to take one more registration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    AlreadyPresent,
    SentinelMissing,
}

/// An entry-point file split into lines, with the rules from its
/// [`EntryPointDef`].
///
/// `parse` followed by `render` reproduces the input byte for byte.
#[derive(Debug, Clone)]
pub struct EntryPointDocument {
    def: &'static EntryPointDef,
    lines: Vec<String>,
}

impl EntryPointDocument {
    pub fn parse(def: &'static EntryPointDef, text: &str) -> Self {
        Self {
            def,
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_registered(&self, name: &str) -> bool {
        let marker = self.def.import_line(name);
        self.lines.iter().any(|line| line.trim() == marker)
    }

    /// Position of the sentinel line, if the file still has one.
    pub fn sentinel_index(&self) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.trim() == REGISTRATION_SENTINEL)
    }

    /// Splice the registration block for `name` in.
    pub fn insert(&mut self, name: &str) -> Insertion {
        if self.is_registered(name) {
            return Insertion::AlreadyPresent;
        }

        let def = self.def;
        let block = |indent: &str| {
            [
                format!("{indent}{}", def.import_line(name)),
                format!("{indent}{}", def.register_line(name)),
            ]
        };

        match def.strategy {
            InsertionStrategy::BeforeSentinel => {
                let Some(at) = self.sentinel_index() else {
                    return Insertion::SentinelMissing;
                };
                // Follow the sentinel's own indentation, even if re-indented.
                let sentinel = &self.lines[at];
                let indent = &sentinel[..sentinel.len() - sentinel.trim_start().len()];
                let block = block(indent);
                self.lines.splice(at..at, block);
            }
            InsertionStrategy::Append => {
                let block = block(def.indent);
                if self.lines.last().is_some_and(|l| l.is_empty()) {
                    self.lines.pop();
                }
                self.lines.push(String::new());
                self.lines.extend(block);
                self.lines.push(String::new());
            }
        }

        Insertion::Inserted
    }
}
