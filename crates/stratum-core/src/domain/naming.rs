//! Name normalization for generated components.
//!
//! User input like `products`, `OrderItems` or `categories` becomes a singular
//! canonical name plus the casing variants used in file names and in rendered
//! identifiers.

use heck::{ToSnakeCase, ToUpperCamelCase};
use std::fmt;

use crate::domain::DomainError;

// ── Singularization ──────────────────────────────────────────────────────────

/// Whole-word plurals the suffix rules would get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("thieves", "thief"),
    ("indices", "index"),
    ("statuses", "status"),
    ("buses", "bus"),
    ("viruses", "virus"),
    ("campuses", "campus"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("movies", "movie"),
    ("quizzes", "quiz"),
];

/// Words that have no distinct singular.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "feedback",
    "information",
    "media",
    "metadata",
    "news",
    "series",
    "settings",
    "species",
    "sheep",
    "fish",
];

/// Suffix rules, checked in order: `(plural suffix, replacement, min length)`.
const SUFFIX_RULES: &[(&str, &str, usize)] = &[
    ("ies", "y", 4),
    ("lves", "lf", 5),
    ("sses", "ss", 5),
    ("zzes", "zz", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 4),
];

/// Canonical singular English form of `word`.
///
/// Returns the input unchanged when it is already singular or no rule
/// applies. The first letter keeps its case, and an all-caps suffix stays
/// all-caps. Only the trailing word of a compound (`OrderItems`,
/// `order_items`) is affected.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_owned();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return match_first_letter(word, singular);
    }

    let candidate = SUFFIX_RULES
        .iter()
        .find(|(suffix, _, min)| lower.len() >= *min && lower.ends_with(suffix))
        .map(|(suffix, replacement, _)| replace_suffix(word, suffix.len(), replacement))
        .or_else(|| strip_plural_s(word, &lower));

    match candidate {
        // A rule that lands on another plural form would not be idempotent.
        Some(c) if !is_irregular_plural(&c) => c,
        _ => word.to_owned(),
    }
}

fn strip_plural_s(word: &str, lower: &str) -> Option<String> {
    let singular_ending = ["ss", "us", "is"].iter().any(|e| lower.ends_with(e));
    if lower.len() > 1 && lower.ends_with('s') && !singular_ending {
        Some(word[..word.len() - 1].to_owned())
    } else {
        None
    }
}

fn replace_suffix(word: &str, suffix_len: usize, replacement: &str) -> String {
    let (stem, suffix) = word.split_at(word.len() - suffix_len);
    if suffix.chars().all(|c| c.is_ascii_uppercase()) {
        format!("{stem}{}", replacement.to_ascii_uppercase())
    } else {
        format!("{stem}{replacement}")
    }
}

fn match_first_letter(original: &str, replacement: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        _ => replacement.to_owned(),
    }
}

fn is_irregular_plural(word: &str) -> bool {
    let lower = word.to_ascii_lowercase();
    IRREGULAR.iter().any(|(plural, _)| *plural == lower)
}

// ── Casing ───────────────────────────────────────────────────────────────────

/// `order item`, `order-item`, `orderItem` → `OrderItem`.
pub fn to_pascal_case(identifier: &str) -> String {
    identifier.to_upper_camel_case()
}

/// `OrderItem`, `order-item`, `Order Item` → `order_item`.
pub fn to_lower_snake(identifier: &str) -> String {
    identifier.to_snake_case()
}

// ── ComponentName ────────────────────────────────────────────────────────────

/// A validated, singularized component name with its casing variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    raw: String,
    singular: String,
    snake: String,
    pascal: String,
}

impl ComponentName {
    /// Parse user input. Rejects anything that is not an identifier made of
    /// letters, digits, `_` and `-` starting with a letter.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| DomainError::InvalidComponentName {
            name: raw.to_owned(),
            reason: reason.to_owned(),
        };

        let first = trimmed.chars().next().ok_or_else(|| invalid("name is empty"))?;
        if !first.is_ascii_alphabetic() {
            return Err(invalid("must start with a letter"));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(invalid(&format!("character '{bad}' is not allowed")));
        }

        let singular = singularize(trimmed);
        Ok(Self {
            raw: trimmed.to_owned(),
            snake: to_lower_snake(&singular),
            pascal: to_pascal_case(&singular),
            singular,
        })
    }

    /// Trimmed user input.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    /// File and module name: `order_item`.
    pub fn snake(&self) -> &str {
        &self.snake
    }

    /// Class name: `OrderItem`.
    pub fn pascal(&self) -> &str {
        &self.pascal
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.snake)
    }
}
