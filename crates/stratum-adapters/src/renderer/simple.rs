//! Variable substitution renderer with conditional blocks.
//!
//! # Syntax
//!
//! - `{{KEY}}` → value of `KEY` in the render context. Keys are upper snake
//!   case; unknown keys stay as literal text.
//! - `{{#if KEY}} … {{else}} … {{/if}}` and `{{#unless KEY}} … {{/unless}}`.
//!   A key is truthy when it is set, non-empty and not `"false"`. Blocks nest.
//! - A line holding nothing but a block tag is dropped entirely, so block
//!   tags do not leave blank lines behind.
//!
//! Anything else between braces, such as Jinja's `{{ url_for('x') }}`, is
//! copied through untouched. Generated projects rely on this.

use stratum_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::StratumResult,
};
use tracing::{instrument, trace};

/// Renderer for the built-in catalog and user overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(len = template.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> StratumResult<String> {
        render(template, context)
            .map_err(|reason| ApplicationError::RenderingFailed { reason }.into())
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    Unless,
}

impl BlockKind {
    fn close_tag(self) -> &'static str {
        match self {
            Self::If => "/if",
            Self::Unless => "/unless",
        }
    }
}

#[derive(Debug)]
struct Frame {
    kind: BlockKind,
    holds: bool,
    in_else: bool,
}

impl Frame {
    fn emits(&self) -> bool {
        self.holds != self.in_else
    }
}

enum Tag<'t> {
    Open(BlockKind, &'t str),
    Else,
    Close(&'t str),
    Variable(&'t str),
    Other,
}

fn classify(inner: &str) -> Tag<'_> {
    if let Some(key) = inner.strip_prefix("#if ") {
        return Tag::Open(BlockKind::If, key.trim());
    }
    if let Some(key) = inner.strip_prefix("#unless ") {
        return Tag::Open(BlockKind::Unless, key.trim());
    }
    match inner {
        "else" => Tag::Else,
        "/if" | "/unless" => Tag::Close(inner),
        _ if is_key(inner) => Tag::Variable(inner),
        _ => Tag::Other,
    }
}

fn is_key(s: &str) -> bool {
    !s.is_empty()
        && s.starts_with(|c: char| c.is_ascii_uppercase())
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn truthy(context: &RenderContext, key: &str) -> bool {
    context
        .get(key)
        .is_some_and(|v| !v.is_empty() && v != "false")
}

struct Engine<'c> {
    context: &'c RenderContext,
    stack: Vec<Frame>,
    out: String,
}

impl<'c> Engine<'c> {
    fn active(&self) -> bool {
        self.stack.iter().all(Frame::emits)
    }

    /// Returns `true` when `inner` was a block tag.
    fn block(&mut self, inner: &str) -> Result<bool, String> {
        match classify(inner) {
            Tag::Open(kind, key) => {
                let value = truthy(self.context, key);
                self.stack.push(Frame {
                    kind,
                    holds: if kind == BlockKind::If { value } else { !value },
                    in_else: false,
                });
                Ok(true)
            }
            Tag::Else => {
                let frame = self
                    .stack
                    .last_mut()
                    .ok_or_else(|| "{{else}} outside of a block".to_owned())?;
                if frame.in_else {
                    return Err("duplicate {{else}} in one block".to_owned());
                }
                frame.in_else = true;
                Ok(true)
            }
            Tag::Close(tag) => {
                let frame = self
                    .stack
                    .pop()
                    .ok_or_else(|| format!("{{{{{tag}}}}} without an open block"))?;
                if frame.kind.close_tag() != tag {
                    return Err(format!(
                        "{{{{{tag}}}}} closes a block opened with {{{{#{}}}}}",
                        &frame.kind.close_tag()[1..]
                    ));
                }
                Ok(true)
            }
            Tag::Variable(_) | Tag::Other => Ok(false),
        }
    }

    fn line(&mut self, line: &str) -> Result<(), String> {
        let body = line.trim();
        if let Some(inner) = body
            .strip_prefix("{{")
            .and_then(|rest| rest.strip_suffix("}}"))
            .filter(|inner| !inner.contains("{{") && !inner.contains("}}"))
        {
            if self.block(inner)? {
                return Ok(());
            }
        }

        let mut rest = line;
        while let Some(start) = rest.find("{{") {
            let (before, from_open) = rest.split_at(start);
            self.emit(before);

            let after_open = &from_open[2..];
            // `{{{KEY}}}`: keep the outer brace, substitute the inner tag.
            if after_open.starts_with('{') {
                self.emit("{");
                rest = &from_open[1..];
                continue;
            }

            let Some(end) = after_open.find("}}") else {
                self.emit("{{");
                rest = after_open;
                continue;
            };
            let inner = &after_open[..end];
            rest = &after_open[end + 2..];

            if self.block(inner)? {
                continue;
            }
            match classify(inner) {
                Tag::Variable(key) => match self.context.get(key) {
                    Some(value) => {
                        let value = value.to_owned();
                        self.emit(&value);
                    }
                    None => {
                        trace!(key, "unknown placeholder left as is");
                        self.emit_tag(inner);
                    }
                },
                _ => self.emit_tag(inner),
            }
        }
        self.emit(rest);
        Ok(())
    }

    fn emit(&mut self, text: &str) {
        if self.active() {
            self.out.push_str(text);
        }
    }

    fn emit_tag(&mut self, inner: &str) {
        if self.active() {
            self.out.push_str("{{");
            self.out.push_str(inner);
            self.out.push_str("}}");
        }
    }
}

fn render(template: &str, context: &RenderContext) -> Result<String, String> {
    let mut engine = Engine {
        context,
        stack: Vec::new(),
        out: String::with_capacity(template.len()),
    };

    for line in template.split_inclusive('\n') {
        engine.line(line)?;
    }

    match engine.stack.last() {
        Some(frame) => Err(format!(
            "unclosed {{{{#{}}}}} block",
            &frame.kind.close_tag()[1..]
        )),
        None => Ok(engine.out),
    }
}
