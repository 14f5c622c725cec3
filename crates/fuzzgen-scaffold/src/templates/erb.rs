//! ERB-style interpolation engine.
//!
//! Supports the subset of ERB the harness templates rely on:
//! - `<%= name %>` and `<%= @name %>` insert a variable
//! - `<%# ... %>` is a comment and renders to nothing
//! - `<%%` renders a literal `<%`
//!
//! Any other code tag is rejected rather than silently dropped.

use super::{TemplateEngine, TemplateVars, IDENTIFIER_RE};
use crate::error::{Error, Result};

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

/// Longest tag excerpt quoted in an error message
const TAG_EXCERPT_LEN: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct ErbEngine;

impl ErbEngine {
    pub fn new() -> Self {
        Self
    }
}

fn excerpt(tag: &str) -> String {
    if tag.chars().count() <= TAG_EXCERPT_LEN {
        tag.to_string()
    } else {
        let cut: String = tag.chars().take(TAG_EXCERPT_LEN).collect();
        format!("{}...", cut)
    }
}

impl TemplateEngine for ErbEngine {
    fn render(&self, template_name: &str, source: &str, vars: &TemplateVars) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];

            if let Some(literal) = after.strip_prefix('%') {
                out.push_str(OPEN);
                rest = literal;
                continue;
            }

            let end = after
                .find(CLOSE)
                .ok_or_else(|| Error::unsupported_tag(excerpt(&rest[start..]), template_name))?;
            let body = &after[..end];
            rest = &after[end + CLOSE.len()..];

            if body.starts_with('#') {
                continue;
            }

            let Some(expr) = body.strip_prefix('=') else {
                return Err(Error::unsupported_tag(
                    excerpt(&format!("{}{}{}", OPEN, body, CLOSE)),
                    template_name,
                ));
            };

            let expr = expr.trim();
            let ident = expr.strip_prefix('@').unwrap_or(expr);
            if !IDENTIFIER_RE.is_match(ident) {
                return Err(Error::unsupported_tag(
                    excerpt(&format!("{}{}{}", OPEN, body, CLOSE)),
                    template_name,
                ));
            }

            let value = vars
                .get(ident)
                .ok_or_else(|| Error::unknown_variable(ident, template_name))?;
            out.push_str(value);
        }

        out.push_str(rest);
        Ok(out)
    }
}
