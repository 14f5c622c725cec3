//! Template rendering for scaffolded fuzzer projects.
//!
//! Rendering is split into focused modules:
//! - `erb`: `<%= name %>` interpolation, the syntax the harness templates use
//! - `tera_engine`: Tera-backed engine for `{{ name }}` templates
//! - `renderer`: turns `<path>.tmpl` sources inside a copied tree into `<path>`
//!
//! Every engine receives its variables explicitly through [`TemplateVars`];
//! nothing is read from ambient state.
//!
//! # Example
//!
//! ```
//! use fuzzgen_scaffold::templates::{EngineKind, TemplateEngine, TemplateVars};
//! use fuzzgen_scaffold::TemplateKind;
//!
//! let vars = TemplateVars::new("my-fuzzer", TemplateKind::Go);
//! let engine = EngineKind::Erb.engine();
//! let out = engine
//!     .render("start", "echo <%= name %>", &vars)
//!     .unwrap();
//! assert_eq!(out, "echo my-fuzzer");
//! ```

pub mod erb;
pub mod renderer;
pub mod tera_engine;

pub use erb::ErbEngine;
pub use renderer::TemplateRenderer;
pub use tera_engine::TeraEngine;

use crate::error::{Error, Result};
use crate::types::{ScaffoldRequest, TemplateKind};
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Variable names provided by [`TemplateVars`] itself
const BUILTIN_VARS: &[&str] = &["name", "fuzzer_name", "kind", "date", "year"];

pub(crate) static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

/// Variables available to a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVars {
    pub name: String,
    pub fuzzer_name: String,
    pub kind: String,
    pub date: String,
    pub year: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create template variables with defaults
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        let name = name.into();
        let now = Local::now();
        Self {
            fuzzer_name: name.clone(),
            name,
            kind: kind.as_str().to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            year: now.format("%Y").to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Default variables for a request
    pub fn for_request(request: &ScaffoldRequest) -> Self {
        Self::new(request.name(), request.kind())
    }

    /// Add an extra variable. Built-in names cannot be overridden.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if BUILTIN_VARS.contains(&key.as_str()) {
            tracing::warn!("Ignoring override of built-in template variable '{}'", key);
            return self;
        }
        self.extra.insert(key, value.into());
        self
    }

    /// Add several extra variables
    pub fn with_vars<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        vars.into_iter()
            .fold(self, |acc, (k, v)| acc.with_var(k, v))
    }

    /// Look up a variable by name
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "fuzzer_name" => Some(&self.fuzzer_name),
            "kind" => Some(&self.kind),
            "date" => Some(&self.date),
            "year" => Some(&self.year),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Flatten into a single name -> value map
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        for key in BUILTIN_VARS {
            if let Some(value) = self.get(key) {
                map.insert((*key).to_string(), value.to_string());
            }
        }
        map
    }

    /// Convert to Tera context for template rendering
    pub fn to_tera_context(&self) -> Result<tera::Context> {
        let context = tera::Context::from_serialize(self.to_map())?;
        Ok(context)
    }
}

/// Parse a `KEY=VALUE` assignment as given on the command line.
///
/// The key must be an identifier; the value may be empty and may contain `=`.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| Error::invalid_variable(input, "expected KEY=VALUE"))?;

    if !IDENTIFIER_RE.is_match(key) {
        return Err(Error::invalid_variable(
            input,
            "key must start with a letter or underscore and contain only letters, digits, or underscores",
        ));
    }

    Ok((key.to_string(), value.to_string()))
}

/// A template engine: source text plus variables in, rendered text out
pub trait TemplateEngine: fmt::Debug + Send + Sync {
    /// Render `source`. `template_name` is used in error messages only.
    fn render(&self, template_name: &str, source: &str, vars: &TemplateVars) -> Result<String>;
}

/// Selectable template engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// `<%= name %>` interpolation
    #[default]
    Erb,
    /// Tera `{{ name }}` templates
    Tera,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Erb => "erb",
            EngineKind::Tera => "tera",
        }
    }

    /// Instantiate the engine
    pub fn engine(&self) -> Box<dyn TemplateEngine> {
        match self {
            EngineKind::Erb => Box::new(ErbEngine::new()),
            EngineKind::Tera => Box::new(TeraEngine::new()),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "erb" => Ok(EngineKind::Erb),
            "tera" => Ok(EngineKind::Tera),
            other => Err(format!("unknown engine '{}', expected erb or tera", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_vars_new() {
        let vars = TemplateVars::new("test-fuzzer", TemplateKind::Afl);
        assert_eq!(vars.name, "test-fuzzer");
        assert_eq!(vars.fuzzer_name, "test-fuzzer");
        assert_eq!(vars.kind, "afl");
        assert_eq!(vars.year.len(), 4);
        assert_eq!(vars.date.len(), 10);
    }

    #[test]
    fn test_extra_vars_do_not_override_builtins() {
        let vars = TemplateVars::new("real", TemplateKind::Go)
            .with_var("name", "fake")
            .with_var("owner", "security-team");

        assert_eq!(vars.get("name"), Some("real"));
        assert_eq!(vars.get("owner"), Some("security-team"));
        assert!(!vars.extra.contains_key("name"));
    }

    #[test]
    fn test_to_map_contains_all() {
        let vars = TemplateVars::new("f", TemplateKind::Go).with_vars([("a", "1"), ("b", "2")]);
        let map = vars.to_map();
        for key in ["name", "fuzzer_name", "kind", "date", "year", "a", "b"] {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("owner=team").unwrap(),
            ("owner".to_string(), "team".to_string())
        );
        assert_eq!(
            parse_assignment("opts=-m=none").unwrap(),
            ("opts".to_string(), "-m=none".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_bad_input() {
        for input in ["novalue", "=x", "1abc=x", "with-dash=x", "sp ace=x"] {
            assert!(
                matches!(parse_assignment(input), Err(Error::InvalidVariable { .. })),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("erb".parse::<EngineKind>().unwrap(), EngineKind::Erb);
        assert_eq!("tera".parse::<EngineKind>().unwrap(), EngineKind::Tera);
        assert!("jinja".parse::<EngineKind>().is_err());
        assert_eq!(EngineKind::default(), EngineKind::Erb);
    }
}
