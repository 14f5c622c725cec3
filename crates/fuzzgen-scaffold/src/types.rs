//! Core types: fuzzer kinds, scaffold requests, and the templated file list.

use crate::error::{Error, Result};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Suffix marking a file that must be rendered before use
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Files rendered after the copy, in order, relative to the destination.
///
/// Each exists on disk as `<path>.tmpl` inside the copied tree.
pub const TEMPLATED_FILES: &[&str] = &[
    "start",
    "environment",
    "README.md",
    "docker/docker-compose.yml",
];

/// Kind of fuzzing harness, selecting the template subtree to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// go-fuzz harness
    Go,
    /// AFL harness
    Afl,
}

impl TemplateKind {
    /// Every supported kind
    pub const ALL: &'static [TemplateKind] = &[TemplateKind::Go, TemplateKind::Afl];

    /// Directory name under the template repository
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Go => "go",
            TemplateKind::Afl => "afl",
        }
    }

    /// Comma-separated list of kind names, for messages
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::invalid_kind(s, Self::available()))
    }
}

/// A validated scaffold invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    kind: TemplateKind,
    name: String,
    target: Option<String>,
}

impl ScaffoldRequest {
    /// Validate raw command-line input into a request.
    ///
    /// The name is only checked for emptiness; the target is kept verbatim.
    pub fn new(kind: &str, name: impl Into<String>, target: Option<String>) -> Result<Self> {
        let kind = kind.parse::<TemplateKind>()?;
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_name(name));
        }
        Ok(Self { kind, name, target })
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Destination directory: `target + name` by plain string concatenation.
    ///
    /// No separator is inserted, so `target = "out"` and `name = "proj"`
    /// yields `outproj`.
    pub fn destination(&self) -> Utf8PathBuf {
        match &self.target {
            Some(target) => Utf8PathBuf::from(format!("{}{}", target, self.name)),
            None => Utf8PathBuf::from(&self.name),
        }
    }
}
