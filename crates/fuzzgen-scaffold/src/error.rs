//! Error types for fuzzgen-scaffold

use thiserror::Error;

/// Result type alias using fuzzgen-scaffold's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Template kind not in the supported set
    #[error("Unknown fuzzer kind: '{kind}'. Available kinds: {available}")]
    InvalidKind { kind: String, available: String },

    /// Project name rejected
    #[error("Invalid fuzzer name: '{name}'")]
    InvalidName { name: String },

    /// Something is already present at the destination
    #[error("Fuzzer already exists at: {path}")]
    AlreadyExists { path: String },

    /// A `.tmpl` source expected after the copy was not there
    #[error("Template source missing: {path}")]
    MissingTemplate { path: String },

    /// The template repository has no directory for this kind
    #[error("No template directory for kind '{kind}' at: {path}")]
    MissingKindTemplate { kind: String, path: String },

    /// No template repository could be located
    #[error("Template repository not found. Searched: {searched}")]
    TemplateRepositoryNotFound { searched: String },

    /// Template referenced a variable the context does not define
    #[error("Unknown template variable '{variable}' in {template}")]
    UnknownVariable { variable: String, template: String },

    /// Template used a tag the engine cannot evaluate
    #[error("Unsupported template tag '{tag}' in {template}")]
    UnsupportedTag { tag: String, template: String },

    /// Malformed KEY=VALUE variable
    #[error("Invalid template variable '{input}': {reason}")]
    InvalidVariable { input: String, reason: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Template error from Tera
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    /// Directory walk error
    #[error("Failed to walk template tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid kind error
    pub fn invalid_kind(kind: impl Into<String>, available: impl Into<String>) -> Self {
        Self::InvalidKind {
            kind: kind.into(),
            available: available.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create an already exists error
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Create a missing template error
    pub fn missing_template(path: impl Into<String>) -> Self {
        Self::MissingTemplate { path: path.into() }
    }

    /// Create a missing kind template error
    pub fn missing_kind_template(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingKindTemplate {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Create a template repository not found error
    pub fn template_repository_not_found(searched: impl Into<String>) -> Self {
        Self::TemplateRepositoryNotFound {
            searched: searched.into(),
        }
    }

    /// Create an unknown variable error
    pub fn unknown_variable(variable: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UnknownVariable {
            variable: variable.into(),
            template: template.into(),
        }
    }

    /// Create an unsupported tag error
    pub fn unsupported_tag(tag: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UnsupportedTag {
            tag: tag.into(),
            template: template.into(),
        }
    }

    /// Create an invalid variable error
    pub fn invalid_variable(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVariable {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Whether this error should be followed by the usage line
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidKind { .. } | Self::InvalidName { .. })
    }
}
