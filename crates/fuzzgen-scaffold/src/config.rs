//! Optional `fuzzgen.yaml` configuration.
//!
//! ```yaml
//! template_root: /opt/maxfuzz/template
//! engine: erb
//! variables:
//!   owner: security-team
//! ```

use crate::error::{Error, Result};
use crate::templates::EngineKind;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

/// Configuration file names searched in the working directory
pub const CONFIG_FILE_NAMES: &[&str] = &["fuzzgen.yaml", "fuzzgen.yml"];

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "FUZZGEN_CONFIG";

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    /// Template repository root
    #[serde(default)]
    pub template_root: Option<Utf8PathBuf>,

    /// Template engine for `.tmpl` sources
    #[serde(default)]
    pub engine: Option<EngineKind>,

    /// Extra template variables
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl ScaffoldConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `FUZZGEN_CONFIG` is used,
    /// then `fuzzgen.yaml`/`fuzzgen.yml` in the working directory. No file
    /// at all yields the defaults.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            if !env_path.is_empty() {
                return Self::load_file(Utf8Path::new(&env_path));
            }
        }

        for name in CONFIG_FILE_NAMES {
            let candidate = Utf8Path::new(name);
            if candidate.is_file() {
                return Self::load_file(candidate);
            }
        }

        Ok(Self::default())
    }

    fn load_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        debug!("Loaded configuration from {}", path);
        Self::from_yaml(&content)
    }
}
