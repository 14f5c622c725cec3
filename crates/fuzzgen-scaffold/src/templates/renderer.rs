//! Renders `<path>.tmpl` sources in a copied tree into `<path>`.
//!
//! Handles:
//! - Reading the template source next to its target path
//! - Rendering through the configured [`TemplateEngine`]
//! - Writing the result with the source's permission bits, then removing the source

use super::{EngineKind, TemplateEngine, TemplateVars};
use crate::error::{Error, Result};
use crate::types::TEMPLATE_SUFFIX;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

/// Template renderer
#[derive(Debug)]
pub struct TemplateRenderer {
    engine: Box<dyn TemplateEngine>,
}

impl TemplateRenderer {
    /// Create a renderer backed by `engine`
    pub fn new(engine: Box<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    /// Create a renderer for a built-in engine
    pub fn with_engine(kind: EngineKind) -> Self {
        Self::new(kind.engine())
    }

    /// Render a string template with variables
    pub fn render_string(&self, name: &str, source: &str, vars: &TemplateVars) -> Result<String> {
        self.engine.render(name, source, vars)
    }

    /// Render `<root>/<relative>.tmpl` into `<root>/<relative>` and delete the source.
    pub fn render_file(
        &self,
        root: &Utf8Path,
        relative: &str,
        vars: &TemplateVars,
    ) -> Result<Utf8PathBuf> {
        let target = root.join(relative);
        let source = Utf8PathBuf::from(format!("{}{}", target, TEMPLATE_SUFFIX));

        let contents = fs::read_to_string(&source).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::missing_template(source.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        let permissions = fs::metadata(&source)?.permissions();

        let rendered = self.engine.render(relative, &contents, vars)?;

        fs::write(&target, rendered)?;
        fs::set_permissions(&target, permissions)?;
        fs::remove_file(&source)?;

        debug!("Rendered {} -> {}", source, target);
        Ok(target)
    }

    /// Render each file in order, stopping at the first failure.
    ///
    /// Files rendered before a failure are left on disk.
    pub fn render_all(
        &self,
        root: &Utf8Path,
        files: &[&str],
        vars: &TemplateVars,
    ) -> Result<Vec<Utf8PathBuf>> {
        files
            .iter()
            .map(|relative| self.render_file(root, relative, vars))
            .collect()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::with_engine(EngineKind::default())
    }
}
