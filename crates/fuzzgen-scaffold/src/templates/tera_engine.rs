//! Tera-backed engine for `{{ name }}` templates

use super::{TemplateEngine, TemplateVars};
use crate::error::Result;
use tera::Tera;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TeraEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateEngine for TeraEngine {
    fn render(&self, template_name: &str, source: &str, vars: &TemplateVars) -> Result<String> {
        debug!("Rendering {} with tera", template_name);
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(template_name, source)?;
        let rendered = tera.render(template_name, &vars.to_tera_context()?)?;
        Ok(rendered)
    }
}
