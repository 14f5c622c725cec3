//! Scaffold a new fuzzer project

use anyhow::{Context, Result};
use fuzzgen_scaffold::templates::parse_assignment;
use fuzzgen_scaffold::{
    ProjectScaffolder, ScaffoldConfig, ScaffoldRequest, TemplateRenderer, TemplateRepository,
    TemplateVars,
};
use tracing::debug;

use crate::cli::Cli;
use crate::output;

/// Create a new fuzzer project from the kind's template tree
pub fn run(cli: &Cli) -> Result<()> {
    let request = ScaffoldRequest::new(&cli.kind, cli.name.clone(), cli.target.clone())?;

    let config = ScaffoldConfig::load(cli.config.as_deref())?;

    let template_root = cli
        .template_root
        .as_deref()
        .or(config.template_root.as_deref());
    let repository = TemplateRepository::locate(template_root)?;

    let engine = cli.engine.or(config.engine).unwrap_or_default();
    debug!(
        "Using {} engine with templates from {}",
        engine,
        repository.root()
    );

    let mut cli_vars = Vec::with_capacity(cli.vars.len());
    for assignment in &cli.vars {
        cli_vars.push(parse_assignment(assignment)?);
    }
    let vars = TemplateVars::for_request(&request)
        .with_vars(config.variables)
        .with_vars(cli_vars);

    let scaffolder = ProjectScaffolder::new(repository, TemplateRenderer::with_engine(engine));
    let report = scaffolder
        .scaffold(&request, &vars)
        .with_context(|| format!("Failed to scaffold fuzzer '{}'", request.name()))?;

    if !cli.quiet {
        output::success(&format!(
            "Fuzzer '{}' created at {}",
            request.name(),
            report.destination
        ));
        output::kv("Kind", request.kind().as_str());
        output::kv("Files copied", &report.copied.files.to_string());
        for path in &report.rendered {
            output::kv("Rendered", path.as_str());
        }
    }

    Ok(())
}
