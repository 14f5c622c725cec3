//! # fuzzgen-scaffold
//!
//! Scaffolding library for fuzzgen providing:
//! - Fuzzer kinds and validated scaffold requests
//! - Template repository lookup
//! - Recursive template tree copy
//! - `.tmpl` rendering through ERB-style or Tera engines
//!
//! # Example
//!
//! ```no_run
//! use fuzzgen_scaffold::{
//!     ProjectScaffolder, ScaffoldRequest, TemplateRenderer, TemplateRepository, TemplateVars,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = TemplateRepository::locate(None)?;
//! let scaffolder = ProjectScaffolder::new(repository, TemplateRenderer::default());
//!
//! let request = ScaffoldRequest::new("go", "my-fuzzer", None)?;
//! let vars = TemplateVars::for_request(&request);
//! let report = scaffolder.scaffold(&request, &vars)?;
//! println!("created {}", report.destination);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod repository;
pub mod scaffold;
pub mod templates;
pub mod types;

pub use config::ScaffoldConfig;
pub use error::{Error, Result};
pub use repository::TemplateRepository;
pub use scaffold::{ProjectScaffolder, ScaffoldReport};
pub use templates::{EngineKind, TemplateEngine, TemplateRenderer, TemplateVars};
pub use types::{ScaffoldRequest, TemplateKind, TEMPLATED_FILES, TEMPLATE_SUFFIX};
