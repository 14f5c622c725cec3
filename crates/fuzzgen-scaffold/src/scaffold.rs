//! Project scaffolding: copy a kind's template tree and render its templated files.

use crate::copy::{copy_tree_deferred, CopyStats};
use crate::error::{Error, Result};
use crate::repository::TemplateRepository;
use crate::templates::{TemplateRenderer, TemplateVars};
use crate::types::{ScaffoldRequest, TEMPLATED_FILES};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Outcome of a successful scaffold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub destination: Utf8PathBuf,
    pub copied: CopyStats,
    pub rendered: Vec<Utf8PathBuf>,
}

/// Creates fuzzer projects from a template repository
#[derive(Debug)]
pub struct ProjectScaffolder {
    repository: TemplateRepository,
    renderer: TemplateRenderer,
}

impl ProjectScaffolder {
    pub fn new(repository: TemplateRepository, renderer: TemplateRenderer) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    pub fn repository(&self) -> &TemplateRepository {
        &self.repository
    }

    /// Scaffold a project for `request`, rendering with `vars`.
    ///
    /// Nothing is written if the destination already exists or the kind has
    /// no template directory. A failure while rendering leaves the copied
    /// tree and any already-rendered files in place.
    pub fn scaffold(&self, request: &ScaffoldRequest, vars: &TemplateVars) -> Result<ScaffoldReport> {
        let destination = request.destination();

        if exists(&destination) {
            return Err(Error::already_exists(destination.as_str()));
        }

        let source = self.repository.require_kind_dir(request.kind())?;

        info!(
            "Scaffolding {} fuzzer '{}' into {}",
            request.kind(),
            request.name(),
            destination
        );

        let (copied, dir_modes) = copy_tree_deferred(&source, &destination)?;
        debug!(
            "Copied {} files, {} directories, {} symlinks from {}",
            copied.files, copied.dirs, copied.symlinks, source
        );

        // Directory modes go on last so read-only template dirs still take rendered files
        let rendered = self
            .renderer
            .render_all(&destination, TEMPLATED_FILES, vars);
        dir_modes.apply()?;
        let rendered = rendered?;

        Ok(ScaffoldReport {
            destination,
            copied,
            rendered,
        })
    }
}

/// Any entry counts, including a dangling symlink
fn exists(path: &Utf8Path) -> bool {
    path.symlink_metadata().is_ok()
}
