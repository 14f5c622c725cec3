//! Template repository lookup.
//!
//! A template repository is a directory holding one subdirectory per
//! [`TemplateKind`] (`go/`, `afl/`). When no root is given explicitly it is
//! searched for next to the executable and then in the working directory.

use crate::error::{Error, Result};
use crate::types::TemplateKind;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Directory name of the template repository
pub const TEMPLATE_DIR_NAME: &str = "template";

/// How many ancestors of the executable's directory are searched
const EXE_ANCESTOR_DEPTH: usize = 3;

/// A directory of per-kind template trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRepository {
    root: Utf8PathBuf,
}

impl TemplateRepository {
    /// Use `root` as the repository without checking it
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the repository.
    ///
    /// An explicit root is used as-is if it is a directory. Otherwise
    /// `template/` is searched beside the executable, in its first few
    /// ancestors, then in the working directory, and the first candidate
    /// holding at least one kind directory wins.
    pub fn locate(explicit: Option<&Utf8Path>) -> Result<Self> {
        match explicit {
            Some(root) if root.is_dir() => {
                debug!("Using template repository at {}", root);
                Ok(Self::new(root.to_owned()))
            }
            Some(root) => Err(Error::template_repository_not_found(root.as_str())),
            None => Self::search(&Self::default_candidates()),
        }
    }

    /// First candidate that is a directory with at least one kind directory
    fn search(candidates: &[Utf8PathBuf]) -> Result<Self> {
        for candidate in candidates {
            if !candidate.is_dir() {
                continue;
            }
            let repo = Self::new(candidate.clone());
            if repo.available_kinds().is_empty() {
                debug!("Skipping {}: no kind directories", candidate);
                continue;
            }
            debug!("Using template repository at {}", candidate);
            return Ok(repo);
        }

        let searched = candidates
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::template_repository_not_found(searched))
    }

    fn default_candidates() -> Vec<Utf8PathBuf> {
        let mut candidates = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| Utf8PathBuf::try_from(p).ok())
            .and_then(|p| p.parent().map(Utf8Path::to_owned))
        {
            for dir in exe_dir.ancestors().take(EXE_ANCESTOR_DEPTH + 1) {
                candidates.push(dir.join(TEMPLATE_DIR_NAME));
            }
        }

        candidates.push(Utf8PathBuf::from(TEMPLATE_DIR_NAME));
        candidates
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// `<root>/<kind>`
    pub fn kind_dir(&self, kind: TemplateKind) -> Utf8PathBuf {
        self.root.join(kind.as_str())
    }

    /// `<root>/<kind>`, failing if it is not a directory
    pub fn require_kind_dir(&self, kind: TemplateKind) -> Result<Utf8PathBuf> {
        let dir = self.kind_dir(kind);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::missing_kind_template(kind.as_str(), dir.as_str()))
        }
    }

    /// Kinds with a template directory in this repository
    pub fn available_kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::ALL
            .iter()
            .copied()
            .filter(|k| self.kind_dir(*k).is_dir())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_locate_explicit() {
        let temp = tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();

        let repo = TemplateRepository::locate(Some(&root)).unwrap();
        assert_eq!(repo.root(), root);
    }

    #[test]
    fn test_locate_explicit_missing() {
        let temp = tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().join("absent")).unwrap();

        let err = TemplateRepository::locate(Some(&root)).unwrap_err();
        match err {
            Error::TemplateRepositoryNotFound { searched } => {
                assert!(searched.contains("absent"))
            }
            other => panic!("Expected TemplateRepositoryNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_kind_dirs() {
        let temp = tempdir().unwrap();
        let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).unwrap();
        std::fs::create_dir(root.join("afl")).unwrap();

        let repo = TemplateRepository::new(root.clone());
        assert_eq!(repo.kind_dir(TemplateKind::Go), root.join("go"));
        assert_eq!(repo.available_kinds(), vec![TemplateKind::Afl]);
        assert!(repo.require_kind_dir(TemplateKind::Afl).is_ok());
        assert!(matches!(
            repo.require_kind_dir(TemplateKind::Go),
            Err(Error::MissingKindTemplate { .. })
        ));
    }

    #[test]
    fn test_search_skips_directory_without_kinds() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let decoy = root.join("bin/template");
        let real = root.join("template");
        std::fs::create_dir_all(&decoy).unwrap();
        std::fs::create_dir_all(real.join("go")).unwrap();

        let repo = TemplateRepository::search(&[decoy, real.clone()]).unwrap();
        assert_eq!(repo.root(), real);
    }

    #[test]
    fn test_search_only_decoys_fails() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let decoy = root.join("template");
        std::fs::create_dir_all(decoy.join("unrelated")).unwrap();

        let err = TemplateRepository::search(&[decoy, root.join("absent")]).unwrap_err();
        match err {
            Error::TemplateRepositoryNotFound { searched } => {
                assert!(searched.contains("template"));
                assert!(searched.contains("absent"));
            }
            other => panic!("Expected TemplateRepositoryNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_default_candidates_end_with_working_dir() {
        let candidates = TemplateRepository::default_candidates();
        assert_eq!(
            candidates.last(),
            Some(&Utf8PathBuf::from(TEMPLATE_DIR_NAME))
        );
        assert!(candidates.len() > 1);
    }

    #[test]
    #[serial]
    fn test_search_falls_back_to_working_dir() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        std::fs::create_dir_all(root.join("decoy")).unwrap();
        std::fs::create_dir_all(root.join("template/afl")).unwrap();

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(&root).unwrap();
        let result = TemplateRepository::search(&[
            root.join("decoy"),
            Utf8PathBuf::from(TEMPLATE_DIR_NAME),
        ]);
        std::env::set_current_dir(original).unwrap();

        let repo = result.unwrap();
        assert_eq!(repo.root(), Utf8Path::new(TEMPLATE_DIR_NAME));
        assert_eq!(repo.available_kinds(), vec![TemplateKind::Afl]);
    }
}
