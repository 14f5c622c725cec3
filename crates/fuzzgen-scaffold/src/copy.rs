//! Recursive template tree copy.
//!
//! Copies directories, regular files (contents and permission bits), and
//! symlinks (recreated as links on unix, followed elsewhere).

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::trace;
use walkdir::WalkDir;

/// What a copy produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    pub symlinks: usize,
}

/// Directory permission bits captured during a copy, applied once the
/// tree is filled in so read-only directories can still receive entries.
#[derive(Debug, Default)]
#[must_use = "directory modes are only set by calling apply"]
pub struct DirModes(Vec<(Utf8PathBuf, fs::Permissions)>);

impl DirModes {
    /// Set every captured mode, deepest directory first
    pub fn apply(self) -> Result<()> {
        for (dir, permissions) in self.0.into_iter().rev() {
            fs::set_permissions(&dir, permissions)?;
        }
        Ok(())
    }
}

/// Copy `src` recursively to `dst`, creating `dst` and any missing parents.
pub fn copy_tree(src: &Utf8Path, dst: &Utf8Path) -> Result<CopyStats> {
    let (stats, modes) = copy_tree_deferred(src, dst)?;
    modes.apply()?;
    Ok(stats)
}

/// Like [`copy_tree`] but leaves directories writable, returning their
/// source modes for the caller to apply after further writes.
pub fn copy_tree_deferred(src: &Utf8Path, dst: &Utf8Path) -> Result<(CopyStats, DirModes)> {
    let mut stats = CopyStats::default();
    let mut modes = DirModes::default();

    for entry in WalkDir::new(src).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::invalid_path(entry.path().display().to_string()))?;
        let relative = Utf8Path::from_path(relative)
            .ok_or_else(|| Error::invalid_path(entry.path().display().to_string()))?;
        let target: Utf8PathBuf = if relative.as_str().is_empty() {
            dst.to_owned()
        } else {
            dst.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
            modes.0.push((target.clone(), entry.metadata()?.permissions()));
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            stats.symlinks += 1;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            stats.files += 1;
        }
        trace!("Copied {}", target);
    }

    Ok((stats, modes))
}

#[cfg(unix)]
fn copy_symlink(src: &std::path::Path, dst: &Utf8Path) -> Result<()> {
    let link = fs::read_link(src)?;
    std::os::unix::fs::symlink(link, dst)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &std::path::Path, dst: &Utf8Path) -> Result<()> {
    if fs::metadata(src)?.is_dir() {
        let src = Utf8Path::from_path(src)
            .ok_or_else(|| Error::invalid_path(src.display().to_string()))?;
        copy_tree(src, dst)?;
    } else {
        fs::copy(src, dst)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    #[test]
    fn test_copies_nested_tree() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let src = root.join("template/go");
        fs::create_dir_all(src.join("docker")).unwrap();
        fs::create_dir_all(src.join("corpus")).unwrap();
        fs::write(src.join("start.tmpl"), "start").unwrap();
        fs::write(src.join("docker/Dockerfile"), "FROM scratch\n").unwrap();
        fs::write(src.join("corpus/seed"), [0u8, 1, 2, 255]).unwrap();

        let dst = root.join("out/my-fuzzer");
        let stats = copy_tree(&src, &dst).unwrap();

        assert_eq!(stats.files, 3);
        assert_eq!(stats.dirs, 3);
        assert_eq!(fs::read(dst.join("corpus/seed")).unwrap(), vec![0u8, 1, 2, 255]);
        assert_eq!(
            fs::read_to_string(dst.join("docker/Dockerfile")).unwrap(),
            "FROM scratch\n"
        );
    }

    #[test]
    fn test_copies_empty_directory() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let src = root.join("src");
        fs::create_dir_all(src.join("empty")).unwrap();

        copy_tree(&src, &root.join("dst")).unwrap();
        assert!(root.join("dst/empty").is_dir());
    }

    #[test]
    fn test_missing_source_fails() {
        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let err = copy_tree(&root.join("nope"), &root.join("dst")).unwrap_err();
        assert!(matches!(err, Error::Walk(_)));
        assert!(!root.join("dst").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_preserves_mode_and_symlinks() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let src = root.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("build_steps"), "#!/bin/bash\n").unwrap();
        fs::set_permissions(src.join("build_steps"), fs::Permissions::from_mode(0o750)).unwrap();
        std::os::unix::fs::symlink("build_steps", src.join("build")).unwrap();

        let dst = root.join("dst");
        let stats = copy_tree(&src, &dst).unwrap();

        assert_eq!(stats.symlinks, 1);
        let mode = fs::metadata(dst.join("build_steps")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
        assert_eq!(
            fs::read_link(dst.join("build")).unwrap(),
            std::path::PathBuf::from("build_steps")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_is_filled_before_mode_is_set() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let src = root.join("src");
        fs::create_dir_all(src.join("docker")).unwrap();
        fs::write(src.join("docker/Dockerfile"), "FROM scratch\n").unwrap();
        fs::set_permissions(src.join("docker"), fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory modes, so the failure cannot occur there
        if fs::write(src.join("docker/writable"), "").is_ok() {
            fs::set_permissions(src.join("docker"), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let dst = root.join("dst");
        let result = copy_tree(&src, &dst);

        let dst_mode = fs::metadata(dst.join("docker")).map(|m| m.permissions().mode());
        for dir in [src.join("docker"), dst.join("docker")] {
            let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o755));
        }

        let stats = result.unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(dst_mode.unwrap() & 0o777, 0o555);
        assert_eq!(
            fs::read_to_string(dst.join("docker/Dockerfile")).unwrap(),
            "FROM scratch\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_deferred_modes_leave_directories_writable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = utf8(temp.path());
        let src = root.join("src");
        fs::create_dir_all(src.join("docker")).unwrap();
        fs::set_permissions(src.join("docker"), fs::Permissions::from_mode(0o555)).unwrap();

        let dst = root.join("dst");
        let (_, modes) = copy_tree_deferred(&src, &dst).unwrap();
        fs::write(dst.join("docker/docker-compose.yml"), "services: {}\n").unwrap();
        modes.apply().unwrap();

        let mode = fs::metadata(dst.join("docker")).unwrap().permissions().mode();
        for dir in [src.join("docker"), dst.join("docker")] {
            fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
        }
        assert_eq!(mode & 0o777, 0o555);
        assert!(dst.join("docker/docker-compose.yml").is_file());
    }
}
