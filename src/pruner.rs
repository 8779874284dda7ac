//! Removal of directories left empty after organizing.

use crate::error::{OrganizeError, OrganizeResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Removes every empty directory below `dir`, deepest first, and returns how
/// many were removed. `dir` itself is never removed.
///
/// A directory that cannot be removed (usually because it still holds files)
/// is kept without complaint. Symbolic links are not followed.
///
/// # Errors
///
/// Returns [`OrganizeError::ReadDirFailed`] if a directory cannot be listed.
pub fn prune_empty(dir: &Path) -> OrganizeResult<usize> {
    let mut removed = 0;
    for subdir in list_subdirs(dir)? {
        removed += prune_empty(&subdir)?;
        match fs::remove_dir(&subdir) {
            Ok(()) => {
                debug!(dir = %subdir.display(), "removed empty directory");
                removed += 1;
            }
            Err(err) => trace!(dir = %subdir.display(), %err, "kept directory"),
        }
    }
    Ok(removed)
}

/// Lists the immediate subdirectories of `dir`, sorted. Symbolic links to
/// directories are not included.
fn list_subdirs(dir: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let read_failed = |source| OrganizeError::ReadDirFailed {
        path: dir.to_path_buf(),
        source,
    };

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_failed)? {
        let entry = entry.map_err(read_failed)?;
        if entry.file_type().is_ok_and(|kind| kind.is_dir()) {
            subdirs.push(entry.path());
        }
    }
    subdirs.sort();
    Ok(subdirs)
}
