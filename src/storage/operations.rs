//! Storage operations
//!
//! Creates and recursively deletes directories below the working root.

use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DirectoryError;
use crate::storage::validation::{ensure_within_root, resolve_path};
use crate::storage::walker::{EntryKind, WalkOrder, walk};

/// Creates `relative` and any missing parents under `root`.
///
/// The existence check is not atomic with the creation; see the single-writer
/// assumption on [`crate::DirectoryManager`].
pub fn create_directory(root: &Path, relative: &str, mode: u32) -> Result<PathBuf, DirectoryError> {
    let target = resolve_path(root, relative)?;
    ensure_within_root(root, &target)?;

    if target.is_dir() {
        return Err(DirectoryError::AlreadyExists(target));
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    if let Err(e) = builder.create(&target) {
        error!("Failed to create directory {}: {}", target.display(), e);
        return Err(DirectoryError::CreateFailed(target, e));
    }

    info!("Created directory {}", target.display());
    Ok(target)
}

/// Deletes `relative` and everything below it.
pub fn delete_directory(root: &Path, relative: &str) -> Result<PathBuf, DirectoryError> {
    let target = resolve_path(root, relative)?;
    require_directory(&target)?;
    ensure_within_root(root, &target)?;

    remove_tree(&target)?;
    Ok(target)
}

/// Fails with `NotFound` unless `path` is a real directory (not a symlink to one).
pub(crate) fn require_directory(path: &Path) -> Result<(), DirectoryError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(DirectoryError::NotFound(path.to_path_buf())),
    }
}

/// Post-order removal of `dir`. Stops at the first failure; nothing is restored.
pub(crate) fn remove_tree(dir: &Path) -> Result<(), DirectoryError> {
    let mut removed = 0usize;

    let result = walk(
        dir,
        WalkOrder::PostOrder,
        false,
        DirectoryError::DeleteFailed,
        |entry| {
            let outcome = match entry.kind {
                EntryKind::Directory => fs::remove_dir(entry.path),
                EntryKind::File | EntryKind::Symlink => fs::remove_file(entry.path),
            };
            outcome.map_err(|e| DirectoryError::DeleteFailed(entry.path.to_path_buf(), e))?;
            removed += 1;
            Ok(())
        },
    );

    match result {
        Ok(()) => {
            info!("Deleted {} ({} entries)", dir.display(), removed);
            Ok(())
        }
        Err(e) => {
            if removed > 0 {
                warn!(
                    "Delete of {} stopped after removing {} entries",
                    dir.display(),
                    removed
                );
            }
            error!("{}", e);
            Err(e)
        }
    }
}
