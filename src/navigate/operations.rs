//! Working root resolution

use log::debug;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::DirectoryError;
use crate::storage::permissions::is_writable;

/// Resolves a candidate working root to a canonical, writable directory.
///
/// `None` means the process current directory. Nothing is modified here; the
/// caller swaps the root only after this succeeds.
pub fn resolve_root(candidate: Option<&Path>) -> Result<PathBuf, DirectoryError> {
    let candidate = match candidate {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().map_err(|e| DirectoryError::InvalidPath(PathBuf::from("."), e))?,
    };

    let canonical = candidate
        .canonicalize()
        .map_err(|e| DirectoryError::InvalidPath(candidate.clone(), e))?;

    if !canonical.is_dir() {
        return Err(DirectoryError::NotADirectory(canonical));
    }

    if !is_writable(&canonical) {
        return Err(DirectoryError::NotWritable(canonical));
    }

    debug!("Resolved working root {} -> {}", candidate.display(), canonical.display());
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolves_to_canonical_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("inner")).unwrap();

        let resolved = resolve_root(Some(&dir.path().join("inner").join(".."))).unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_path_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_root(Some(&dir.path().join("nope"))),
            Err(DirectoryError::InvalidPath(_, _))
        ));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            resolve_root(Some(&file)),
            Err(DirectoryError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_writability_follows_process_access() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        let can_write = fs::write(locked.join("attempt"), b"x").is_ok();
        let result = resolve_root(Some(&locked));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if can_write {
            assert_eq!(result.unwrap(), locked.canonicalize().unwrap());
        } else {
            assert!(matches!(result, Err(DirectoryError::NotWritable(_))));
        }
    }
}
