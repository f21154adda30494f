//! File permissions
//!
//! Writability checks used when assigning the working directory.

use std::path::Path;

/// Check if the current process may write into `path`.
///
/// Uses `access(2)` on Unix, so ownership, privileges and read-only mounts are
/// honoured. Elsewhere only the read-only attribute is consulted.
#[cfg(unix)]
pub fn is_writable(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
pub fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_path_is_not_writable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_writable(&dir.path().join("missing")));
    }

    #[test]
    fn test_fresh_tempdir_is_writable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_writable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_result_matches_actual_write_attempt() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged processes can write regardless of the mode bits
        let can_write = fs::write(locked.join("attempt"), b"x").is_ok();
        assert_eq!(is_writable(&locked), can_write);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
