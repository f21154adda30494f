//! Path validation
//!
//! Segment checks and root-relative path resolution. Every public operation
//! runs these before touching the filesystem.

use std::path::{Path, PathBuf};

use crate::error::DirectoryError;

/// Characters that may not appear in any path segment
pub const FORBIDDEN_CHARS: [char; 11] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '#', '\0'];

/// Checks a single `/`-delimited segment.
///
/// Empty segments and the `.`/`..` markers are rejected along with any segment
/// containing a forbidden character.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(FORBIDDEN_CHARS)
}

/// Splits a relative path on `/` and validates every segment before returning any.
pub fn validate_relative_path(relative: &str) -> Result<Vec<&str>, DirectoryError> {
    let segments: Vec<&str> = relative.split('/').collect();

    if let Some(bad) = segments.iter().find(|s| !is_valid_segment(s)) {
        return Err(DirectoryError::InvalidName(bad.to_string()));
    }

    Ok(segments)
}

/// Joins validated segments onto the root. Performs no I/O.
pub fn resolve_path(root: &Path, relative: &str) -> Result<PathBuf, DirectoryError> {
    let segments = validate_relative_path(relative)?;
    Ok(segments
        .into_iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment)))
}

/// Verifies that `path`, or its deepest existing ancestor, canonicalizes under `root`.
///
/// `root` must already be canonical. Catches symlinked components that point
/// outside the working directory.
pub fn ensure_within_root(root: &Path, path: &Path) -> Result<(), DirectoryError> {
    let anchor = path.ancestors().find(|p| p.exists()).unwrap_or(root);

    match anchor.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(()),
        _ => Err(DirectoryError::OutsideRoot(path.to_path_buf())),
    }
}
