//! Module `manager`
//!
//! Defines `DirectoryManager`, which owns the working root and exposes the
//! create, delete and archive operations relative to it.

use log::info;
use std::path::{Path, PathBuf};

use crate::config::{ArchiveCompression, ManagerConfig};
use crate::error::DirectoryError;
use crate::navigate::resolve_root;
use crate::storage::{self, ArchiveOptions};

/// Behavior knobs for a manager instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerOptions {
    pub sort_archive_entries: bool,
    pub compression: ArchiveCompression,
    pub directory_mode: u32,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            sort_archive_entries: false,
            compression: ArchiveCompression::Deflated,
            directory_mode: 0o755,
        }
    }
}

impl From<&ManagerConfig> for ManagerOptions {
    fn from(config: &ManagerConfig) -> Self {
        Self {
            sort_archive_entries: config.sort_archive_entries,
            compression: config.compression,
            directory_mode: config.directory_mode,
        }
    }
}

/// Manages a bounded directory subtree rooted at a working directory.
///
/// The root is always a canonical, existing, writable directory. Instances are
/// independent of each other. No locking is done: the manager assumes a single
/// writer per working directory, so existence checks can race with other
/// processes. Use [`crate::SharedDirectoryManager`] to share one instance
/// between tasks.
#[derive(Debug, Clone)]
pub struct DirectoryManager {
    root: PathBuf,
    options: ManagerOptions,
}

impl DirectoryManager {
    /// Creates a manager rooted at `root`, or at the process current directory.
    pub fn new(root: Option<&Path>) -> Result<Self, DirectoryError> {
        Self::with_options(root, ManagerOptions::default())
    }

    pub fn with_options(root: Option<&Path>, options: ManagerOptions) -> Result<Self, DirectoryError> {
        let root = resolve_root(root)?;
        info!("Working directory: {}", root.display());
        Ok(Self { root, options })
    }

    /// Creates a manager from loaded configuration.
    pub fn from_config(config: &ManagerConfig) -> Result<Self, DirectoryError> {
        let root = config.working_root_path();
        Self::with_options(root.as_deref(), ManagerOptions::from(config))
    }

    // --------------------
    // Root accessors
    // --------------------

    /// Returns the current working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Replaces the working root. `None` selects the process current directory.
    ///
    /// On failure the previous root is kept.
    pub fn set_root(&mut self, path: Option<&Path>) -> Result<&Path, DirectoryError> {
        let root = resolve_root(path)?;
        info!(
            "Working directory changed from {} to {}",
            self.root.display(),
            root.display()
        );
        self.root = root;
        Ok(&self.root)
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    // --------------------
    // Subtree operations
    // --------------------

    /// Creates `relative` (and missing parents) under the root.
    pub fn create_subdirectory(&self, relative: &str) -> Result<PathBuf, DirectoryError> {
        storage::create_directory(&self.root, relative, self.options.directory_mode)
    }

    /// Recursively deletes `relative` under the root.
    pub fn delete_subdirectory(&self, relative: &str) -> Result<PathBuf, DirectoryError> {
        storage::delete_directory(&self.root, relative)
    }

    /// Archives `relative` to a sibling zip and returns the archive path.
    pub fn archive_directory(
        &self,
        relative: &str,
        delete_after: bool,
    ) -> Result<PathBuf, DirectoryError> {
        let options = ArchiveOptions {
            compression: self.options.compression,
            sort_entries: self.options.sort_archive_entries,
            delete_after,
        };
        storage::archive_directory(&self.root, relative, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_root_failure_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = DirectoryManager::new(Some(dir.path())).unwrap();
        let before = manager.root().to_path_buf();

        let result = manager.set_root(Some(&dir.path().join("missing")));
        assert!(matches!(result, Err(DirectoryError::InvalidPath(_, _))));
        assert_eq!(manager.root(), before);
    }

    #[test]
    fn test_instances_are_independent() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let a = DirectoryManager::new(Some(first.path())).unwrap();
        let b = DirectoryManager::new(Some(second.path())).unwrap();

        a.create_subdirectory("shared-name").unwrap();
        b.create_subdirectory("shared-name").unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_options_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ManagerConfig {
            working_root: Some(dir.path().to_string_lossy().into_owned()),
            sort_archive_entries: true,
            compression: ArchiveCompression::Stored,
            directory_mode: 0o750,
        };

        let manager = DirectoryManager::from_config(&config).unwrap();
        assert_eq!(manager.root(), dir.path().canonicalize().unwrap());
        assert!(manager.options().sort_archive_entries);
        assert_eq!(manager.options().compression, ArchiveCompression::Stored);
        assert_eq!(manager.options().directory_mode, 0o750);
    }
}
