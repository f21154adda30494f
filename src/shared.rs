//! Shared directory manager
//!
//! Wraps a `DirectoryManager` for use from multiple tasks. Every call takes the
//! lock, so root reads/writes and mutating operations are serialized, and the
//! blocking filesystem work runs on tokio's blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::DirectoryError;
use crate::manager::DirectoryManager;
use crate::protocol::{Command, CommandResult, handle_command};

/// Thread-safe handle to a single `DirectoryManager`.
#[derive(Debug, Clone)]
pub struct SharedDirectoryManager {
    inner: Arc<Mutex<DirectoryManager>>,
}

impl SharedDirectoryManager {
    pub fn new(manager: DirectoryManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub async fn root(&self) -> PathBuf {
        self.inner.lock().await.root().to_path_buf()
    }

    pub async fn set_root(&self, path: Option<PathBuf>) -> Result<PathBuf, DirectoryError> {
        self.run(move |manager| manager.set_root(path.as_deref()).map(Path::to_path_buf))
            .await
    }

    pub async fn create_subdirectory(&self, relative: &str) -> Result<PathBuf, DirectoryError> {
        let relative = relative.to_string();
        self.run(move |manager| manager.create_subdirectory(&relative))
            .await
    }

    pub async fn delete_subdirectory(&self, relative: &str) -> Result<PathBuf, DirectoryError> {
        let relative = relative.to_string();
        self.run(move |manager| manager.delete_subdirectory(&relative))
            .await
    }

    pub async fn archive_directory(
        &self,
        relative: &str,
        delete_after: bool,
    ) -> Result<PathBuf, DirectoryError> {
        let relative = relative.to_string();
        self.run(move |manager| manager.archive_directory(&relative, delete_after))
            .await
    }

    /// Runs a shell command under the lock.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, DirectoryError> {
        self.run(move |manager| Ok(handle_command(manager, &command)))
            .await
    }

    async fn run<T, F>(&self, op: F) -> Result<T, DirectoryError>
    where
        F: FnOnce(&mut DirectoryManager) -> Result<T, DirectoryError> + Send + 'static,
        T: Send + 'static,
    {
        let mut guard = Arc::clone(&self.inner).lock_owned().await;
        tokio::task::spawn_blocking(move || op(&mut *guard))
            .await
            .map_err(|e| DirectoryError::TaskFailed(e.to_string()))?
    }
}
