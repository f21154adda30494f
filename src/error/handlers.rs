//! Error handlers
//!
//! Logging and reply-code mapping for directory manager errors.

use crate::error::types::DirectoryError;
use log::{debug, error};

/// Log a directory manager error
pub fn handle_error(err: &DirectoryError) {
    error!("Directory manager error: {}", err);
    if let Some(path) = err.path() {
        debug!("Failing path: {}", path.display());
    }
}

/// Convert an error to a shell reply code
pub fn error_to_reply_code(err: &DirectoryError) -> u16 {
    match err {
        DirectoryError::InvalidName(_) => 553,
        DirectoryError::OutsideRoot(_) => 553,
        DirectoryError::InvalidPath(_, _) => 550,
        DirectoryError::NotADirectory(_) => 550,
        DirectoryError::NotWritable(_) => 550,
        DirectoryError::AlreadyExists(_) => 550,
        DirectoryError::NotFound(_) => 550,
        DirectoryError::CreateFailed(_, _) => 550,
        DirectoryError::DeleteFailed(_, _) => 550,
        DirectoryError::ArchiveOpen(_, _) => 451,
        DirectoryError::ArchiveWrite(_, _) => 451,
        DirectoryError::TaskFailed(_) => 421,
    }
}
