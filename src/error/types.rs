//! Error types
//!
//! Defines the failure conditions raised by the directory manager. Every variant
//! carries the offending segment or path so callers can report it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use zip::result::ZipError;

/// Directory manager errors
#[derive(Debug)]
pub enum DirectoryError {
    /// A path segment is empty, `.`/`..`, or contains a forbidden character
    InvalidName(String),
    /// The root candidate could not be resolved to an existing path
    InvalidPath(PathBuf, io::Error),
    NotADirectory(PathBuf),
    NotWritable(PathBuf),
    AlreadyExists(PathBuf),
    NotFound(PathBuf),
    /// The resolved target lies outside the working root
    OutsideRoot(PathBuf),
    CreateFailed(PathBuf, io::Error),
    DeleteFailed(PathBuf, io::Error),
    ArchiveOpen(PathBuf, io::Error),
    ArchiveWrite(PathBuf, ZipError),
    /// A blocking operation on the shared manager panicked or was cancelled
    TaskFailed(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::InvalidName(s) => write!(f, "Invalid name: '{}'", s),
            DirectoryError::InvalidPath(p, e) => {
                write!(f, "Invalid path {}: {}", p.display(), e)
            }
            DirectoryError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            DirectoryError::NotWritable(p) => write!(f, "Not writable: {}", p.display()),
            DirectoryError::AlreadyExists(p) => {
                write!(f, "Directory already exists: {}", p.display())
            }
            DirectoryError::NotFound(p) => write!(f, "Directory not found: {}", p.display()),
            DirectoryError::OutsideRoot(p) => {
                write!(f, "Path escapes working directory: {}", p.display())
            }
            DirectoryError::CreateFailed(p, e) => {
                write!(f, "Failed to create {}: {}", p.display(), e)
            }
            DirectoryError::DeleteFailed(p, e) => {
                write!(f, "Failed to delete {}: {}", p.display(), e)
            }
            DirectoryError::ArchiveOpen(p, e) => {
                write!(f, "Failed to open archive {}: {}", p.display(), e)
            }
            DirectoryError::ArchiveWrite(p, e) => {
                write!(f, "Failed to write archive {}: {}", p.display(), e)
            }
            DirectoryError::TaskFailed(msg) => write!(f, "Background task failed: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::InvalidPath(_, e)
            | DirectoryError::CreateFailed(_, e)
            | DirectoryError::DeleteFailed(_, e)
            | DirectoryError::ArchiveOpen(_, e) => Some(e),
            DirectoryError::ArchiveWrite(_, e) => Some(e),
            _ => None,
        }
    }
}

impl DirectoryError {
    /// Returns the path this error refers to, if it is a path error.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            DirectoryError::InvalidPath(p, _)
            | DirectoryError::NotADirectory(p)
            | DirectoryError::NotWritable(p)
            | DirectoryError::AlreadyExists(p)
            | DirectoryError::NotFound(p)
            | DirectoryError::OutsideRoot(p)
            | DirectoryError::CreateFailed(p, _)
            | DirectoryError::DeleteFailed(p, _)
            | DirectoryError::ArchiveOpen(p, _)
            | DirectoryError::ArchiveWrite(p, _) => Some(p),
            DirectoryError::InvalidName(_) | DirectoryError::TaskFailed(_) => None,
        }
    }
}
