//! Working-directory manager
//!
//! Creates, deletes and archives directories below a configurable working
//! root, rejecting any path that could escape it.

pub mod config;
pub mod error;
pub mod manager;
pub mod navigate;
pub mod protocol;
pub mod shared;
pub mod shell;
pub mod storage;
pub mod utils;

pub use config::{ArchiveCompression, ManagerConfig};
pub use error::DirectoryError;
pub use manager::{DirectoryManager, ManagerOptions};
pub use shared::SharedDirectoryManager;
