//! File system storage management
//!
//! Path validation, the shared recursive walker, and the create, delete and
//! archive operations built on them.

pub mod archive;
pub mod operations;
pub mod permissions;
pub mod validation;
pub mod walker;

pub use archive::{ArchiveOptions, archive_directory, archive_path_for};
pub use operations::{create_directory, delete_directory};
pub use validation::{FORBIDDEN_CHARS, is_valid_segment, resolve_path};
