//! Recursive directory walker
//!
//! Single depth-first traversal shared by deletion and archiving. Symlinks are
//! reported as their own kind and never followed.

use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::DirectoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

/// Visiting order for the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    /// Parents before children
    PreOrder,
    /// Children before parents
    PostOrder,
}

/// An entry produced by [`walk`].
#[derive(Debug)]
pub struct WalkEntry<'a> {
    pub path: &'a Path,
    /// `/`-separated path starting at the walked directory's base name
    pub relative_name: String,
    /// Set when a component of the relative name was not valid UTF-8 and
    /// `relative_name` holds a lossy replacement
    pub lossy_name: bool,
    pub kind: EntryKind,
}

/// Walks `dir` depth-first, calling `visit` for every entry including `dir` itself.
///
/// The first error from `visit` stops the walk. Traversal failures are turned
/// into the caller's error through `on_error`.
pub fn walk<F, E>(
    dir: &Path,
    order: WalkOrder,
    sorted: bool,
    on_error: E,
    mut visit: F,
) -> Result<(), DirectoryError>
where
    F: FnMut(&WalkEntry<'_>) -> Result<(), DirectoryError>,
    E: Fn(PathBuf, io::Error) -> DirectoryError,
{
    let base = dir.parent().unwrap_or(dir);

    let mut walker = WalkDir::new(dir)
        .follow_links(false)
        .contents_first(order == WalkOrder::PostOrder);
    if sorted {
        walker = walker.sort_by_file_name();
    }

    let mut visited = 0usize;
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            on_error(path, io::Error::from(e))
        })?;

        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let (relative_name, lossy_name) = relative_name(base, entry.path());
        visit(&WalkEntry {
            path: entry.path(),
            relative_name,
            lossy_name,
            kind,
        })?;
        visited += 1;
    }

    debug!("Walked {} ({} entries)", dir.display(), visited);
    Ok(())
}

fn relative_name(base: &Path, path: &Path) -> (String, bool) {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    (name, relative.to_str().is_none())
}
