//! Directory archiving
//!
//! Packs a directory into a sibling `<name>.zip`, optionally deleting the
//! source afterwards.

use log::info;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::config::ArchiveCompression;
use crate::error::DirectoryError;
use crate::storage::operations::{remove_tree, require_directory};
use crate::storage::validation::{ensure_within_root, resolve_path};
use crate::storage::walker::{EntryKind, WalkOrder, walk};

/// Entries at or above this size need zip64 headers
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Settings applied to each archive
#[derive(Debug, Clone, Copy)]
pub struct ArchiveOptions {
    pub compression: ArchiveCompression,
    pub sort_entries: bool,
    pub delete_after: bool,
}

/// Returns `<parent>/<base name>.zip` for `dir`.
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let mut name = dir.file_name().unwrap_or_default().to_os_string();
    name.push(".zip");
    dir.with_file_name(name)
}

/// Archives `relative` into a zip next to it and returns the archive path.
///
/// An existing archive at that path is overwritten, unless it is a symlink,
/// which is refused with `OutsideRoot`. Symlinks inside the tree are stored as
/// symlink entries. When `delete_after` is set the source is removed once the
/// archive is finalized; a failure there is reported as `DeleteFailed` and the
/// archive stays on disk.
pub fn archive_directory(
    root: &Path,
    relative: &str,
    options: &ArchiveOptions,
) -> Result<PathBuf, DirectoryError> {
    let target = resolve_path(root, relative)?;
    require_directory(&target)?;
    ensure_within_root(root, &target)?;

    let archive_path = archive_path_for(&target);
    if let Ok(metadata) = fs::symlink_metadata(&archive_path) {
        if metadata.file_type().is_symlink() {
            return Err(DirectoryError::OutsideRoot(archive_path));
        }
    }
    ensure_within_root(root, &archive_path)?;

    write_archive(&target, &archive_path, options)?;

    if options.delete_after {
        remove_tree(&target)?;
        info!(
            "Removed {} after archiving to {}",
            target.display(),
            archive_path.display()
        );
    }

    Ok(archive_path)
}

fn write_archive(
    source: &Path,
    archive_path: &Path,
    options: &ArchiveOptions,
) -> Result<(), DirectoryError> {
    let file = open_archive(archive_path)
        .map_err(|e| DirectoryError::ArchiveOpen(archive_path.to_path_buf(), e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    let file_options =
        SimpleFileOptions::default().compression_method(options.compression.into());
    let dir_options = SimpleFileOptions::default().unix_permissions(0o755);
    let write_error = |e: ZipError| DirectoryError::ArchiveWrite(archive_path.to_path_buf(), e);

    let mut files = 0usize;
    let mut directories = 0usize;
    let mut links = 0usize;

    walk(
        source,
        WalkOrder::PreOrder,
        options.sort_entries,
        |path, e| DirectoryError::ArchiveWrite(path, ZipError::Io(e)),
        |entry| {
            if entry.lossy_name {
                return Err(not_utf8(entry.path));
            }
            match entry.kind {
                EntryKind::Directory => {
                    zip.add_directory(entry.relative_name.as_str(), dir_options)
                        .map_err(write_error)?;
                    directories += 1;
                }
                EntryKind::File => {
                    let mut input = File::open(entry.path).map_err(|e| {
                        DirectoryError::ArchiveWrite(entry.path.to_path_buf(), ZipError::Io(e))
                    })?;
                    let len = input.metadata().map(|m| m.len()).unwrap_or(0);
                    zip.start_file(
                        entry.relative_name.as_str(),
                        file_options.large_file(needs_zip64(len)),
                    )
                    .map_err(write_error)?;
                    io::copy(&mut input, &mut zip).map_err(|e| write_error(ZipError::Io(e)))?;
                    files += 1;
                }
                EntryKind::Symlink => {
                    let link = fs::read_link(entry.path).map_err(|e| {
                        DirectoryError::ArchiveWrite(entry.path.to_path_buf(), ZipError::Io(e))
                    })?;
                    let link = link.to_str().ok_or_else(|| not_utf8(entry.path))?;
                    zip.add_symlink(entry.relative_name.as_str(), link, file_options)
                        .map_err(write_error)?;
                    links += 1;
                }
            }
            Ok(())
        },
    )?;

    let mut writer = zip.finish().map_err(write_error)?;
    writer
        .flush()
        .map_err(|e| write_error(ZipError::Io(e)))?;

    info!(
        "Archived {} to {} ({} files, {} directories, {} symlinks)",
        source.display(),
        archive_path.display(),
        files,
        directories,
        links
    );
    Ok(())
}

/// Creates or truncates the archive without following a symlink at its path.
fn open_archive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(rustix::fs::OFlags::NOFOLLOW.bits() as i32);
    }
    options.open(path)
}

fn needs_zip64(len: u64) -> bool {
    len >= ZIP64_THRESHOLD
}

fn not_utf8(path: &Path) -> DirectoryError {
    DirectoryError::ArchiveWrite(
        path.to_path_buf(),
        ZipError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            "name is not valid UTF-8",
        )),
    )
}
