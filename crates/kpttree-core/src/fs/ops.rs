//! Directory listing and recursive enumeration.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::FileEntry;

/// Reads the direct children of `path`.
///
/// Entries are returned directories first, then by name. Children whose
/// metadata cannot be read are skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::NotADirectory`] if `path` is a file.
/// - [`CoreError::PermissionDenied`] if the directory cannot be listed.
///
/// # Examples
///
/// ```no_run
/// use kpttree_core::read_directory;
/// use std::path::Path;
///
/// let entries = read_directory(Path::new("infra/kpt")).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn read_directory(path: &Path) -> CoreResult<Vec<FileEntry>> {
    if !path.exists() {
        return Err(CoreError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            CoreError::PermissionDenied(path.to_path_buf())
        } else {
            CoreError::Io(e)
        }
    })?;

    let mut entries: Vec<FileEntry> = read_dir
        .filter_map(|r| r.ok())
        .filter_map(|dir_entry| {
            let metadata = dir_entry.metadata().ok()?;
            Some(FileEntry::new(dir_entry.path(), &metadata))
        })
        .collect();

    entries.sort_by(|a, b| {
        b.is_dir()
            .cmp(&a.is_dir())
            .then_with(|| a.name().cmp(b.name()))
    });

    Ok(entries)
}

/// Enumerates every descendant of `root`, excluding `root` itself.
///
/// Directories whose name `descend` rejects are neither returned nor
/// descended into. Symlinks are reported but never followed. Unlike [`read_directory`],
/// any failure while walking aborts the whole enumeration.
///
/// # Errors
///
/// Returns the first error hit by the walk: a missing root, a directory
/// that cannot be listed, or an entry whose metadata cannot be read.
pub fn collect_descendants<F>(root: &Path, mut descend: F) -> CoreResult<Vec<FileEntry>>
where
    F: FnMut(&str) -> bool,
{
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !e.file_type().is_dir() || descend(e.file_name().to_string_lossy().as_ref()));

    let mut entries = Vec::new();
    for dir_entry in walker {
        let dir_entry = dir_entry?;
        let metadata = dir_entry.metadata()?;
        entries.push(FileEntry::new(dir_entry.into_path(), &metadata));
    }
    Ok(entries)
}
