//! File entry representation.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::error::{CoreError, CoreResult};

/// A single file or directory entry.
///
/// `FileEntry` is the identity the tree works with. Two entries are equal
/// when they point at the same path, regardless of how their metadata was
/// obtained.
///
/// # Examples
///
/// ```no_run
/// use kpttree_core::FileEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Kptfile").unwrap();
/// let entry = FileEntry::new("Kptfile".into(), &metadata);
/// assert_eq!(entry.name(), "Kptfile");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_hidden: bool,
    is_symlink: bool,
}

impl FileEntry {
    /// Creates a new `FileEntry` from a path and its metadata.
    ///
    /// Hidden entries are detected by a leading `.` in the name.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let mut entry = Self::from_parts(path, metadata.is_dir());
        entry.is_symlink = metadata.is_symlink();
        entry
    }

    /// Creates a `FileEntry` without touching the filesystem.
    ///
    /// Used for entries whose metadata is already known, e.g. from a
    /// watch event for a path that no longer exists.
    pub fn from_parts(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let is_hidden = name.starts_with('.');

        Self {
            path,
            name,
            is_dir,
            is_hidden,
            is_symlink: false,
        }
    }

    /// Reads metadata for `path` and builds an entry from it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the path does not exist,
    /// [`CoreError::PermissionDenied`] if it cannot be stat'ed.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Ok(Self::new(path.to_path_buf(), &metadata))
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent directory path, if any.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileEntry {}

impl Hash for FileEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
