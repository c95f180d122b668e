//! Error types for `kpttree-core`.
//!
//! Fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Note that scanning never
//! surfaces these errors to the tree: scan failures degrade to an empty
//! relevant set.

use std::path::PathBuf;

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The filesystem watcher could not be created or attached.
    #[error("watch error: {0}")]
    Watch(String),

    /// The editor could not open a file.
    #[error("editor error: {0}")]
    Editor(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<notify::Error> for CoreError {
    fn from(err: notify::Error) -> Self {
        CoreError::Watch(err.to_string())
    }
}

impl From<walkdir::Error> for CoreError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        match (err.io_error().map(|e| e.kind()), path) {
            (Some(std::io::ErrorKind::PermissionDenied), Some(path)) => {
                CoreError::PermissionDenied(path)
            }
            (Some(std::io::ErrorKind::NotFound), Some(path)) => CoreError::NotFound(path),
            _ => CoreError::Io(err.into()),
        }
    }
}

/// Convenience alias used throughout `kpttree-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_displays_path() {
        let err = CoreError::NotFound(PathBuf::from("/missing/Kptfile"));
        assert_eq!(err.to_string(), "path not found: /missing/Kptfile");
    }

    #[test]
    fn permission_denied_displays_path() {
        let err = CoreError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = CoreError::NotADirectory(PathBuf::from("/infra/kpt/Kptfile"));
        assert_eq!(err.to_string(), "not a directory: /infra/kpt/Kptfile");
    }

    #[test]
    fn watch_error_displays_message() {
        let err = CoreError::Watch("inotify limit reached".to_string());
        assert_eq!(err.to_string(), "watch error: inotify limit reached");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("disk gone"));
    }

    #[test]
    fn walkdir_missing_root_maps_to_not_found() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .find_map(Result::err)
            .unwrap();
        let core_err: CoreError = err.into();
        assert!(matches!(core_err, CoreError::NotFound(p) if p == missing));
    }
}
