//! Location of the package manifest inside a project.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Path of the manifest, relative to the project root.
pub const MANIFEST_RELATIVE_PATH: &str = "infra/kpt/Kptfile";

/// A resolved manifest location.
///
/// The manifest's parent directory is the scan root: the topmost directory
/// the tree ever shows. The manifest itself is the scan boundary and is
/// never part of the relevant set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestAnchor {
    project_root: PathBuf,
    manifest: PathBuf,
    scan_root: PathBuf,
}

impl ManifestAnchor {
    /// Resolves the manifest under `project_root`.
    ///
    /// Returns `None` when the project root is not a directory or there is
    /// no manifest file at [`MANIFEST_RELATIVE_PATH`]; such a project simply
    /// isn't kpt-structured.
    pub fn resolve(project_root: &Path) -> Option<Self> {
        if !project_root.is_dir() {
            debug!(root = %project_root.display(), "project root is not a directory");
            return None;
        }

        let manifest = project_root.join(MANIFEST_RELATIVE_PATH);
        let metadata = std::fs::metadata(&manifest).ok()?;
        if metadata.is_dir() {
            debug!(manifest = %manifest.display(), "manifest path is a directory");
            return None;
        }

        let scan_root = manifest.parent()?.to_path_buf();
        Some(Self {
            project_root: project_root.to_path_buf(),
            manifest,
            scan_root,
        })
    }

    /// The project root the anchor was resolved against.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Absolute path of the manifest file.
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// The manifest's parent directory.
    pub fn scan_root(&self) -> &Path {
        &self.scan_root
    }

    /// Returns `true` if `path` is the manifest file.
    pub fn is_manifest(&self, path: &Path) -> bool {
        path == self.manifest
    }

    /// Returns `true` if `path` lies strictly below the scan root.
    pub fn contains(&self, path: &Path) -> bool {
        path != self.scan_root && path.starts_with(&self.scan_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn kpt_project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("infra/kpt")).unwrap();
        fs::write(tmp.path().join(MANIFEST_RELATIVE_PATH), "apiVersion: kpt.dev/v1").unwrap();
        tmp
    }

    #[test]
    fn resolves_manifest_and_scan_root() {
        let tmp = kpt_project();
        let anchor = ManifestAnchor::resolve(tmp.path()).unwrap();

        assert_eq!(anchor.project_root(), tmp.path());
        assert_eq!(anchor.manifest(), tmp.path().join("infra/kpt/Kptfile"));
        assert_eq!(anchor.scan_root(), tmp.path().join("infra/kpt"));
    }

    #[test]
    fn missing_manifest_is_none() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("infra/kpt")).unwrap();
        assert!(ManifestAnchor::resolve(tmp.path()).is_none());
    }

    #[test]
    fn missing_project_root_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(ManifestAnchor::resolve(&tmp.path().join("nope")).is_none());
    }

    #[test]
    fn manifest_directory_is_none() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("infra/kpt/Kptfile")).unwrap();
        assert!(ManifestAnchor::resolve(tmp.path()).is_none());
    }

    #[test]
    fn contains_is_strict() {
        let tmp = kpt_project();
        let anchor = ManifestAnchor::resolve(tmp.path()).unwrap();

        assert!(anchor.contains(&tmp.path().join("infra/kpt/a.yaml")));
        assert!(anchor.contains(&tmp.path().join("infra/kpt/sub/b.yaml")));
        assert!(!anchor.contains(anchor.scan_root()));
        assert!(!anchor.contains(&tmp.path().join("infra")));
        assert!(!anchor.contains(&tmp.path().join("infra/kptx/a.yaml")));
    }

    #[test]
    fn is_manifest_matches_only_the_anchor() {
        let tmp = kpt_project();
        let anchor = ManifestAnchor::resolve(tmp.path()).unwrap();

        assert!(anchor.is_manifest(&tmp.path().join("infra/kpt/Kptfile")));
        assert!(!anchor.is_manifest(&tmp.path().join("infra/kpt/sub/Kptfile")));
    }
}
