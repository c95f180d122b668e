//! Scanning a package directory into a [`RelevantSet`].
//!
//! Scans run in two phases: the scan root is enumerated completely first,
//! then every enumerated entry is classified and its ancestor chain walked.
//! Failures never escape a scan; they are logged and yield an empty set.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::RelevantSet;
use crate::fs::entry::FileEntry;
use crate::fs::ops::collect_descendants;
use crate::kpt::anchor::ManifestAnchor;
use crate::kpt::relevance::{is_relevant, is_relevant_name};

/// Scans the project at `project_root`.
///
/// Returns an empty set when the project has no manifest.
pub fn scan_and_filter(project_root: &Path) -> RelevantSet {
    match ManifestAnchor::resolve(project_root) {
        Some(anchor) => scan_anchor(&anchor),
        None => {
            debug!(root = %project_root.display(), "no kpt manifest, nothing to scan");
            RelevantSet::new()
        }
    }
}

/// Scans below an already resolved anchor.
pub fn scan_anchor(anchor: &ManifestAnchor) -> RelevantSet {
    // a directory failing the predicate can't be kept, nor can anything below it
    let entries = match collect_descendants(anchor.scan_root(), |name| is_relevant_name(name, true)) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                scan_root = %anchor.scan_root().display(),
                "kpt scan failed, treating package as empty: {e}"
            );
            return RelevantSet::new();
        }
    };

    let set = filter_relevant(anchor, &entries);
    debug!(
        scan_root = %anchor.scan_root().display(),
        enumerated = entries.len(),
        relevant = set.len(),
        "kpt scan finished"
    );
    set
}

/// Runs [`scan_and_filter`] on the blocking pool so the caller's thread
/// stays responsive.
///
/// The manifest is resolved again on every call, so a package whose
/// manifest was deleted scans as empty.
pub async fn scan_in_background(project_root: PathBuf) -> RelevantSet {
    match tokio::task::spawn_blocking(move || scan_and_filter(&project_root)).await {
        Ok(set) => set,
        Err(e) => {
            warn!("kpt scan task failed: {e}");
            RelevantSet::new()
        }
    }
}

/// Classifies enumerated entries and closes the result over parents.
///
/// Every relevant entry except the manifest is kept together with each of
/// its parent directories below the scan root. The walk up stops early at
/// an irrelevant parent or at one that is already in the set (whose own
/// chain is then already complete).
pub fn filter_relevant(anchor: &ManifestAnchor, entries: &[FileEntry]) -> RelevantSet {
    let mut set = RelevantSet::new();

    for entry in entries {
        if !is_relevant(entry) || anchor.is_manifest(entry.path()) {
            continue;
        }
        if !set.insert(entry.path().to_path_buf()) {
            continue;
        }

        let mut current = entry.parent();
        while let Some(parent) = current {
            if !anchor.contains(parent) {
                break;
            }
            let name = parent
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if !is_relevant_name(&name, true) {
                break;
            }
            if !set.insert(parent.to_path_buf()) {
                break;
            }
            current = parent.parent();
        }
    }

    set
}
