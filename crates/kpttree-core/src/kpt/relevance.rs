//! The relevance predicate deciding which entries belong in the tree.

use crate::fs::entry::FileEntry;

/// Name of the kpt package manifest.
pub const KPTFILE_NAME: &str = "Kptfile";

/// Returns `true` if `entry` should be visible in the package tree.
///
/// Relevant entries are non-hidden directories, YAML resource files
/// (`.yml` / `.yaml`) and `Kptfile`s.
pub fn is_relevant(entry: &FileEntry) -> bool {
    is_relevant_name(entry.name(), entry.is_dir())
}

/// [`is_relevant`] for an entry that may be absent.
pub fn is_relevant_opt(entry: Option<&FileEntry>) -> bool {
    entry.is_some_and(is_relevant)
}

/// The predicate on a bare name, for callers that only know the name and
/// the directory flag (e.g. watch events for deleted paths).
pub fn is_relevant_name(name: &str, is_dir: bool) -> bool {
    (is_dir && !name.starts_with('.'))
        || name.ends_with(".yml")
        || name.ends_with(".yaml")
        || name == KPTFILE_NAME
}
