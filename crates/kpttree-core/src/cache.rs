//! Per-project cache of relevant paths.
//!
//! Each opened project owns one [`RelevantSet`] inside a [`CacheRegistry`].
//! Sets are published as immutable `Arc` snapshots: a rescan builds a whole
//! new set and swaps it in, so a reader holding a snapshot never sees a set
//! that is half rebuilt.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

/// Identity of an opened project.
///
/// Ids are allocated from a process-wide counter, so two projects opened on
/// the same directory still have separate caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "project#{}", self.0)
    }
}

/// The set of paths visible in a project's tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevantSet {
    paths: HashSet<PathBuf>,
}

impl RelevantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `path`, returning `false` if it was already present.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl FromIterator<PathBuf> for RelevantSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Registry mapping each open project to its current [`RelevantSet`].
#[derive(Debug, Default)]
pub struct CacheRegistry {
    sets: DashMap<ProjectId, Arc<RelevantSet>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry shared by every project the host opens.
    pub fn global() -> Arc<CacheRegistry> {
        static GLOBAL: OnceLock<Arc<CacheRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(CacheRegistry::new())).clone()
    }

    /// Returns the project's set, creating an empty one on first access.
    pub fn get_or_create(&self, id: ProjectId) -> Arc<RelevantSet> {
        self.sets.entry(id).or_default().clone()
    }

    /// Returns the project's set if one exists.
    pub fn get(&self, id: ProjectId) -> Option<Arc<RelevantSet>> {
        self.sets.get(&id).map(|set| set.clone())
    }

    /// Publishes `set` as the project's new set, replacing the old one whole.
    pub fn replace(&self, id: ProjectId, set: RelevantSet) -> Arc<RelevantSet> {
        let set = Arc::new(set);
        self.sets.insert(id, set.clone());
        set
    }

    /// Like [`CacheRegistry::replace`], but only while the project is still
    /// registered. Returns `false` (and drops `set`) if it was removed.
    pub fn replace_existing(&self, id: ProjectId, set: RelevantSet) -> bool {
        match self.sets.get_mut(&id) {
            Some(mut slot) => {
                *slot = Arc::new(set);
                true
            }
            None => false,
        }
    }

    /// Clears the project's set.
    pub fn invalidate(&self, id: ProjectId) {
        self.sets.insert(id, Arc::new(RelevantSet::new()));
    }

    /// Drops the project's set; called when the project closes.
    pub fn remove(&self, id: ProjectId) -> Option<Arc<RelevantSet>> {
        self.sets.remove(&id).map(|(_, set)| set)
    }

    /// Returns `true` if `path` is in the project's current set.
    pub fn contains(&self, id: ProjectId, path: &Path) -> bool {
        self.sets
            .get(&id)
            .is_some_and(|set| set.contains(path))
    }

    /// Number of projects with a live set.
    pub fn project_count(&self) -> usize {
        self.sets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(paths: &[&str]) -> RelevantSet {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn project_ids_are_unique() {
        let a = ProjectId::next();
        let b = ProjectId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
        assert_eq!(a.to_string(), format!("project#{}", a.get()));
    }

    #[test]
    fn relevant_set_basics() {
        let mut set = RelevantSet::new();
        assert!(set.is_empty());
        assert!(set.insert(PathBuf::from("/p/a.yaml")));
        assert!(!set.insert(PathBuf::from("/p/a.yaml")));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Path::new("/p/a.yaml")));
        assert_eq!(set.iter().count(), 1);
    }

    #[test]
    fn get_or_create_creates_empty_once() {
        let registry = CacheRegistry::new();
        let id = ProjectId::next();

        assert!(registry.get(id).is_none());
        let first = registry.get_or_create(id);
        assert!(first.is_empty());
        assert_eq!(registry.project_count(), 1);

        registry.replace(id, set_of(&["/p/a.yaml"]));
        let second = registry.get_or_create(id);
        assert_eq!(second.len(), 1);
        assert_eq!(registry.project_count(), 1);
    }

    #[test]
    fn replace_swaps_whole_set() {
        let registry = CacheRegistry::new();
        let id = ProjectId::next();
        registry.replace(id, set_of(&["/p/a.yaml", "/p/b.yaml"]));

        let before = registry.get(id).unwrap();
        registry.replace(id, set_of(&["/p/c.yaml"]));
        let after = registry.get(id).unwrap();

        // an old snapshot is unaffected by the swap
        assert_eq!(before.len(), 2);
        assert!(!after.contains(Path::new("/p/a.yaml")));
        assert!(after.contains(Path::new("/p/c.yaml")));
    }

    #[test]
    fn replace_existing_skips_removed_projects() {
        let registry = CacheRegistry::new();
        let id = ProjectId::next();

        assert!(!registry.replace_existing(id, set_of(&["/p/a.yaml"])));
        assert!(registry.get(id).is_none());

        registry.get_or_create(id);
        assert!(registry.replace_existing(id, set_of(&["/p/a.yaml"])));
        assert!(registry.contains(id, Path::new("/p/a.yaml")));
    }

    #[test]
    fn invalidate_clears() {
        let registry = CacheRegistry::new();
        let id = ProjectId::next();
        registry.replace(id, set_of(&["/p/a.yaml"]));

        registry.invalidate(id);
        assert!(registry.get(id).unwrap().is_empty());
        assert!(!registry.contains(id, Path::new("/p/a.yaml")));
    }

    #[test]
    fn remove_drops_project() {
        let registry = CacheRegistry::new();
        let id = ProjectId::next();
        registry.replace(id, set_of(&["/p/a.yaml"]));

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.len(), 1);
        assert!(registry.get(id).is_none());
        assert_eq!(registry.project_count(), 0);
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn projects_are_isolated() {
        let registry = CacheRegistry::new();
        let p1 = ProjectId::next();
        let p2 = ProjectId::next();
        registry.replace(p1, set_of(&["/one/a.yaml"]));

        registry.replace(p2, set_of(&["/two/b.yaml"]));
        registry.invalidate(p2);
        registry.remove(p2);

        let one = registry.get(p1).unwrap();
        assert_eq!(*one, set_of(&["/one/a.yaml"]));
        assert!(!registry.contains(p1, Path::new("/two/b.yaml")));
    }

    #[test]
    fn global_is_shared() {
        let a = CacheRegistry::global();
        let b = CacheRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
