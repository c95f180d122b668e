//! The node type backing the kpt tree.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheRegistry, ProjectId};
use crate::error::CoreResult;
use crate::fs::entry::FileEntry;
use crate::fs::ops::read_directory;
use crate::tree::{EditorOpener, Presentation, TreeItem};

/// A node wrapping one file entry of a project.
///
/// Nodes are cheap, short-lived values: a new one is built for every child
/// each time its parent is expanded. Which children exist is decided by
/// the project's cached relevant set, so expanding a node never rescans.
#[derive(Clone)]
pub struct TreeNode {
    entry: FileEntry,
    project: ProjectId,
    registry: Arc<CacheRegistry>,
}

impl TreeNode {
    /// Wraps `entry` for `project`. Has no side effects.
    pub fn child(entry: FileEntry, project: ProjectId, registry: Arc<CacheRegistry>) -> Self {
        Self {
            entry,
            project,
            registry,
        }
    }

    pub fn entry(&self) -> &FileEntry {
        &self.entry
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }
}

impl TreeItem for TreeNode {
    fn children(&self) -> Vec<Self> {
        if !self.entry.is_dir() {
            return Vec::new();
        }
        let Some(relevant) = self.registry.get(self.project) else {
            return Vec::new();
        };
        if relevant.is_empty() {
            return Vec::new();
        }

        let listing = match read_directory(self.entry.path()) {
            Ok(listing) => listing,
            Err(e) => {
                debug!(path = %self.entry.path().display(), "cannot list children: {e}");
                return Vec::new();
            }
        };

        listing
            .into_iter()
            .filter(|child| relevant.contains(child.path()))
            .map(|child| TreeNode::child(child, self.project, self.registry.clone()))
            .collect()
    }

    fn presentation(&self) -> Presentation {
        Presentation::for_entry(&self.entry)
    }

    fn is_navigable(&self) -> bool {
        !self.entry.is_dir()
    }

    fn navigate(&self, opener: &mut dyn EditorOpener) -> CoreResult<()> {
        if !self.is_navigable() {
            return Ok(());
        }
        opener.open(self.entry.path())
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("path", &self.entry.path())
            .field("project", &self.project)
            .finish()
    }
}
