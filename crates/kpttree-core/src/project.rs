//! An opened kpt project and its lifetime.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::cache::{CacheRegistry, ProjectId};
use crate::event::{FsEvent, TreeMessage};
use crate::fs::entry::FileEntry;
use crate::kpt::anchor::ManifestAnchor;
use crate::kpt::scan::scan_and_filter;
use crate::refresh::{subscribe, RefreshController, RefreshState, Subscription};
use crate::tree::TreeNode;

/// A project opened by the host.
///
/// Opening a project registers its cache, starts the first scan in the
/// background and subscribes to filesystem changes below the package.
/// Dropping it releases all of that: the watcher stops, a pending rescan is
/// cancelled and the cache entry is removed.
#[derive(Debug)]
pub struct KptProject {
    id: ProjectId,
    root: PathBuf,
    anchor: Option<ManifestAnchor>,
    registry: Arc<CacheRegistry>,
    controller: Option<RefreshController>,
    subscription: Option<Subscription>,
}

impl KptProject {
    /// Opens the project at `root`.
    ///
    /// When the project has no kpt manifest the project is still opened,
    /// but stays inert: no scan, no subscription, and
    /// [`KptProject::root_node`] returns `None`.
    pub fn open(
        root: &Path,
        registry: Arc<CacheRegistry>,
        tx: UnboundedSender<TreeMessage>,
        handle: Handle,
    ) -> Self {
        let mut project = Self::register(root, registry);

        if let Some(anchor) = project.anchor.clone() {
            let controller = RefreshController::new(
                project.id,
                anchor,
                project.registry.clone(),
                tx.clone(),
                handle.clone(),
            );

            let initial = controller.clone();
            handle.spawn(async move {
                initial.rescan().await;
            });

            project.subscription = match subscribe(controller.clone(), tx) {
                Ok(subscription) => Some(subscription),
                Err(e) => {
                    warn!(project = %project.id, "auto-refresh disabled: {e}");
                    None
                }
            };
            project.controller = Some(controller);
        }

        project
    }

    /// Opens the project and scans it on the calling thread, without
    /// subscribing to changes. Meant for one-shot use such as printing.
    pub fn open_static(root: &Path, registry: Arc<CacheRegistry>) -> Self {
        let project = Self::register(root, registry);
        project.scan_now();
        project
    }

    fn register(root: &Path, registry: Arc<CacheRegistry>) -> Self {
        let id = ProjectId::next();
        registry.get_or_create(id);
        let anchor = ManifestAnchor::resolve(root);
        match &anchor {
            Some(anchor) => info!(project = %id, scan_root = %anchor.scan_root().display(), "opened kpt project"),
            None => info!(project = %id, root = %root.display(), "opened project without kpt manifest"),
        }

        Self {
            id,
            root: root.to_path_buf(),
            anchor,
            registry,
            controller: None,
            subscription: None,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn anchor(&self) -> Option<&ManifestAnchor> {
        self.anchor.as_ref()
    }

    pub fn registry(&self) -> &Arc<CacheRegistry> {
        &self.registry
    }

    /// Returns `true` when filesystem changes are being watched.
    pub fn is_watching(&self) -> bool {
        self.subscription.is_some()
    }

    /// The root of the tree: the package's scan root.
    ///
    /// `None` when the project isn't kpt-structured or the scan root has
    /// disappeared since the project was opened.
    pub fn root_node(&self) -> Option<TreeNode> {
        let anchor = self.anchor.as_ref()?;
        let entry = FileEntry::from_path(anchor.scan_root()).ok()?;
        Some(TreeNode::child(entry, self.id, self.registry.clone()))
    }

    /// Scans synchronously and publishes the result.
    pub fn scan_now(&self) {
        let set = scan_and_filter(&self.root);
        if !self.registry.replace_existing(self.id, set) {
            debug!(project = %self.id, "project closed, scan dropped");
        }
    }

    /// Rescans in the background and publishes, as a debounced refresh
    /// would, but without waiting for the timer.
    pub async fn rescan(&self) {
        match &self.controller {
            Some(controller) => {
                controller.rescan().await;
            }
            None => self.scan_now(),
        }
    }

    /// Feeds an event from a host-provided watch service.
    pub fn handle_event(&self, event: &FsEvent) -> bool {
        self.controller
            .as_ref()
            .is_some_and(|controller| controller.handle(event))
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.controller
            .as_ref()
            .map_or(RefreshState::Idle, RefreshController::state)
    }

    /// Closes the project. Equivalent to dropping it.
    pub fn close(self) {}
}

impl Drop for KptProject {
    fn drop(&mut self) {
        self.subscription.take();
        if let Some(controller) = self.controller.take() {
            controller.cancel();
        }
        self.registry.remove(self.id);
        debug!(project = %self.id, "closed project");
    }
}
