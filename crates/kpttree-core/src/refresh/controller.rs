//! Turns filesystem events into debounced rescans.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheRegistry, ProjectId};
use crate::event::{FsEvent, FsEventKind, TreeMessage};
use crate::fs::entry::FileEntry;
use crate::kpt::anchor::ManifestAnchor;
use crate::kpt::relevance::is_relevant;
use crate::kpt::scan::scan_in_background;
use crate::refresh::debounce::{Debouncer, RefreshState};

/// Delay between the last qualifying event and the rescan it triggers.
pub const REFRESH_DELAY: Duration = Duration::from_millis(1000);

/// Refresh policy for one project.
///
/// A creation or deletion of a relevant entry arms the debounce timer;
/// when it fires the project is rescanned on the blocking pool, the new
/// set replaces the cached one and [`TreeMessage::Rebuild`] is sent to the
/// host. Cloning gives another handle to the same controller.
#[derive(Debug, Clone)]
pub struct RefreshController {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    project: ProjectId,
    anchor: ManifestAnchor,
    registry: Arc<CacheRegistry>,
    debouncer: Debouncer,
    // scans of one project never overlap
    scan_lock: Mutex<()>,
    tx: UnboundedSender<TreeMessage>,
}

impl RefreshController {
    pub fn new(
        project: ProjectId,
        anchor: ManifestAnchor,
        registry: Arc<CacheRegistry>,
        tx: UnboundedSender<TreeMessage>,
        handle: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                project,
                anchor,
                registry,
                debouncer: Debouncer::new(handle),
                scan_lock: Mutex::new(()),
                tx,
            }),
        }
    }

    pub fn project(&self) -> ProjectId {
        self.inner.project
    }

    pub fn anchor(&self) -> &ManifestAnchor {
        &self.inner.anchor
    }

    /// Returns `true` if `event` should trigger a rescan.
    ///
    /// Only creations and deletions of relevant entries qualify. A deleted
    /// path can't be stat'ed, so unless the watcher reported its kind it
    /// qualifies when it was in the cached set.
    pub fn qualifies(&self, event: &FsEvent) -> bool {
        let is_dir = match (event.kind, event.is_dir) {
            (FsEventKind::Modified, _) => return false,
            (_, Some(is_dir)) => is_dir,
            (FsEventKind::Created, None) => event.path.is_dir(),
            (FsEventKind::Deleted, None) => false,
        };

        let entry = FileEntry::from_parts(event.path.clone(), is_dir);
        is_relevant(&entry)
            || (event.kind == FsEventKind::Deleted
                && self.inner.registry.contains(self.inner.project, &event.path))
    }

    /// Feeds one event into the state machine. Returns `true` if it armed
    /// (or re-armed) the timer.
    pub fn handle(&self, event: &FsEvent) -> bool {
        if !self.qualifies(event) {
            return false;
        }
        debug!(project = %self.inner.project, path = %event.path.display(), kind = ?event.kind, "arming rescan");
        self.arm(REFRESH_DELAY);
        true
    }

    /// Current state of the refresh state machine.
    pub fn state(&self) -> RefreshState {
        self.inner.debouncer.state()
    }

    /// Cancels a pending rescan, if any.
    pub fn cancel(&self) -> bool {
        self.inner.debouncer.cancel()
    }

    /// Rescans immediately and publishes the result.
    ///
    /// Returns `false` if the project was closed before the scan finished,
    /// in which case nothing is published.
    pub async fn rescan(&self) -> bool {
        self.inner.rescan().await
    }

    fn arm(&self, delay: Duration) {
        // the timer must not keep a closed project alive
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.debouncer.arm(delay, move || async move {
            if let Some(inner) = weak.upgrade() {
                inner.rescan().await;
            }
        });
    }
}

impl Inner {
    async fn rescan(&self) -> bool {
        let _guard = self.scan_lock.lock().await;
        let set = scan_in_background(self.anchor.project_root().to_path_buf()).await;
        let relevant = set.len();

        if !self.registry.replace_existing(self.project, set) {
            debug!(project = %self.project, "project closed during scan, dropping result");
            return false;
        }
        debug!(project = %self.project, relevant, "published rescan");

        if self
            .tx
            .send(TreeMessage::Rebuild {
                project: self.project,
            })
            .is_err()
        {
            debug!(project = %self.project, "host is gone, rebuild not delivered");
        }
        true
    }
}
