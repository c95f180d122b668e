//! Filesystem subscription feeding a [`RefreshController`].
//!
//! Uses [`notify`]'s recommended watcher, recursive on the package's scan
//! root. The subscription lives exactly as long as the returned
//! [`Subscription`]: dropping it stops the watcher and releases the
//! callback.

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::error::CoreResult;
use crate::event::{FsEvent, TreeMessage};
use crate::refresh::controller::RefreshController;

/// A live filesystem subscription for one project.
pub struct Subscription {
    watcher: RecommendedWatcher,
    path: PathBuf,
}

impl Subscription {
    /// The watched directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.watcher.unwatch(&self.path);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .finish()
    }
}

/// Watches the controller's scan root and forwards every change to it.
///
/// # Errors
///
/// Returns [`crate::CoreError::Watch`] if the watcher cannot be created or
/// the directory cannot be watched.
pub fn subscribe(
    controller: RefreshController,
    tx: UnboundedSender<TreeMessage>,
) -> CoreResult<Subscription> {
    let path = controller.anchor().scan_root().to_path_buf();
    let project = controller.project();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
        match result {
            Ok(event) => {
                for fs_event in FsEvent::from_notify(&event) {
                    controller.handle(&fs_event);
                }
            }
            Err(e) => {
                warn!(%project, "watch error: {e}");
                let _ = tx.send(TreeMessage::WatchError {
                    project,
                    message: e.to_string(),
                });
            }
        }
    })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;
    Ok(Subscription { watcher, path })
}
