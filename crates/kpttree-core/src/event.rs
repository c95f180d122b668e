//! Events flowing into and out of the core.
//!
//! [`FsEvent`]s come **from the filesystem** (translated from `notify`)
//! and drive the refresh controller. [`TreeMessage`]s go **to the host**,
//! which drains them on its UI thread.

use std::path::PathBuf;

use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind, RenameMode};

use crate::cache::ProjectId;

/// What happened to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    Created,
    Deleted,
    /// Content or metadata change; never triggers a rescan.
    Modified,
}

/// A single filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
    /// Directory flag when the watcher reported it.
    pub is_dir: Option<bool>,
}

impl FsEvent {
    pub fn created(path: impl Into<PathBuf>, is_dir: Option<bool>) -> Self {
        Self {
            kind: FsEventKind::Created,
            path: path.into(),
            is_dir,
        }
    }

    pub fn deleted(path: impl Into<PathBuf>, is_dir: Option<bool>) -> Self {
        Self {
            kind: FsEventKind::Deleted,
            path: path.into(),
            is_dir,
        }
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FsEventKind::Modified,
            path: path.into(),
            is_dir: None,
        }
    }

    /// Returns `true` for creations and deletions.
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, FsEventKind::Created | FsEventKind::Deleted)
    }

    /// Translates a `notify` event into zero or more [`FsEvent`]s.
    ///
    /// Renames become a deletion of the old path and a creation of the new.
    pub fn from_notify(event: &notify::Event) -> Vec<FsEvent> {
        let paths = event.paths.iter().cloned();
        match &event.kind {
            EventKind::Create(kind) => {
                let is_dir = match kind {
                    CreateKind::Folder => Some(true),
                    CreateKind::File => Some(false),
                    _ => None,
                };
                paths.map(|p| FsEvent::created(p, is_dir)).collect()
            }
            EventKind::Remove(kind) => {
                let is_dir = match kind {
                    RemoveKind::Folder => Some(true),
                    RemoveKind::File => Some(false),
                    _ => None,
                };
                paths.map(|p| FsEvent::deleted(p, is_dir)).collect()
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                paths.map(|p| FsEvent::deleted(p, None)).collect()
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                paths.map(|p| FsEvent::created(p, None)).collect()
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
                vec![
                    FsEvent::deleted(event.paths[0].clone(), None),
                    FsEvent::created(event.paths[1].clone(), None),
                ]
            }
            EventKind::Access(_) => Vec::new(),
            _ => paths.map(FsEvent::modified).collect(),
        }
    }
}

/// A notification the core sends to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeMessage {
    /// The project's relevant set was replaced; rebuild the tree from the root.
    Rebuild { project: ProjectId },
    /// The project's watcher reported an error.
    WatchError { project: ProjectId, message: String },
}
