//! kpttree core library: UI-agnostic kpt package tree logic.
//!
//! `kpttree-core` decides which files of a kpt package are shown, caches
//! that decision per project, and keeps it fresh as the filesystem
//! changes. It knows nothing about drawing; a host (such as `kpttree-tui`)
//! renders [`TreeNode`]s and reacts to [`TreeMessage`]s.
//!
//! # Modules
//!
//! - [`kpt`]: Manifest location, the relevance predicate and scanning.
//! - [`cache`]: Per-project [`RelevantSet`]s in a process-wide [`CacheRegistry`].
//! - [`tree`]: The [`TreeItem`] capability set and the [`TreeNode`] implementing it.
//! - [`refresh`]: Watching, debouncing and rescanning.
//! - [`project`]: [`KptProject`], tying the above to one project's lifetime.
//! - [`fs`]: File system abstractions: [`FileEntry`] and directory reading.
//! - [`config`]: User-facing configuration (TOML settings, colours).
//! - [`event`]: Filesystem events in, host messages out.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod cache;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod kpt;
pub mod project;
pub mod refresh;
pub mod tree;

pub use cache::{CacheRegistry, ProjectId, RelevantSet};
pub use config::settings::Config;
pub use config::theme::{parse_color, Theme};
pub use error::{CoreError, CoreResult};
pub use event::{FsEvent, FsEventKind, TreeMessage};
pub use fs::entry::FileEntry;
pub use fs::ops::{collect_descendants, read_directory};
pub use kpt::{is_relevant, scan_and_filter, ManifestAnchor, MANIFEST_RELATIVE_PATH};
pub use project::KptProject;
pub use refresh::{Debouncer, RefreshController, RefreshState, REFRESH_DELAY};
pub use tree::{EditorOpener, Glyph, Presentation, TreeItem, TreeNode};
