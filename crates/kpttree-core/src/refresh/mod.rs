//! Change-driven refresh: watch, debounce, rescan, notify the host.

pub mod controller;
pub mod debounce;
pub mod watch;

pub use controller::{RefreshController, REFRESH_DELAY};
pub use debounce::{Debouncer, RefreshState};
pub use watch::{subscribe, Subscription};
