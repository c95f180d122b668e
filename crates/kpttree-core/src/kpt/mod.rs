//! kpt package discovery: where the manifest lives, which entries matter,
//! and how a package directory is scanned into a relevant set.

pub mod anchor;
pub mod relevance;
pub mod scan;

pub use anchor::{ManifestAnchor, MANIFEST_RELATIVE_PATH};
pub use relevance::{is_relevant, is_relevant_name, is_relevant_opt, KPTFILE_NAME};
pub use scan::{filter_relevant, scan_and_filter, scan_anchor, scan_in_background};
