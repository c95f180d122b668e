//! The tree the host displays.
//!
//! A host renders anything implementing [`TreeItem`]: it asks a node for
//! its children when the node is expanded, for a [`Presentation`] when the
//! node is drawn, and calls [`TreeItem::navigate`] when the user activates
//! a navigable node. Opening files is delegated back to the host through
//! [`EditorOpener`].

pub mod node;

use std::path::Path;

use crate::error::CoreResult;
use crate::fs::entry::FileEntry;
use crate::kpt::relevance::KPTFILE_NAME;

pub use node::TreeNode;

/// Capability set of a displayable node.
pub trait TreeItem: Sized {
    /// The node's visible children. Empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// Glyph and label used to draw the node.
    fn presentation(&self) -> Presentation;

    /// Whether activating the node opens something.
    fn is_navigable(&self) -> bool;

    /// Opens the node through `opener`. A no-op for non-navigable nodes.
    ///
    /// # Errors
    ///
    /// Propagates whatever the opener reports.
    fn navigate(&self, opener: &mut dyn EditorOpener) -> CoreResult<()>;
}

/// Host service that brings a file into view.
pub trait EditorOpener {
    fn open(&mut self, path: &Path) -> CoreResult<()>;
}

/// Kind of icon a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Folder,
    Kptfile,
    Yaml,
    File,
}

impl Glyph {
    /// Picks the glyph for a file entry.
    pub fn for_entry(entry: &FileEntry) -> Self {
        if entry.is_dir() {
            return Glyph::Folder;
        }
        let name = entry.name();
        if name == KPTFILE_NAME {
            Glyph::Kptfile
        } else if name.ends_with(".yaml") || name.ends_with(".yml") {
            Glyph::Yaml
        } else {
            Glyph::File
        }
    }
}

/// How a node is drawn: its glyph and its bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub glyph: Glyph,
    pub label: String,
}

impl Presentation {
    pub fn for_entry(entry: &FileEntry) -> Self {
        Self {
            glyph: Glyph::for_entry(entry),
            label: entry.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn glyph_for_directory() {
        let entry = FileEntry::from_parts(PathBuf::from("/p/base.yaml"), true);
        assert_eq!(Glyph::for_entry(&entry), Glyph::Folder);
    }

    #[test]
    fn glyph_for_files() {
        let cases = [
            ("Kptfile", Glyph::Kptfile),
            ("svc.yaml", Glyph::Yaml),
            ("svc.yml", Glyph::Yaml),
            ("run.sh", Glyph::File),
        ];
        for (name, glyph) in cases {
            let entry = FileEntry::from_parts(PathBuf::from("/p").join(name), false);
            assert_eq!(Glyph::for_entry(&entry), glyph, "{name}");
        }
    }

    #[test]
    fn presentation_uses_bare_name() {
        let entry = FileEntry::from_parts(PathBuf::from("/p/apps/web"), true);
        let p = Presentation::for_entry(&entry);
        assert_eq!(p.label, "web");
        assert_eq!(p.glyph, Glyph::Folder);
    }
}
