//! Application state for the tree view.
//!
//! The tree is kept flattened into visible rows. Expanding or collapsing a
//! directory, or a rebuild after a rescan, recomputes the rows from the
//! root node; the set of expanded directories and the selected path survive
//! every recomputation as long as those paths are still shown.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use kpttree_core::{TreeItem, TreeNode};

/// One visible line of the tree.
#[derive(Debug, Clone)]
pub struct Row {
    node: TreeNode,
    depth: usize,
    expanded: bool,
}

impl Row {
    pub fn node(&self) -> &TreeNode {
        &self.node
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_dir(&self) -> bool {
        self.node.entry().is_dir()
    }

    pub fn path(&self) -> &Path {
        self.node.entry().path()
    }
}

/// Top-level application state. Transitions consume `self` and return the
/// new state.
#[derive(Debug, Clone)]
pub struct App {
    root: Option<TreeNode>,
    rows: Vec<Row>,
    expanded: HashSet<PathBuf>,
    selected: usize,
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    /// Builds the view for `root`. The root itself is not shown; its
    /// children form the top level.
    pub fn new(root: Option<TreeNode>) -> Self {
        let rows = flatten(root.as_ref(), &HashSet::new());
        Self {
            root,
            rows,
            expanded: HashSet::new(),
            selected: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.expanded.contains(path)
    }

    /// Rebuilds the rows from a fresh root node.
    ///
    /// Expanded directories that disappeared are forgotten. The selection
    /// stays on the same path when it is still visible, otherwise the
    /// cursor keeps its index, clamped to the new row count.
    pub fn with_rebuilt(self, root: Option<TreeNode>) -> Self {
        let selected_path = self.selected_row().map(|row| row.path().to_path_buf());
        let expanded: HashSet<PathBuf> = self
            .expanded
            .into_iter()
            .filter(|path| path.is_dir())
            .collect();
        let rows = flatten(root.as_ref(), &expanded);

        let selected = selected_path
            .and_then(|path| rows.iter().position(|row| row.path() == path))
            .unwrap_or_else(|| clamp(self.selected, rows.len()));

        Self {
            root,
            rows,
            expanded,
            selected,
            ..self
        }
    }

    pub fn with_cursor_down(self) -> Self {
        let selected = clamp(self.selected + 1, self.rows.len());
        Self { selected, ..self }
    }

    pub fn with_cursor_up(self) -> Self {
        let selected = self.selected.saturating_sub(1);
        Self { selected, ..self }
    }

    pub fn with_cursor_top(self) -> Self {
        Self { selected: 0, ..self }
    }

    pub fn with_cursor_bottom(self) -> Self {
        let selected = self.rows.len().saturating_sub(1);
        Self { selected, ..self }
    }

    /// Expands the selected directory. Files and expanded directories are
    /// left alone.
    pub fn with_expand(self) -> Self {
        match self.selected_row() {
            Some(row) if row.is_dir() && !row.is_expanded() => {
                let path = row.path().to_path_buf();
                self.with_expanded_path(path, true)
            }
            _ => self,
        }
    }

    /// Collapses the selected directory, or moves to the parent row when
    /// the selection is a file or an already collapsed directory.
    pub fn with_collapse(self) -> Self {
        let Some(row) = self.selected_row() else {
            return self;
        };

        if row.is_dir() && row.is_expanded() {
            let path = row.path().to_path_buf();
            return self.with_expanded_path(path, false);
        }

        let depth = row.depth();
        if depth == 0 {
            return self;
        }
        let parent = self.rows[..self.selected]
            .iter()
            .rposition(|candidate| candidate.depth() < depth);
        match parent {
            Some(selected) => Self { selected, ..self },
            None => self,
        }
    }

    /// Toggles the selected directory.
    pub fn with_toggle(self) -> Self {
        match self.selected_row() {
            Some(row) if row.is_dir() => {
                let path = row.path().to_path_buf();
                let expand = !row.is_expanded();
                self.with_expanded_path(path, expand)
            }
            _ => self,
        }
    }

    pub fn with_status(self, msg: String) -> Self {
        Self {
            status_message: Some(msg),
            ..self
        }
    }

    pub fn with_clear_status(self) -> Self {
        Self {
            status_message: None,
            ..self
        }
    }

    pub fn with_quit(self) -> Self {
        Self {
            should_quit: true,
            ..self
        }
    }

    fn with_expanded_path(self, path: PathBuf, expand: bool) -> Self {
        let mut expanded = self.expanded;
        if expand {
            expanded.insert(path);
        } else {
            // descendants stay remembered for when the parent reopens
            expanded.remove(&path);
        }
        let rows = flatten(self.root.as_ref(), &expanded);
        let selected = clamp(self.selected, rows.len());
        Self {
            rows,
            expanded,
            selected,
            ..self
        }
    }
}

fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

fn flatten(root: Option<&TreeNode>, expanded: &HashSet<PathBuf>) -> Vec<Row> {
    let mut rows = Vec::new();
    if let Some(root) = root {
        push_children(root, 0, expanded, &mut rows);
    }
    rows
}

fn push_children(
    node: &TreeNode,
    depth: usize,
    expanded: &HashSet<PathBuf>,
    rows: &mut Vec<Row>,
) {
    for child in node.children() {
        let is_expanded = child.entry().is_dir() && expanded.contains(child.entry().path());
        rows.push(Row {
            node: child.clone(),
            depth,
            expanded: is_expanded,
        });
        if is_expanded {
            push_children(&child, depth + 1, expanded, rows);
        }
    }
}
