//! Plain-text rendering of the whole tree for `--print`.

use kpttree_core::{TreeItem, TreeNode};

/// Renders every node below `root`, fully expanded, one per line.
/// Directories get a trailing `/`.
pub fn tree_lines(root: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(root, 0, &mut lines);
    lines
}

fn push_lines(node: &TreeNode, depth: usize, lines: &mut Vec<String>) {
    for child in node.children() {
        let label = child.presentation().label;
        let suffix = if child.entry().is_dir() { "/" } else { "" };
        lines.push(format!("{}{label}{suffix}", "  ".repeat(depth)));
        push_lines(&child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpttree_core::{CacheRegistry, KptProject, MANIFEST_RELATIVE_PATH};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn prints_filtered_tree() {
        let tmp = TempDir::new().unwrap();
        let scan_root = tmp.path().join("infra/kpt");
        fs::create_dir_all(scan_root.join("apps/web")).unwrap();
        fs::create_dir_all(scan_root.join(".git")).unwrap();
        fs::write(tmp.path().join(MANIFEST_RELATIVE_PATH), "").unwrap();
        fs::write(scan_root.join("apps/web/Kptfile"), "").unwrap();
        fs::write(scan_root.join("apps/web/deploy.yaml"), "").unwrap();
        fs::write(scan_root.join("apps/web/notes.md"), "").unwrap();
        fs::write(scan_root.join("setters.yaml"), "").unwrap();

        let project = KptProject::open_static(tmp.path(), Arc::new(CacheRegistry::new()));
        let lines = tree_lines(&project.root_node().unwrap());
        assert_eq!(
            lines,
            vec![
                "apps/",
                "  web/",
                "    Kptfile",
                "    deploy.yaml",
                "setters.yaml",
            ]
        );
    }
}
