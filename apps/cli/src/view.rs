use std::collections::BTreeSet;

use fsexplorer_tree::{filter, walk, TreeChange, TreeNode, TreePath, WalkControl};

/// 檢視層狀態：展開的資料夾與篩選字串，不屬於樹本身。 /
/// View-local state: expanded folders and the filter query. Never stored in the tree.
#[derive(Debug, Default, Clone)]
pub struct ExplorerView {
    expanded: BTreeSet<TreePath>,
    filter: String,
}

impl ExplorerView {
    pub fn expand(&mut self, path: TreePath) {
        self.expanded.insert(path);
    }

    pub fn collapse(&mut self, path: &TreePath) {
        self.expanded.remove(path);
    }

    pub fn toggle(&mut self, path: TreePath) {
        if !self.expanded.remove(&path) {
            self.expanded.insert(path);
        }
    }

    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded.contains(path)
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
    }

    /// 依樹的變更維護展開狀態。 / Keeps expansion state in step with tree changes.
    pub fn apply_change(&mut self, change: &TreeChange) {
        match change {
            TreeChange::Deleted { path } => {
                self.expanded.retain(|expanded| !expanded.starts_with(path));
            }
            TreeChange::Updated { from, path } if from != path => {
                self.expanded = std::mem::take(&mut self.expanded)
                    .into_iter()
                    .map(|expanded| expanded.replace_prefix(from, path).unwrap_or(expanded))
                    .collect();
            }
            _ => {}
        }
    }

    /// 將樹渲染成縮排清單；篩選中時所有資料夾都展開。 /
    /// Renders the forest as an indented list. With an active filter every folder is shown open.
    pub fn render(&self, forest: &[TreeNode]) -> String {
        let visible = filter(forest, &self.filter);
        if visible.is_empty() {
            return if self.filter.is_empty() {
                "(empty)\n".to_string()
            } else {
                format!("(no matches for \"{}\")\n", self.filter)
            };
        }

        let force_open = !self.filter.is_empty();
        let mut lines = Vec::new();
        walk(&visible, |path, node, depth| {
            let indent = "  ".repeat(depth);
            if !node.is_folder() {
                lines.push(format!("{indent}  {}", node.name));
                return WalkControl::Continue;
            }
            let open = force_open || self.is_expanded(path);
            let marker = if open { '▾' } else { '▸' };
            lines.push(format!("{indent}{marker} {}/", node.name));
            if open {
                WalkControl::Continue
            } else {
                WalkControl::SkipChildren
            }
        });
        lines.push(String::new());
        lines.join("\n")
    }
}
