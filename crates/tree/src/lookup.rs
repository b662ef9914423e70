use crate::node::{NodeKind, TreeNode};
use crate::path::TreePath;

/// Finds the node addressed by `path`; the root path addresses no single node.
/// 依路徑尋找節點；根路徑不對應任何單一節點。
pub fn find<'a>(forest: &'a [TreeNode], path: &TreePath) -> Option<&'a TreeNode> {
    let (first, rest) = path.segments().split_first()?;
    let mut node = forest.iter().find(|node| node.name == *first)?;
    for segment in rest {
        node = node.children()?.iter().find(|node| node.name == *segment)?;
    }
    Some(node)
}

/// Returned by a [`walk`] visitor to decide whether to descend into a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    SkipChildren,
}

/// Depth-first pre-order traversal in display order.
/// 以顯示順序進行深度優先（前序）走訪；`depth` 從 0 起算。
pub fn walk<F>(forest: &[TreeNode], mut visitor: F)
where
    F: FnMut(&TreePath, &TreeNode, usize) -> WalkControl,
{
    walk_level(forest, &TreePath::root(), 0, &mut visitor);
}

fn walk_level<F>(nodes: &[TreeNode], parent: &TreePath, depth: usize, visitor: &mut F)
where
    F: FnMut(&TreePath, &TreeNode, usize) -> WalkControl,
{
    for node in nodes {
        let path = parent.join(&node.name);
        let control = visitor(&path, node, depth);
        if let (WalkControl::Continue, NodeKind::Folder { children }) = (control, &node.kind) {
            walk_level(children, &path, depth + 1, visitor);
        }
    }
}

/// File/folder counts of a forest.
/// 統計樹中的檔案與資料夾數量。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
    pub content_bytes: usize,
}

impl TreeStats {
    pub fn collect(forest: &[TreeNode]) -> Self {
        let mut stats = Self::default();
        walk(forest, |_, node, _| {
            match &node.kind {
                NodeKind::Folder { .. } => stats.folders += 1,
                NodeKind::File { content } => {
                    stats.files += 1;
                    stats.content_bytes += content.len();
                }
            }
            WalkControl::Continue
        });
        stats
    }
}
