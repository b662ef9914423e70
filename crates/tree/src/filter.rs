use crate::node::{Forest, NodeKind, TreeNode};

/// Keeps nodes whose name, or some descendant's name, contains `query`
/// case-insensitively. Kept folders only show their matching branches.
/// 依名稱（不分大小寫）篩選：節點本身或任一後代符合即保留，資料夾只保留符合的分支。
pub fn filter(forest: &[TreeNode], query: &str) -> Forest {
    if query.is_empty() {
        return forest.to_vec();
    }
    filter_level(forest, &query.to_lowercase())
}

fn filter_level(nodes: &[TreeNode], needle: &str) -> Forest {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, needle))
        .collect()
}

fn filter_node(node: &TreeNode, needle: &str) -> Option<TreeNode> {
    let name_matches = name_contains(&node.name, needle);
    match &node.kind {
        NodeKind::File { .. } => name_matches.then(|| node.clone()),
        NodeKind::Folder { children } => {
            let kept = filter_level(children, needle);
            (name_matches || !kept.is_empty()).then(|| node.with_children(kept))
        }
    }
}

fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}
