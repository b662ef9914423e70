//! Pure path-addressed mutations. Every function reads the input forest and
//! builds a new one; untouched siblings are cloned as-is.
//! 以路徑定位的純函式變更：讀取原始樹並建立新樹，不就地修改。

use crate::error::TreeError;
use crate::node::{Forest, NodeKind, NodePatch, TreeNode};
use crate::path::TreePath;

/// Appends `node` to the folder addressed by `parent` (the root level when empty).
/// 將 `node` 附加到 `parent` 所指的資料夾尾端；空路徑代表根層。
pub fn insert(forest: &[TreeNode], parent: &TreePath, node: TreeNode) -> Result<Forest, TreeError> {
    validate_name(&node.name)?;
    insert_into(forest, parent, 0, node)
}

fn insert_into(
    nodes: &[TreeNode],
    parent: &TreePath,
    depth: usize,
    node: TreeNode,
) -> Result<Forest, TreeError> {
    let Some(head) = parent.segments().get(depth) else {
        if position(nodes, &node.name).is_some() {
            return Err(TreeError::DuplicateName {
                parent: parent.clone(),
                name: node.name,
            });
        }
        let mut next = nodes.to_vec();
        next.push(node);
        return Ok(next);
    };

    let index = position(nodes, head).ok_or_else(|| TreeError::NotFound {
        path: parent.prefix(depth + 1),
    })?;
    let target = &nodes[index];
    let children = match &target.kind {
        NodeKind::Folder { children } => children,
        NodeKind::File { .. } => {
            return Err(TreeError::NotAFolder {
                path: parent.prefix(depth + 1),
            })
        }
    };
    let children = insert_into(children, parent, depth + 1, node)?;
    Ok(replace_at(nodes, index, target.with_children(children)))
}

/// Removes the node addressed by `path` together with its subtree.
/// 移除 `path` 所指節點及其子樹。
///
/// The empty path addresses the whole level and yields an empty forest.
pub fn remove(forest: &[TreeNode], path: &TreePath) -> Result<Forest, TreeError> {
    if path.is_root() {
        return Ok(Vec::new());
    }
    remove_from(forest, path, 0)
}

fn remove_from(nodes: &[TreeNode], path: &TreePath, depth: usize) -> Result<Forest, TreeError> {
    let segments = path.segments();
    let index = position(nodes, &segments[depth]).ok_or_else(|| TreeError::NotFound {
        path: path.prefix(depth + 1),
    })?;

    if depth + 1 == segments.len() {
        let mut next = nodes.to_vec();
        next.remove(index);
        return Ok(next);
    }

    let target = &nodes[index];
    match &target.kind {
        NodeKind::Folder { children } => {
            let children = remove_from(children, path, depth + 1)?;
            Ok(replace_at(nodes, index, target.with_children(children)))
        }
        NodeKind::File { .. } => Err(TreeError::NotFound {
            path: path.prefix(depth + 2),
        }),
    }
}

/// Merges `patch` into the node addressed by `path`.
/// 將 `patch` 合併至 `path` 所指節點，未指定的欄位保持原值。
pub fn update(forest: &[TreeNode], path: &TreePath, patch: &NodePatch) -> Result<Forest, TreeError> {
    if path.is_root() {
        return Err(TreeError::EmptyPath);
    }
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    update_in(forest, path, 0, patch)
}

fn update_in(
    nodes: &[TreeNode],
    path: &TreePath,
    depth: usize,
    patch: &NodePatch,
) -> Result<Forest, TreeError> {
    let segments = path.segments();
    let index = position(nodes, &segments[depth]).ok_or_else(|| TreeError::NotFound {
        path: path.prefix(depth + 1),
    })?;
    let target = &nodes[index];

    let replacement = if depth + 1 == segments.len() {
        if let Some(name) = &patch.name {
            if *name != target.name && position(nodes, name).is_some() {
                return Err(TreeError::DuplicateName {
                    parent: path.prefix(depth),
                    name: name.clone(),
                });
            }
        }
        apply_patch(target, patch, path)?
    } else {
        match &target.kind {
            NodeKind::Folder { children } => {
                target.with_children(update_in(children, path, depth + 1, patch)?)
            }
            NodeKind::File { .. } => {
                return Err(TreeError::NotFound {
                    path: path.prefix(depth + 2),
                })
            }
        }
    };
    Ok(replace_at(nodes, index, replacement))
}

fn apply_patch(target: &TreeNode, patch: &NodePatch, path: &TreePath) -> Result<TreeNode, TreeError> {
    let mut updated = target.clone();
    if let Some(content) = &patch.content {
        match &mut updated.kind {
            NodeKind::File { content: current } => *current = content.clone(),
            NodeKind::Folder { .. } => {
                return Err(TreeError::NotAFile { path: path.clone() });
            }
        }
    }
    if let Some(name) = &patch.name {
        updated.name = name.clone();
    }
    Ok(updated)
}

// First match in sibling order wins.
fn position(nodes: &[TreeNode], name: &str) -> Option<usize> {
    nodes.iter().position(|node| node.name == name)
}

fn replace_at(nodes: &[TreeNode], index: usize, replacement: TreeNode) -> Forest {
    let mut next = nodes.to_vec();
    next[index] = replacement;
    next
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name.contains('/') {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
