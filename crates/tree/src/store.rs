use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::TreeError;
use crate::filter::filter;
use crate::lookup::find;
use crate::mutator;
use crate::node::{Forest, NodePatch, TreeNode};
use crate::path::{resolve, TreePath};

/// Top-level folders a fresh session starts with.
/// 新工作階段預設的頂層資料夾。
pub const DEFAULT_FOLDERS: [&str; 3] = ["public", "server", "src"];

/// Immutable view of the forest at one revision.
/// 某一版本的樹狀快照，複製成本低且永不被修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSnapshot {
    revision: u64,
    forest: Arc<Forest>,
}

impl TreeSnapshot {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn forest(&self) -> &[TreeNode] {
        &self.forest
    }

    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        find(&self.forest, &resolve(path))
    }
}

/// Describes the mutation that produced a snapshot.
/// 描述產生新快照的變更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChange {
    Created { path: TreePath },
    Deleted { path: TreePath },
    /// `from` is the addressed location, `path` the location after the update.
    /// 兩者僅在重新命名時不同。
    Updated { from: TreePath, path: TreePath },
}

/// Handle returned by [`TreeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TreeSnapshot, &TreeChange)>;

/// Session-owned holder of the current forest snapshot.
/// 持有目前樹狀快照的工作階段物件；所有變更都經由此處並通知觀察者。
///
/// Operations that fail leave the snapshot untouched and notify nobody.
pub struct TreeStore {
    snapshot: TreeSnapshot,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl TreeStore {
    pub fn new(forest: Forest) -> Self {
        Self {
            snapshot: TreeSnapshot {
                revision: 0,
                forest: Arc::new(forest),
            },
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Store seeded with [`DEFAULT_FOLDERS`].
    pub fn with_default_forest() -> Self {
        Self::from_folders(DEFAULT_FOLDERS)
    }

    /// Store seeded with empty top-level folders.
    /// 以一組空的頂層資料夾建立儲存器。
    pub fn from_folders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(TreeNode::folder).collect())
    }

    /// Current snapshot (cheap clone).
    /// 取得目前快照。
    pub fn snapshot(&self) -> TreeSnapshot {
        self.snapshot.clone()
    }

    pub fn forest(&self) -> &[TreeNode] {
        self.snapshot.forest()
    }

    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    pub fn node(&self, path: &str) -> Option<TreeNode> {
        self.snapshot.find(path).cloned()
    }

    /// Filtered copy of the current forest; the snapshot itself is unchanged.
    pub fn filtered(&self, query: &str) -> Forest {
        filter(self.forest(), query)
    }

    /// Inserts `node` under the folder addressed by `parent` and returns the new revision.
    /// 在 `parent` 資料夾下新增節點，成功時回傳新版本號。
    pub fn create(&mut self, parent: &str, node: TreeNode) -> Result<u64, TreeError> {
        let parent = resolve(parent);
        let created = parent.join(&node.name);
        let forest = mutator::insert(self.forest(), &parent, node)
            .inspect_err(|err| debug!(path = %created, error = %err, "create rejected"))?;
        Ok(self.commit(forest, TreeChange::Created { path: created }))
    }

    /// Removes the subtree addressed by `path`.
    /// 移除 `path` 所指的子樹；空路徑會清空整棵樹。
    pub fn delete(&mut self, path: &str) -> Result<u64, TreeError> {
        let path = resolve(path);
        if path.is_root() {
            warn!("delete addressed the forest root; clearing every node");
        }
        let forest = mutator::remove(self.forest(), &path)
            .inspect_err(|err| debug!(%path, error = %err, "delete rejected"))?;
        Ok(self.commit(forest, TreeChange::Deleted { path }))
    }

    /// Merges `patch` into the node addressed by `path`.
    /// 將欄位合併到 `path` 所指的節點。
    pub fn update(&mut self, path: &str, patch: NodePatch) -> Result<u64, TreeError> {
        let path = resolve(path);
        let forest = mutator::update(self.forest(), &path, &patch)
            .inspect_err(|err| debug!(%path, error = %err, "update rejected"))?;
        let location = match (&patch.name, path.parent()) {
            (Some(name), Some(parent)) => parent.join(name),
            _ => path.clone(),
        };
        Ok(self.commit(
            forest,
            TreeChange::Updated {
                from: path,
                path: location,
            },
        ))
    }

    /// Registers an observer called synchronously after every applied mutation.
    /// 註冊觀察者；每次變更套用後同步呼叫。
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TreeSnapshot, &TreeChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn commit(&mut self, forest: Forest, change: TreeChange) -> u64 {
        self.snapshot = TreeSnapshot {
            revision: self.snapshot.revision.wrapping_add(1),
            forest: Arc::new(forest),
        };
        debug!(revision = self.snapshot.revision, ?change, "tree snapshot replaced");
        for (_, observer) in &mut self.observers {
            observer(&self.snapshot, &change);
        }
        self.snapshot.revision
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::with_default_forest()
    }
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("snapshot", &self.snapshot)
            .field("observers", &self.observers.len())
            .finish()
    }
}
