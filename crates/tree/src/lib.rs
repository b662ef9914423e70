//! Path-addressed in-memory file tree used by FsExplorer.
//! FsExplorer 使用的記憶體檔案樹：以斜線路徑定位節點並產生新的樹快照。

mod error;
mod serde_content;

pub mod filter;
pub mod lookup;
pub mod mutator;
pub mod node;
pub mod path;
pub mod store;

pub use error::TreeError;
pub use filter::filter;
pub use lookup::{find, walk, TreeStats, WalkControl};
pub use node::{FileContent, Forest, NodeKind, NodePatch, TreeNode};
pub use path::{resolve, TreePath};
pub use store::{SubscriptionId, TreeChange, TreeSnapshot, TreeStore, DEFAULT_FOLDERS};
