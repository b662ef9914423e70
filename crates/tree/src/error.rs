use thiserror::Error;

use crate::path::TreePath;

/// Reasons a tree mutation was not applied. The input forest is always left untouched.
/// 樹狀變更未套用的原因；原始樹永遠保持不變。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("no node at `{path}`")]
    NotFound { path: TreePath },
    #[error("`{path}` is a file and cannot contain entries")]
    NotAFolder { path: TreePath },
    #[error("`{path}` is a folder and has no content")]
    NotAFile { path: TreePath },
    #[error("`{parent}` already contains an entry named `{name}`")]
    DuplicateName { parent: TreePath, name: String },
    #[error("invalid node name `{name}`")]
    InvalidName { name: String },
    #[error("path addresses the forest root")]
    EmptyPath,
}
