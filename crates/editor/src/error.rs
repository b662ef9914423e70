use fsexplorer_tree::{TreeError, TreePath};
use thiserror::Error;

/// 編輯與建立檔案時可能發生的錯誤。 / Errors raised while creating, opening or saving file content.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no file at `{0}`")]
    NotFound(TreePath),
    #[error("`{0}` is a folder")]
    NotAFile(TreePath),
    #[error("unsupported file type for `{name}`")]
    Unsupported { name: String },
    #[error("`{0}` is an image and cannot be edited as text")]
    ReadOnly(TreePath),
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("name `{0}` is empty or contains `/`")]
    InvalidName(String),
    #[error("a PNG file needs an uploaded image")]
    MissingUpload,
    #[error("uploaded data is not a PNG image")]
    NotPng,
    #[error("file content encoding is not supported or data is invalid")]
    InvalidEncoding,
    #[error("text cannot be represented in target encoding {0}")]
    Unrepresentable(&'static str),
    #[error("caret index {index} is out of bounds for buffer of length {len}")]
    CaretOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
