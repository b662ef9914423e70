use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::serde_content;

/// Ordered sequence of root-level nodes.
/// 根層節點的有序集合。
pub type Forest = Vec<TreeNode>;

/// Opaque payload of a file node (text, JSON text or binary image data).
/// 檔案節點的內容，可能是文字、JSON 或二進位圖片。
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FileContent(Vec<u8>);

impl FileContent {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the payload as text when it is valid UTF-8.
    /// 若內容為合法 UTF-8 則回傳文字。
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.debug_tuple("FileContent").field(&text).finish(),
            None => write!(f, "FileContent(<{} bytes>)", self.0.len()),
        }
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for FileContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_content::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for FileContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_content::deserialize(deserializer).map(Self)
    }
}

/// The two shapes a node can take; each carries only its own fields.
/// 節點的兩種型態：檔案只有內容，資料夾只有子節點。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        #[serde(default)]
        content: FileContent,
    },
    Folder {
        #[serde(default)]
        children: Forest,
    },
}

/// Node stored inside the forest. Never mutated once it is part of a snapshot.
/// 儲存在樹中的節點；一旦進入快照便不再就地修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn file(name: impl Into<String>, content: impl Into<FileContent>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        }
    }

    /// Empty folder.
    pub fn folder(name: impl Into<String>) -> Self {
        Self::folder_with(name, Vec::new())
    }

    pub fn folder_with(name: impl Into<String>, children: Forest) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder { children },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// Children of a folder; `None` for files.
    /// 資料夾的子節點；檔案回傳 `None`。
    pub fn children(&self) -> Option<&[TreeNode]> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// Content of a file; `None` for folders.
    /// 檔案內容；資料夾回傳 `None`。
    pub fn content(&self) -> Option<&FileContent> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Folder { .. } => None,
        }
    }

    pub(crate) fn with_children(&self, children: Forest) -> Self {
        Self::folder_with(self.name.clone(), children)
    }
}

/// Fields merged into an existing node by an update; unset fields stay as they are.
/// 更新時要合併進節點的欄位，未設定者維持原值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub name: Option<String>,
    pub content: Option<FileContent>,
}

impl NodePatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<FileContent>) -> Self {
        Self {
            name: None,
            content: Some(content.into()),
        }
    }

}
