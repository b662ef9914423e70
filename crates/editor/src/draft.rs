use fsexplorer_tree::TreeNode;

use crate::error::EditorError;
use crate::kind::FileType;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// 新增檔案對話框收集到的資料。 / What the "create file" dialog collects before a node is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDraft {
    stem: String,
    file_type: FileType,
    upload: Option<Vec<u8>>,
}

impl FileDraft {
    pub fn new(stem: impl Into<String>, file_type: FileType) -> Self {
        Self {
            stem: stem.into(),
            file_type,
            upload: None,
        }
    }

    /// 由上傳的檔案建立草稿：主檔名取第一個 `.` 之前，類型取副檔名。 /
    /// Drafts from an uploaded file: the stem is the text before the first `.`,
    /// the type comes from the extension.
    pub fn from_upload(file_name: &str, bytes: impl Into<Vec<u8>>) -> Result<Self, EditorError> {
        let (stem, extension) = file_name
            .split_once('.')
            .map(|(stem, rest)| (stem, rest.rsplit('.').next().unwrap_or(rest)))
            .unwrap_or((file_name, ""));
        let file_type =
            FileType::from_extension(extension).ok_or_else(|| EditorError::Unsupported {
                name: file_name.to_string(),
            })?;
        Ok(Self::new(stem, file_type).with_upload(bytes))
    }

    pub fn with_upload(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.upload = Some(bytes.into());
        self
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// 最終檔名 `stem.ext`。 / Final node name, `stem.ext`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem.trim(), self.file_type.extension())
    }

    /// 驗證後建立檔案節點。 / Validates the draft and builds the file node.
    pub fn build(self) -> Result<TreeNode, EditorError> {
        let stem = self.stem.trim();
        if stem.is_empty() || stem.contains('/') {
            return Err(EditorError::InvalidName(self.stem.clone()));
        }
        let name = self.file_name();
        let content = match (self.file_type, self.upload) {
            (FileType::Png, None) => return Err(EditorError::MissingUpload),
            (FileType::Png, Some(bytes)) if !bytes.starts_with(PNG_SIGNATURE) => {
                return Err(EditorError::NotPng)
            }
            (_, Some(bytes)) => bytes,
            (file_type, None) => file_type.default_content().as_bytes().to_vec(),
        };
        Ok(TreeNode::file(name, content))
    }
}

/// 新增資料夾對話框的資料。 / Folder name collected by the "create folder" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderDraft {
    name: String,
}

impl FolderDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn build(self) -> Result<TreeNode, EditorError> {
        let name = self.name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(EditorError::InvalidName(self.name.clone()));
        }
        Ok(TreeNode::folder(name))
    }
}
