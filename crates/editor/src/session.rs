use fsexplorer_tree::{resolve, NodePatch, TreeNode, TreePath, TreeStore};
use tracing::debug;

use crate::buffer::ContentBuffer;
use crate::decode::{decode, DecodedText};
use crate::error::EditorError;
use crate::kind::ContentKind;

/// 檢視器對選取節點的呈現方式。 / How the viewer presents a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Text { kind: ContentKind, text: String },
    Image { bytes: Vec<u8> },
    /// 空檔案不顯示任何內容。 / Empty files show nothing.
    Empty,
    Unsupported { name: String },
}

/// 依節點名稱與內容建立唯讀檢視。 / Builds a read-only view of a file node.
pub fn preview(node: &TreeNode) -> Result<ContentView, EditorError> {
    let content = node
        .content()
        .ok_or_else(|| EditorError::NotAFile(resolve(&node.name)))?;
    if content.is_empty() {
        return Ok(ContentView::Empty);
    }
    let kind = ContentKind::from_name(&node.name);
    Ok(match kind {
        ContentKind::Text | ContentKind::Json => ContentView::Text {
            kind,
            text: decode(content.as_bytes())?.text,
        },
        ContentKind::Image => ContentView::Image {
            bytes: content.as_bytes().to_vec(),
        },
        ContentKind::Unsupported => ContentView::Unsupported {
            name: node.name.clone(),
        },
    })
}

/// 開啟中的文字/JSON 檔案編輯工作階段。 / An open text or JSON file being edited.
///
/// Saving writes the buffer back through [`TreeStore::update`] in the file's
/// original encoding and line ending.
#[derive(Debug, Clone)]
pub struct EditorSession {
    path: TreePath,
    kind: ContentKind,
    format: DecodedText,
    buffer: ContentBuffer,
    validate_json: bool,
}

impl EditorSession {
    /// 從樹中載入檔案到緩衝區。 / Loads the file at `path` into a fresh buffer.
    pub fn open(store: &TreeStore, path: &str) -> Result<Self, EditorError> {
        let path = resolve(path);
        let snapshot = store.snapshot();
        let node = fsexplorer_tree::find(snapshot.forest(), &path)
            .ok_or_else(|| EditorError::NotFound(path.clone()))?;
        let content = node
            .content()
            .ok_or_else(|| EditorError::NotAFile(path.clone()))?;

        let kind = ContentKind::from_name(&node.name);
        if !kind.is_editable() {
            return Err(match kind {
                ContentKind::Image => EditorError::ReadOnly(path),
                _ => EditorError::Unsupported {
                    name: node.name.clone(),
                },
            });
        }

        let format = decode(content.as_bytes())?;
        let buffer = ContentBuffer::new(format.text.clone());
        Ok(Self {
            path,
            kind,
            format,
            buffer,
            validate_json: true,
        })
    }

    /// 是否在儲存前驗證 JSON（預設開啟）。 / Whether JSON is validated before saving (on by default).
    pub fn with_json_validation(mut self, enabled: bool) -> Self {
        self.validate_json = enabled;
        self
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn buffer(&self) -> &ContentBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ContentBuffer {
        &mut self.buffer
    }

    pub fn set_contents(&mut self, text: impl Into<String>) {
        self.buffer.set_contents(text);
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// 將緩衝內容寫回樹；未修改時不做任何事並回傳 `Ok(false)`。 /
    /// Writes the buffer back into the tree. Returns `Ok(false)` when there was nothing to save.
    pub fn save(&mut self, store: &mut TreeStore) -> Result<bool, EditorError> {
        if !self.buffer.is_dirty() {
            return Ok(false);
        }
        let text = self.buffer.contents();
        if self.kind == ContentKind::Json && self.validate_json {
            validate_json(text)?;
        }
        let bytes = self.format.encode(text)?;
        let revision = store.update(&self.path.to_string(), NodePatch::content(bytes))?;
        debug!(path = %self.path, revision, "saved editor buffer");
        self.format.text = text.to_string();
        self.buffer.mark_clean();
        Ok(true)
    }
}

fn validate_json(text: &str) -> Result<(), EditorError> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(|_| ())
        .map_err(|err| EditorError::InvalidJson {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        })
}
