use crate::decode::normalize_newlines;
use crate::error::EditorError;

/// 單一游標的可編輯文字緩衝，追蹤是否有未儲存變更。 / Editable text buffer with a single caret and dirty tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBuffer {
    contents: String,
    caret: usize,
    dirty: bool,
}

impl ContentBuffer {
    /// 建立乾淨的緩衝區，游標位於開頭。 / Creates a clean buffer with the caret at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            contents: normalize_newlines(&text.into()),
            caret: 0,
            dirty: false,
        }
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn line_count(&self) -> usize {
        self.contents.lines().count().max(1)
    }

    /// 以新內容整個取代緩衝（例如編輯器的 onChange）。 / Replaces the whole buffer, as an editor change event does.
    pub fn set_contents(&mut self, text: impl Into<String>) {
        let text = normalize_newlines(&text.into());
        if text != self.contents {
            self.contents = text;
            self.dirty = true;
        }
        self.caret = self.caret.min(self.contents.len());
        while !self.contents.is_char_boundary(self.caret) {
            self.caret -= 1;
        }
    }

    /// 移動游標；位置必須落在字元邊界。 / Moves the caret; the index must sit on a char boundary.
    pub fn set_caret(&mut self, index: usize) -> Result<(), EditorError> {
        if index > self.contents.len() || !self.contents.is_char_boundary(index) {
            return Err(EditorError::CaretOutOfBounds {
                index,
                len: self.contents.len(),
            });
        }
        self.caret = index;
        Ok(())
    }

    /// 在游標處插入文字並將游標移到插入內容之後。 / Inserts at the caret and moves the caret past the insertion.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = normalize_newlines(text);
        self.contents.insert_str(self.caret, &text);
        self.caret += text.len();
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
