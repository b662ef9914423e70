use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// 建立新檔案時可選擇的類型。 / File types offered when creating a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Txt,
    Json,
    Png,
}

impl FileType {
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Json => "json",
            FileType::Png => "png",
        }
    }

    /// 新建檔案（非上傳）時的預設內容。 / Content of a freshly created file without an upload.
    pub fn default_content(self) -> &'static str {
        match self {
            FileType::Txt => "",
            FileType::Json => "{}",
            FileType::Png => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileType::Txt => "Text File (.txt)",
            FileType::Json => "JSON File (.json)",
            FileType::Png => "Image File (.png)",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(FileType::Txt),
            "json" => Some(FileType::Json),
            "png" => Some(FileType::Png),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileType {
    type Err = EditorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim().trim_start_matches('.');
        Self::from_extension(trimmed).ok_or_else(|| EditorError::Unsupported {
            name: value.to_string(),
        })
    }
}

/// 依檔名判定的內容類別，決定檢視器如何呈現。 / How the viewer treats a file, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Json,
    Image,
    Unsupported,
}

impl ContentKind {
    /// 依副檔名（不分大小寫）判定。 / Classifies by the case-insensitive extension.
    pub fn from_name(name: &str) -> Self {
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match FileType::from_extension(extension) {
            Some(FileType::Txt) => ContentKind::Text,
            Some(FileType::Json) => ContentKind::Json,
            Some(FileType::Png) => ContentKind::Image,
            None => ContentKind::Unsupported,
        }
    }

    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            ContentKind::Text => Some("text/plain"),
            ContentKind::Json => Some("application/json"),
            ContentKind::Image => Some("image/png"),
            ContentKind::Unsupported => None,
        }
    }

    pub fn is_editable(self) -> bool {
        matches!(self, ContentKind::Text | ContentKind::Json)
    }
}
