//! Content viewing and editing on top of the FsExplorer tree.
//! 檔案內容的檢視、編輯與存回樹狀結構。

pub mod buffer;
pub mod decode;
pub mod draft;
pub mod error;
pub mod kind;
pub mod session;

pub use buffer::ContentBuffer;
pub use decode::{decode, DecodedText, LineEnding};
pub use draft::{FileDraft, FolderDraft};
pub use error::EditorError;
pub use kind::{ContentKind, FileType};
pub use session::{preview, ContentView, EditorSession};
