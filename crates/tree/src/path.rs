use std::fmt;

use serde::{Deserialize, Serialize};

/// Location inside the forest, kept as its ordered non-empty segments.
/// 樹狀結構中的位置，以有序且非空的路徑段保存。
///
/// The empty path addresses the forest root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(Vec<String>);

/// Splits a `/`-delimited string into segments, discarding empty ones.
/// 以 `/` 切割路徑字串並捨棄空白段，`"a//b/"`、`"/a/b"` 皆解析為 `["a", "b"]`。
pub fn resolve(path: &str) -> TreePath {
    TreePath(
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

impl TreePath {
    /// Returns the path addressing the forest root.
    /// 取得指向樹根的空路徑。
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends `name` (itself resolved, so `"a/b"` appends two segments).
    /// 附加子路徑；傳入值同樣會經過切割。
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.extend(resolve(name).0);
        Self(segments)
    }

    /// Returns the containing path, or `None` for the root.
    /// 取得上一層路徑；根路徑回傳 `None`。
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Final segment, i.e. the name of the addressed node.
    pub fn file_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Whether `ancestor` is this path or one of its ancestors.
    pub fn starts_with(&self, ancestor: &TreePath) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    /// Moves this path from under `from` to under `to`; `None` when `from` is not an ancestor.
    /// 將位於 `from` 之下的路徑改寫到 `to` 之下。
    pub fn replace_prefix(&self, from: &TreePath, to: &TreePath) -> Option<Self> {
        let rest = self.0.strip_prefix(from.0.as_slice())?;
        let mut segments = to.0.clone();
        segments.extend_from_slice(rest);
        Some(Self(segments))
    }

    /// First `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join("/"))
    }
}

impl From<&str> for TreePath {
    fn from(path: &str) -> Self {
        resolve(path)
    }
}

impl From<&String> for TreePath {
    fn from(path: &String) -> Self {
        resolve(path)
    }
}
