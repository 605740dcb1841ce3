use serde::{Deserialize, Serialize};

/// Marker for records whose content is not plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Standard-alphabet, padded base64 of the file's raw bytes.
    Base64,
}

/// A single encoded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the project root, always `/`-separated.
    pub path: String,
    /// UTF-8 text, or base64 when [`encoding`](Self::encoding) is set.
    pub content: String,
    /// Absent for text records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,
}

impl FileRecord {
    pub fn is_binary(&self) -> bool {
        self.encoding.is_some()
    }
}

/// The JSON document sent to the compilation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Records in traversal order.
    pub files: Vec<FileRecord>,
}

/// A file that could not be encoded and was left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// The result of encoding a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedProject {
    pub payload: Payload,
    /// Files skipped under [`ReadErrorPolicy::Skip`](crate::ReadErrorPolicy::Skip).
    pub skipped: Vec<SkippedFile>,
}
