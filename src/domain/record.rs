use serde::{Deserialize, Serialize};

/// One entry of the upload history, persisted as an object of the
/// `history.json` array.
///
/// Absent keys decode to their defaults so that hand-edited or older entries
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    /// Eight lowercase hex chars, also embedded in `stored_name`.
    pub id: String,
    pub original_name: String,
    /// `{YYYYMMDD-HHMMSS}_{id}_{original_name}`
    pub stored_name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub mime: String,
    /// Local time, `YYYY-MM-DDTHH:MM:SS`.
    pub uploaded_at: String,
}

/// A file handed over by the presentation layer: a display name (untrusted,
/// may carry directory components) and the raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A history record paired with whether its backing file is still on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub record: HistoryRecord,
    pub on_disk: bool,
}
