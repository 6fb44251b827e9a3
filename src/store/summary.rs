use std::path::Path;

use super::Storage;
use crate::domain::{HistoryRecord, StoredDocument};

/// Display order: newest `uploaded_at` first. Ties keep storage order.
pub fn sorted_newest_first(mut records: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    records
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub count: usize,
    pub last_uploaded_at: Option<String>,
    pub total_bytes: u64,
}

impl HistorySummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut acc, r| {
            acc.count += 1;
            acc.total_bytes = acc.total_bytes.saturating_add(r.size_bytes.unwrap_or(0));
            if acc
                .last_uploaded_at
                .as_deref()
                .map_or(true, |last| r.uploaded_at.as_str() > last)
            {
                acc.last_uploaded_at = Some(r.uploaded_at.clone());
            }
            acc
        })
    }
}

impl Storage {
    /// History in display order, each record flagged with whether its backing
    /// file still exists.
    pub fn list_documents(&self) -> Vec<StoredDocument> {
        sorted_newest_first(self.load_history())
            .into_iter()
            .map(|record| StoredDocument {
                on_disk: Path::new(&record.path).is_file(),
                record,
            })
            .collect()
    }
}
