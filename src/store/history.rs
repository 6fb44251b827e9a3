use std::fs;
use std::io::ErrorKind;

use serde_json::Value;
use tracing::{debug, warn};

use super::{Storage, StoreError, StoreResult};
use crate::domain::HistoryRecord;

impl Storage {
    /// Read every record from the history file.
    ///
    /// An absent or unreadable file, or one that is not a JSON array, yields
    /// an empty history. Entries are decoded one by one: missing keys take
    /// their defaults and an entry that still cannot be decoded is skipped
    /// with a warning.
    pub fn load_history(&self) -> Vec<HistoryRecord> {
        self.load_entries()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<HistoryRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "skipping undecodable history entry");
                    None
                }
            })
            .collect()
    }

    /// Rewrite the whole history file with `records`, in order.
    pub fn save_history(&self, records: &[HistoryRecord]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.write_history(json, records.len())
    }

    pub fn find_record(&self, id: &str) -> Option<HistoryRecord> {
        self.load_history().into_iter().find(|r| r.id == id)
    }

    /// The history as raw JSON entries. Read-modify-write paths go through
    /// these so entries the record type cannot decode are written back as
    /// they were.
    pub(super) fn load_entries(&self) -> Vec<Value> {
        let content = match fs::read_to_string(&self.history_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.history_file.display(), "no history file yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.history_file.display(), error = %e, "failed to read history");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(path = %self.history_file.display(), "history is not a JSON array");
                Vec::new()
            }
            Err(e) => {
                warn!(path = %self.history_file.display(), error = %e, "history is not valid JSON");
                Vec::new()
            }
        }
    }

    pub(super) fn save_entries(&self, entries: &[Value]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        self.write_history(json, entries.len())
    }

    fn write_history(&self, json: String, count: usize) -> StoreResult<()> {
        fs::write(&self.history_file, json).map_err(|e| {
            StoreError::io(
                format!("failed to write {}", self.history_file.display()),
                e,
            )
        })?;
        debug!(records = count, "saved history");
        Ok(())
    }
}

/// The `id` of a raw history entry, if it has a string one.
pub(super) fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}
