use std::fs;
use std::io::ErrorKind;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::history::entry_id;
use super::{Storage, StoreResult};

impl Storage {
    /// Remove the record `id` from the history and best-effort delete its
    /// backing file.
    ///
    /// Returns `Ok(false)` when no record has that id. File removal never
    /// fails the call: an already-missing file counts as removed and any
    /// other error is logged, so the history entry always goes away. Only a
    /// failure to rewrite the history is returned.
    pub fn delete_record(&self, id: &str) -> StoreResult<bool> {
        let mut entries = self.load_entries();
        let Some(index) = entries.iter().position(|e| entry_id(e) == Some(id)) else {
            debug!(id, "no record to delete");
            return Ok(false);
        };

        let entry = entries.remove(index);
        remove_backing_file(&entry);
        self.save_entries(&entries)?;

        let name = entry.get("original_name").and_then(Value::as_str).unwrap_or("-");
        info!(id, name, "deleted record");
        Ok(true)
    }

    /// Empty the history and best-effort delete every recorded file, with the
    /// same file policy as [`Storage::delete_record`]. Returns how many
    /// entries were dropped.
    pub fn clear_history(&self) -> StoreResult<usize> {
        self.ensure_storage()?;
        let entries = self.load_entries();
        for entry in &entries {
            remove_backing_file(entry);
        }
        self.save_entries(&[])?;

        info!(records = entries.len(), "cleared history");
        Ok(entries.len())
    }
}

fn remove_backing_file(entry: &Value) {
    let Some(path) = entry.get("path").and_then(Value::as_str) else {
        return;
    };
    if path.is_empty() {
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => debug!(path, "removed stored file"),
        Err(e) if e.kind() == ErrorKind::NotFound => debug!(path, "stored file already gone"),
        Err(e) => warn!(path, error = %e, "failed to remove stored file, dropping record anyway"),
    }
}
