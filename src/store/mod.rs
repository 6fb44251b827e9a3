//! Local document storage: uploaded blobs under `uploads/` and a flat JSON
//! history next to them.
//!
//! Every operation is a blocking `std::fs` call and assumes it is the only
//! writer of the data directory while it runs.

mod erase;
mod error;
mod history;
mod persist;
mod size;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::{StoreError, StoreResult};
pub use persist::base_name;
pub use size::format_size;
pub use summary::{sorted_newest_first, HistorySummary};

pub const UPLOADS_DIR: &str = "uploads";
pub const HISTORY_FILE: &str = "history.json";

/// Handle on one data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    uploads_dir: PathBuf,
    history_file: PathBuf,
}

impl Storage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            uploads_dir: data_dir.join(UPLOADS_DIR),
            history_file: data_dir.join(HISTORY_FILE),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn history_file(&self) -> &Path {
        &self.history_file
    }

    /// Create the uploads directory and an empty history file when absent.
    /// Existing content is never touched, so this is safe to call before
    /// every operation.
    pub fn ensure_storage(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.uploads_dir).map_err(|e| {
            StoreError::io(
                format!("failed to create {}", self.uploads_dir.display()),
                e,
            )
        })?;

        if !self.history_file.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                StoreError::io(format!("failed to create {}", self.data_dir.display()), e)
            })?;
            fs::write(&self.history_file, "[]").map_err(|e| {
                StoreError::io(
                    format!("failed to initialize {}", self.history_file.display()),
                    e,
                )
            })?;
            debug!(path = %self.history_file.display(), "created empty history");
        }

        Ok(())
    }
}
