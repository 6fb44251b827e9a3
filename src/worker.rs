use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::domain::{HistoryRecord, UploadedFile};
use crate::store::Storage;

#[derive(Debug)]
pub enum StoreRequest {
    LoadHistory,
    StoreFile {
        source: PathBuf,
    },
    DeleteRecord {
        id: String,
    },
    ClearHistory,
    ExportRecord {
        record: HistoryRecord,
        dest_dir: PathBuf,
    },
}

#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<StoreRequest>,
}

impl StoreHandle {
    pub fn send(&self, request: StoreRequest) {
        let _ = self.tx.send(request);
    }
}

/// Runs store operations one at a time, off the render loop, and reports each
/// outcome back as an [`Action`].
pub struct StoreWorker {
    storage: Arc<Storage>,
    rx: mpsc::UnboundedReceiver<StoreRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl StoreWorker {
    pub fn new(
        storage: Arc<Storage>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, StoreHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = StoreHandle { tx };
        let worker = Self {
            storage,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let action = self.process(request).await;
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }

    async fn process(&self, request: StoreRequest) -> Action {
        let storage = Arc::clone(&self.storage);
        match tokio::task::spawn_blocking(move || handle_request(&storage, request)).await {
            Ok(action) => action,
            Err(e) => Action::Error(format!("store task failed: {}", e)),
        }
    }
}

/// Execute one request against `storage`.
pub fn handle_request(storage: &Storage, request: StoreRequest) -> Action {
    match request {
        StoreRequest::LoadHistory => {
            if let Err(e) = storage.ensure_storage() {
                return Action::Error(format!("failed to prepare storage: {}", e));
            }
            Action::HistoryLoaded(storage.list_documents())
        }
        StoreRequest::StoreFile { source } => {
            let content = match std::fs::read(&source) {
                Ok(content) => content,
                Err(e) => {
                    return Action::Error(format!("failed to read {}: {}", source.display(), e))
                }
            };
            let file = UploadedFile::new(source.to_string_lossy(), content);
            match storage.store_uploaded_file(&file) {
                Ok(record) => Action::FileStored(Box::new(record)),
                Err(e) => Action::Error(format!("upload failed: {}", e)),
            }
        }
        StoreRequest::DeleteRecord { id } => match storage.delete_record(&id) {
            Ok(removed) => Action::RecordDeleted { id, removed },
            Err(e) => Action::Error(format!("failed to delete {}: {}", id, e)),
        },
        StoreRequest::ClearHistory => match storage.clear_history() {
            Ok(removed) => Action::HistoryCleared { removed },
            Err(e) => Action::Error(format!("failed to clear history: {}", e)),
        },
        StoreRequest::ExportRecord { record, dest_dir } => {
            match storage.export_record(&record, &dest_dir) {
                Ok(path) => Action::RecordExported {
                    name: record.original_name,
                    path,
                },
                Err(e) => Action::Error(format!("download failed: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn store_file_reads_source_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("data"));
        let source = dir.path().join("a.txt");
        fs::write(&source, b"0123456789").unwrap();

        let action = handle_request(&storage, StoreRequest::StoreFile { source });

        let record = match action {
            Action::FileStored(record) => record,
            other => panic!("expected FileStored, got {:?}", other),
        };
        assert_eq!(record.original_name, "a.txt");
        assert_eq!(record.size_bytes, Some(10));
    }

    #[test]
    fn unreadable_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("data"));

        let action = handle_request(
            &storage,
            StoreRequest::StoreFile {
                source: dir.path().join("nope.txt"),
            },
        );

        assert!(matches!(action, Action::Error(ref msg) if msg.starts_with("failed to read")));
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn delete_reports_whether_removed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let record = storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"a".to_vec()))
            .unwrap();

        let action = handle_request(&storage, StoreRequest::DeleteRecord { id: record.id.clone() });
        assert!(matches!(action, Action::RecordDeleted { removed: true, .. }));

        let action = handle_request(&storage, StoreRequest::DeleteRecord { id: record.id });
        assert!(matches!(action, Action::RecordDeleted { removed: false, .. }));
    }

    #[test]
    fn clear_history_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        for name in ["a.txt", "b.txt"] {
            storage
                .store_uploaded_file(&UploadedFile::new(name, b"x".to_vec()))
                .unwrap();
        }

        let action = handle_request(&storage, StoreRequest::ClearHistory);
        assert!(matches!(action, Action::HistoryCleared { removed: 2 }));
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn export_of_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let record = storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"a".to_vec()))
            .unwrap();
        fs::remove_file(&record.path).unwrap();

        let action = handle_request(
            &storage,
            StoreRequest::ExportRecord {
                record,
                dest_dir: dir.path().join("out"),
            },
        );
        assert!(matches!(action, Action::Error(_)));
    }

    #[tokio::test]
    async fn worker_answers_in_request_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("b.md");
        fs::write(&source, b"# b").unwrap();

        let storage = Arc::new(Storage::new(dir.path().join("data")));
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = StoreWorker::new(storage, action_tx);
        tokio::spawn(worker.run());

        handle.send(StoreRequest::StoreFile { source });
        handle.send(StoreRequest::LoadHistory);

        let record = match action_rx.recv().await.unwrap() {
            Action::FileStored(record) => record,
            other => panic!("expected FileStored, got {:?}", other),
        };
        let documents = match action_rx.recv().await.unwrap() {
            Action::HistoryLoaded(documents) => documents,
            other => panic!("expected HistoryLoaded, got {:?}", other),
        };
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].record, *record);
        assert!(documents[0].on_disk);
    }
}
