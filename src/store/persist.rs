use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};
use uuid::Uuid;

use super::{Storage, StoreError, StoreResult};
use crate::domain::{HistoryRecord, UploadedFile};

const FALLBACK_NAME: &str = "unnamed";
const TOKEN_LEN: usize = 8;

/// Last path component of a client-supplied name, accepting both `/` and `\`
/// as separators. Names with no usable component become `unnamed`.
pub fn base_name(name: &str) -> &str {
    match name.rsplit(|c: char| c == '/' || c == '\\').next() {
        Some("") | Some(".") | Some("..") | None => FALLBACK_NAME,
        Some(base) => base,
    }
}

fn new_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

impl Storage {
    /// Write an uploaded file under a collision-free name and append its
    /// record to the history.
    ///
    /// The bytes are written before the history is touched: a failed write
    /// leaves no record behind.
    pub fn store_uploaded_file(&self, file: &UploadedFile) -> StoreResult<HistoryRecord> {
        self.ensure_storage()?;

        let original_name = base_name(&file.name).to_string();
        let size_bytes = file.content.len() as u64;
        let mime = mime_guess::from_path(&original_name)
            .first_or_octet_stream()
            .to_string();

        let id = new_token();
        let now = Local::now();
        let stored_name = format!("{}_{}_{}", now.format("%Y%m%d-%H%M%S"), id, original_name);
        let stored_path = self.uploads_dir.join(&stored_name);

        fs::write(&stored_path, &file.content).map_err(|e| {
            StoreError::io(format!("failed to write {}", stored_path.display()), e)
        })?;
        debug!(path = %stored_path.display(), bytes = size_bytes, "wrote upload");

        let record = HistoryRecord {
            id,
            original_name,
            stored_name,
            path: stored_path.to_string_lossy().into_owned(),
            size_bytes: Some(size_bytes),
            mime,
            uploaded_at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        };

        let mut entries = self.load_entries();
        entries.push(serde_json::to_value(&record)?);
        self.save_entries(&entries)?;

        info!(id = %record.id, name = %record.original_name, bytes = size_bytes, "stored upload");
        Ok(record)
    }

    /// The stored bytes of `record`, unchanged.
    pub fn read_content(&self, record: &HistoryRecord) -> StoreResult<Vec<u8>> {
        fs::read(&record.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::MissingFile(record.path.clone())
            } else {
                StoreError::io(format!("failed to read {}", record.path), e)
            }
        })
    }

    /// Copy a stored document into `dest_dir` under its original name and
    /// return the written path. An existing file of that name is replaced.
    pub fn export_record(&self, record: &HistoryRecord, dest_dir: &Path) -> StoreResult<PathBuf> {
        let content = self.read_content(record)?;

        fs::create_dir_all(dest_dir)
            .map_err(|e| StoreError::io(format!("failed to create {}", dest_dir.display()), e))?;

        let target = dest_dir.join(base_name(&record.original_name));
        fs::write(&target, &content)
            .map_err(|e| StoreError::io(format!("failed to write {}", target.display()), e))?;

        info!(id = %record.id, path = %target.display(), "exported document");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("a.txt"), "a.txt");
        assert_eq!(base_name("/etc/passwd"), "passwd");
        assert_eq!(base_name("../../secret.txt"), "secret.txt");
        assert_eq!(base_name("C:\\Users\\me\\report.docx"), "report.docx");
        assert_eq!(base_name("dir/"), "unnamed");
        assert_eq!(base_name(""), "unnamed");
        assert_eq!(base_name("up/.."), "unnamed");
    }

    #[test]
    fn stores_bytes_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let record = storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"0123456789".to_vec()))
            .unwrap();

        assert_eq!(record.original_name, "a.txt");
        assert_eq!(record.size_bytes, Some(10));
        assert_eq!(record.mime, "text/plain");
        assert_eq!(record.id.len(), 8);
        assert!(record.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fs::read(&record.path).unwrap(), b"0123456789");
        assert_eq!(storage.load_history(), vec![record]);
    }

    #[test]
    fn stored_name_layout() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let record = storage
            .store_uploaded_file(&UploadedFile::new("scans/facture 01.pdf", vec![1, 2, 3]))
            .unwrap();

        let mut parts = record.stored_name.splitn(3, '_');
        let stamp = parts.next().unwrap();
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "-");
        assert_eq!(parts.next(), Some(record.id.as_str()));
        assert_eq!(parts.next(), Some("facture 01.pdf"));

        assert_eq!(
            Path::new(&record.path),
            storage.uploads_dir().join(&record.stored_name)
        );
        assert_eq!(record.uploaded_at.len(), 19);
        assert_eq!(&record.uploaded_at[10..11], "T");
        assert_eq!(record.mime, "application/pdf");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let record = storage
            .store_uploaded_file(&UploadedFile::new("blob.zzqx", vec![0u8; 4]))
            .unwrap();
        assert_eq!(record.mime, "application/octet-stream");

        let record = storage
            .store_uploaded_file(&UploadedFile::new("Makefile", vec![]))
            .unwrap();
        assert_eq!(record.mime, "application/octet-stream");
        assert_eq!(record.size_bytes, Some(0));
    }

    #[test]
    fn same_name_uploads_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());

        let records: Vec<HistoryRecord> = (0..5u8)
            .map(|i| {
                storage
                    .store_uploaded_file(&UploadedFile::new("same.txt", vec![i]))
                    .unwrap()
            })
            .collect();

        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        let names: HashSet<_> = records.iter().map(|r| r.stored_name.clone()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(names.len(), 5);
        assert_eq!(fs::read_dir(storage.uploads_dir()).unwrap().count(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(fs::read(&record.path).unwrap(), vec![i as u8]);
        }
    }

    #[test]
    fn upload_keeps_entries_it_cannot_fully_read() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let first = storage
            .store_uploaded_file(&UploadedFile::new("keep.pdf", b"%PDF".to_vec()))
            .unwrap();

        let mut entries = storage.load_entries();
        entries.push(serde_json::json!({"id": "deadbeef", "original_name": "old.txt"}));
        entries.push(serde_json::json!("not a record"));
        storage.save_entries(&entries).unwrap();

        let second = storage
            .store_uploaded_file(&UploadedFile::new("next.txt", b"next".to_vec()))
            .unwrap();

        let ids: Vec<String> = storage.load_history().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, [first.id, "deadbeef".to_string(), second.id]);
        assert_eq!(storage.load_entries()[2], serde_json::json!("not a record"));
    }

    #[test]
    fn failed_write_leaves_history_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.ensure_storage().unwrap();
        // A plain file where the uploads directory belongs.
        fs::remove_dir_all(storage.uploads_dir()).unwrap();
        fs::write(storage.uploads_dir(), b"not a directory").unwrap();

        let err = storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"data".to_vec()))
            .unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn read_content_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let record = storage
            .store_uploaded_file(&UploadedFile::new("gone.txt", b"bye".to_vec()))
            .unwrap();
        fs::remove_file(&record.path).unwrap();

        let err = storage.read_content(&record).unwrap_err();
        assert!(matches!(err, StoreError::MissingFile(path) if path == record.path));
    }

    #[test]
    fn export_writes_original_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("data"));
        let record = storage
            .store_uploaded_file(&UploadedFile::new("notes/plan.md", b"# plan".to_vec()))
            .unwrap();

        let dest = dir.path().join("downloads");
        let written = storage.export_record(&record, &dest).unwrap();

        assert_eq!(written, dest.join("plan.md"));
        assert_eq!(fs::read(&written).unwrap(), b"# plan");
    }
}
