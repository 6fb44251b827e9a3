//! Non-interactive subcommands over the same store the UI uses.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};
use color_eyre::eyre::{bail, eyre, Result};

use crate::config::Settings;
use crate::domain::{HistoryRecord, UploadedFile};
use crate::store::{format_size, sorted_newest_first, HistorySummary, Storage};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a file and record it in the history
    Upload(UploadArgs),
    /// List uploaded documents, newest first
    List,
    /// Copy a stored document out under its original name
    Download(DownloadArgs),
    /// Remove a document from the history and delete its stored file
    Delete(DeleteArgs),
    /// Empty the history and delete every stored file
    Clear(ClearArgs),
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Override the recorded file name
    #[arg(short, long)]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Record id, as shown by `list`
    pub id: String,

    /// Destination directory (defaults to the configured download directory)
    #[arg(long)]
    pub to: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Record id, as shown by `list`
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(command: Command, storage: &Storage, settings: &Settings) -> Result<()> {
    match command {
        Command::Upload(args) => upload(&args, storage),
        Command::List => {
            list(storage);
            Ok(())
        }
        Command::Download(args) => download(&args, storage, settings),
        Command::Delete(args) => delete(&args, storage),
        Command::Clear(args) => clear(&args, storage, &mut std::io::stdin().lock()),
    }
}

fn upload(args: &UploadArgs, storage: &Storage) -> Result<()> {
    let content = std::fs::read(&args.file)
        .map_err(|e| eyre!("failed to read {}: {}", args.file.display(), e))?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let record = storage.store_uploaded_file(&UploadedFile::new(name, content))?;
    println!(
        "Uploaded '{}' ({}) as {}",
        record.original_name,
        format_size(record.size_bytes),
        record.id
    );
    Ok(())
}

fn list(storage: &Storage) {
    let records = sorted_newest_first(storage.load_history());
    if records.is_empty() {
        println!("No document has been uploaded yet.");
        return;
    }

    let summary = HistorySummary::from_records(&records);
    println!(
        "{} documents, {} used, last upload {}",
        summary.count,
        format_size(Some(summary.total_bytes)),
        summary.last_uploaded_at.as_deref().unwrap_or("-")
    );
    for record in &records {
        println!("{}", format_row(record));
    }
}

fn download(args: &DownloadArgs, storage: &Storage, settings: &Settings) -> Result<()> {
    let Some(record) = storage.find_record(&args.id) else {
        bail!("no document with id {}", args.id);
    };
    let dest = args.to.as_deref().unwrap_or(settings.download_dir.as_path());
    let path = storage.export_record(&record, dest)?;
    println!("Saved '{}' to {}", record.original_name, path.display());
    Ok(())
}

fn delete(args: &DeleteArgs, storage: &Storage) -> Result<()> {
    if !storage.delete_record(&args.id)? {
        bail!("no document with id {}", args.id);
    }
    println!("Deleted {}", args.id);
    Ok(())
}

fn clear(args: &ClearArgs, storage: &Storage, input: &mut impl BufRead) -> Result<()> {
    if !args.yes {
        print!("Clear the document history? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    let removed = storage.clear_history()?;
    println!("Cleared {} document(s)", removed);
    Ok(())
}

pub fn format_row(record: &HistoryRecord) -> String {
    format!(
        "{:<8}  {:<19}  {:>12}  {:<24}  {}",
        record.id,
        record.uploaded_at,
        format_size(record.size_bytes),
        record.mime,
        record.original_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(dir: &std::path::Path) -> Settings {
        Settings {
            data_dir: dir.join("data"),
            download_dir: dir.join("downloads"),
        }
    }

    #[test]
    fn upload_download_delete() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let storage = Storage::new(&settings.data_dir);
        let source = dir.path().join("invoice.pdf");
        std::fs::write(&source, b"%PDF-1.7").unwrap();

        run(
            Command::Upload(UploadArgs {
                file: source,
                name: Some("facture.pdf".to_string()),
            }),
            &storage,
            &settings,
        )
        .unwrap();

        let record = storage.load_history().remove(0);
        assert_eq!(record.original_name, "facture.pdf");
        assert_eq!(record.mime, "application/pdf");

        run(
            Command::Download(DownloadArgs {
                id: record.id.clone(),
                to: None,
            }),
            &storage,
            &settings,
        )
        .unwrap();
        assert_eq!(
            std::fs::read(settings.download_dir.join("facture.pdf")).unwrap(),
            b"%PDF-1.7"
        );

        run(
            Command::Delete(DeleteArgs {
                id: record.id.clone(),
            }),
            &storage,
            &settings,
        )
        .unwrap();
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn unknown_ids_fail() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let storage = Storage::new(&settings.data_dir);
        storage.ensure_storage().unwrap();

        let delete = run(
            Command::Delete(DeleteArgs {
                id: "does-not-exist".to_string(),
            }),
            &storage,
            &settings,
        );
        assert!(delete.is_err());

        let download = run(
            Command::Download(DownloadArgs {
                id: "does-not-exist".to_string(),
                to: None,
            }),
            &storage,
            &settings,
        );
        assert!(download.is_err());
    }

    #[test]
    fn clear_asks_before_removing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("data"));
        storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"a".to_vec()))
            .unwrap();

        clear(&ClearArgs { yes: false }, &storage, &mut &b"n\n"[..]).unwrap();
        assert_eq!(storage.load_history().len(), 1);

        clear(&ClearArgs { yes: false }, &storage, &mut &b"y\n"[..]).unwrap();
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn clear_with_yes_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path());
        let storage = Storage::new(&settings.data_dir);
        let record = storage
            .store_uploaded_file(&UploadedFile::new("a.txt", b"a".to_vec()))
            .unwrap();

        run(Command::Clear(ClearArgs { yes: true }), &storage, &settings).unwrap();
        assert!(storage.load_history().is_empty());
        assert!(!std::path::Path::new(&record.path).exists());
    }

    #[test]
    fn row_layout() {
        let record = HistoryRecord {
            id: "0a1b2c3d".to_string(),
            original_name: "a.txt".to_string(),
            stored_name: "20240101-120000_0a1b2c3d_a.txt".to_string(),
            path: "data/uploads/20240101-120000_0a1b2c3d_a.txt".to_string(),
            size_bytes: Some(10),
            mime: "text/plain".to_string(),
            uploaded_at: "2024-01-01T12:00:00".to_string(),
        };
        let row = format_row(&record);
        assert!(row.starts_with("0a1b2c3d  2024-01-01T12:00:00"));
        assert!(row.contains("10 octets"));
        assert!(row.ends_with("a.txt"));
    }
}
