use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;

use crate::action::Action;
use crate::domain::*;
use crate::store::{format_size, HistorySummary};

const MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Upload,
    History,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Upload, Page::History];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::History => "History",
        }
    }

    pub fn next(&self) -> Page {
        match self {
            Self::Upload => Self::History,
            Self::History => Self::Upload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Confirm(ConfirmAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteRecord { id: String, name: String },
    ClearHistory { count: usize },
}

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Side effects requested by [`App::update`]; `main` forwards them to the
/// store worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadHistory,
    StoreFile(PathBuf),
    DeleteRecord(String),
    ClearHistory,
    ExportRecord(HistoryRecord),
    Quit,
}

pub struct App {
    // View state
    pub page: Page,
    pub input_mode: InputMode,
    pub overlay: Overlay,

    // History page
    pub documents: LoadState<Vec<StoredDocument>>,
    pub summary: HistorySummary,
    pub history_table_state: TableState,

    // Upload page
    pub input_buffer: String,
    pub uploading: bool,
    pub last_upload: Option<HistoryRecord>,

    // Locations shown to the user
    pub uploads_dir: PathBuf,
    pub download_dir: PathBuf,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
    pub status: Option<(String, Instant)>,
}

impl App {
    pub fn new(uploads_dir: PathBuf, download_dir: PathBuf) -> Self {
        Self {
            page: Page::Upload,
            input_mode: InputMode::Normal,
            overlay: Overlay::None,

            documents: LoadState::NotLoaded,
            summary: HistorySummary::default(),
            history_table_state: TableState::default(),

            input_buffer: String::new(),
            uploading: false,
            last_upload: None,

            uploads_dir,
            download_dir,

            should_quit: false,
            last_error: None,
            status: None,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        self.expire_messages();

        match action {
            // Navigation
            Action::NavigateUp => {
                self.move_selection(|idx, _| idx.saturating_sub(1));
                vec![]
            }
            Action::NavigateDown => {
                self.move_selection(|idx, len| (idx + 1).min(len - 1));
                vec![]
            }
            Action::NavigateTop => {
                self.move_selection(|_, _| 0);
                vec![]
            }
            Action::NavigateBottom => {
                self.move_selection(|_, len| len - 1);
                vec![]
            }

            // Page switching
            Action::SwitchPage(page) => {
                self.page = page;
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                match page {
                    Page::Upload => vec![],
                    Page::History => {
                        if self.documents.data().is_none() {
                            self.documents = LoadState::Loading;
                        }
                        vec![Effect::LoadHistory]
                    }
                }
            }
            Action::NextPage => self.update(Action::SwitchPage(self.page.next())),

            // Upload input
            Action::StartEditing => {
                if self.page == Page::Upload && !self.uploading {
                    self.input_mode = InputMode::EditingPath;
                    self.input_buffer.clear();
                }
                vec![]
            }
            Action::UpdateInputBuffer(buf) => {
                self.input_buffer = buf;
                vec![]
            }
            Action::SubmitPath(raw) => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                // Terminals quote dropped paths
                let path = raw.trim().trim_matches(|c: char| c == '\'' || c == '"');
                if path.is_empty() {
                    self.set_error("select a file to upload");
                    return vec![];
                }
                self.uploading = true;
                vec![Effect::StoreFile(PathBuf::from(path))]
            }
            Action::CancelInput => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                vec![]
            }

            // Document actions
            Action::SaveSelected => {
                if self.page != Page::History {
                    return vec![];
                }
                match self.selected_document() {
                    Some(doc) if doc.on_disk => vec![Effect::ExportRecord(doc.record.clone())],
                    Some(doc) => {
                        let msg = format!("'{}' is missing on disk", doc.record.original_name);
                        self.set_error(msg);
                        vec![]
                    }
                    None => vec![],
                }
            }
            Action::SaveLastUpload => match (&self.page, &self.last_upload) {
                (Page::Upload, Some(record)) => vec![Effect::ExportRecord(record.clone())],
                _ => vec![],
            },
            Action::RequestDelete => {
                if self.page != Page::History {
                    return vec![];
                }
                if let Some(doc) = self.selected_document() {
                    self.overlay = Overlay::Confirm(ConfirmAction::DeleteRecord {
                        id: doc.record.id.clone(),
                        name: doc.record.original_name.clone(),
                    });
                }
                vec![]
            }
            Action::Confirm => {
                let overlay = std::mem::replace(&mut self.overlay, Overlay::None);
                match overlay {
                    Overlay::Confirm(ConfirmAction::DeleteRecord { id, .. }) => {
                        vec![Effect::DeleteRecord(id)]
                    }
                    Overlay::Confirm(ConfirmAction::ClearHistory { .. }) => {
                        vec![Effect::ClearHistory]
                    }
                    other => {
                        self.overlay = other;
                        vec![]
                    }
                }
            }
            Action::RequestClearHistory => {
                if self.page != Page::History {
                    return vec![];
                }
                match self.documents.data() {
                    Some(docs) if !docs.is_empty() => {
                        self.overlay =
                            Overlay::Confirm(ConfirmAction::ClearHistory { count: docs.len() });
                    }
                    _ => self.set_error("history is already empty"),
                }
                vec![]
            }

            // UI
            Action::CloseOverlay => {
                self.overlay = Overlay::None;
                vec![]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Store responses
            Action::HistoryLoaded(documents) => {
                self.summary = HistorySummary::from_records(documents.iter().map(|d| &d.record));
                if documents.is_empty() {
                    self.history_table_state.select(None);
                } else {
                    let idx = self
                        .history_table_state
                        .selected()
                        .unwrap_or(0)
                        .min(documents.len() - 1);
                    self.history_table_state.select(Some(idx));
                }
                self.documents = LoadState::Loaded(documents);
                vec![]
            }
            Action::FileStored(record) => {
                self.uploading = false;
                self.set_status(format!(
                    "Uploaded '{}' ({})",
                    record.original_name,
                    format_size(record.size_bytes)
                ));
                self.last_upload = Some(*record);
                vec![Effect::LoadHistory]
            }
            Action::RecordDeleted { id, removed } => {
                if removed {
                    let name = self
                        .find_document(&id)
                        .map(|d| d.record.original_name.clone())
                        .unwrap_or_else(|| id.clone());
                    self.set_status(format!("Deleted '{}'", name));
                    if self.last_upload.as_ref().is_some_and(|r| r.id == id) {
                        self.last_upload = None;
                    }
                } else {
                    self.set_error(format!("document {} no longer exists", id));
                }
                vec![Effect::LoadHistory]
            }
            Action::HistoryCleared { removed } => {
                self.set_status(format!("Cleared {} document(s) from history", removed));
                self.last_upload = None;
                self.history_table_state.select(None);
                vec![Effect::LoadHistory]
            }
            Action::RecordExported { name, path } => {
                self.set_status(format!("Saved '{}' to {}", name, path.display()));
                vec![]
            }

            // App control
            Action::Refresh => vec![Effect::LoadHistory],
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => vec![],
            Action::Error(msg) => {
                self.uploading = false;
                self.set_error(msg);
                vec![]
            }
            Action::ClearError => {
                self.last_error = None;
                vec![]
            }
        }
    }

    pub fn selected_document(&self) -> Option<&StoredDocument> {
        let idx = self.history_table_state.selected()?;
        self.documents.data()?.get(idx)
    }

    fn find_document(&self, id: &str) -> Option<&StoredDocument> {
        self.documents.data()?.iter().find(|d| d.record.id == id)
    }

    fn move_selection(&mut self, step: impl Fn(usize, usize) -> usize) {
        if self.page != Page::History {
            return;
        }
        let len = self.documents.data().map(|d| d.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        let current = self.history_table_state.selected().unwrap_or(0).min(len - 1);
        self.history_table_state.select(Some(step(current, len)));
    }

    fn set_error(&mut self, msg: impl Into<String>) {
        self.last_error = Some((msg.into(), Instant::now()));
    }

    fn set_status(&mut self, msg: String) {
        self.status = Some((msg, Instant::now()));
    }

    fn expire_messages(&mut self) {
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > MESSAGE_TTL {
                self.last_error = None;
            }
        }
        if let Some((_, at)) = &self.status {
            if at.elapsed() > MESSAGE_TTL {
                self.status = None;
            }
        }
    }
}
