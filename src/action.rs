use std::path::PathBuf;

use crate::app::Page;
use crate::domain::*;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,

    // Page switching
    SwitchPage(Page),
    NextPage,

    // Upload input
    StartEditing,
    UpdateInputBuffer(String),
    SubmitPath(String),
    CancelInput,

    // Document actions
    SaveSelected,
    SaveLastUpload,
    RequestDelete,
    RequestClearHistory,
    Confirm,

    // UI
    CloseOverlay,
    ToggleHelp,

    // Store responses
    HistoryLoaded(Vec<StoredDocument>),
    FileStored(Box<HistoryRecord>),
    RecordDeleted { id: String, removed: bool },
    HistoryCleared { removed: usize },
    RecordExported { name: String, path: PathBuf },

    // App control
    Refresh,
    Quit,
    Tick,
    Error(String),
    ClearError,
}
