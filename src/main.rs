use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use docdepot::action::Action;
use docdepot::app::{App, Effect, Overlay, Page};
use docdepot::config::{Cli, ConfigFile, Settings};
use docdepot::event::{key_to_action, AppEvent, RawEventHandler};
use docdepot::store::Storage;
use docdepot::widgets;
use docdepot::worker::{StoreHandle, StoreRequest, StoreWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    let settings = Settings::resolve(&cli, ConfigFile::load());

    // The UI owns stdout, so logs only go to a file when asked for
    let _log_guard = match cli.log_file.as_deref() {
        Some(log_file) => Some(init_logging(Path::new(log_file))?),
        None => None,
    };

    let storage = Storage::new(&settings.data_dir);
    storage.ensure_storage()?;
    tracing::info!(data_dir = %settings.data_dir.display(), "storage ready");

    match cli.command.take() {
        Some(command) => docdepot::commands::run(command, &storage, &settings),
        None => run_tui(storage, settings).await,
    }
}

fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(guard)
}

async fn run_tui(storage: Storage, settings: Settings) -> Result<()> {
    let mut app = App::new(storage.uploads_dir().to_path_buf(), settings.download_dir);

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create worker
    let (worker, store_handle) = StoreWorker::new(Arc::new(storage), action_tx);
    tokio::spawn(worker.run());

    // Initial data load, so the tab bar knows the document count
    store_handle.send(StoreRequest::LoadHistory);

    let mut terminal = docdepot::tui::init()?;
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    // Main loop
    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => key_to_action(
                        key,
                        &app.page,
                        &app.input_mode,
                        &app.overlay,
                        &app.input_buffer,
                    ),
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, &store_handle, &app);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &store_handle, &app);
            }
        }

        if app.should_quit {
            break;
        }
    }

    docdepot::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(docdepot::theme::BG_DARK)),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Page
        Constraint::Length(1), // Footer
    ])
    .split(area);

    widgets::tab_bar::render(app, frame, layout[0]);

    match app.page {
        Page::Upload => widgets::upload_page::render(app, frame, layout[1]),
        Page::History => widgets::history_page::render(app, frame, layout[1]),
    }

    widgets::footer::render(app, frame, layout[2]);

    match &app.overlay {
        Overlay::Help => widgets::help_overlay::render(app.page, frame, area),
        Overlay::Confirm(action) => widgets::confirm_modal::render(action, frame, area),
        Overlay::None => {}
    }

    widgets::toast::render(app, frame, area);
}

fn handle_effects(effects: Vec<Effect>, store_handle: &StoreHandle, app: &App) {
    for effect in effects {
        match effect {
            Effect::LoadHistory => store_handle.send(StoreRequest::LoadHistory),
            Effect::StoreFile(source) => store_handle.send(StoreRequest::StoreFile { source }),
            Effect::DeleteRecord(id) => store_handle.send(StoreRequest::DeleteRecord { id }),
            Effect::ClearHistory => store_handle.send(StoreRequest::ClearHistory),
            Effect::ExportRecord(record) => store_handle.send(StoreRequest::ExportRecord {
                record,
                dest_dir: app.download_dir.clone(),
            }),
            Effect::Quit => {}
        }
    }
}
