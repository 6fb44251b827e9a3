use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::{InputMode, Overlay, Page};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

/// Forwards terminal key presses and a periodic tick over a channel.
pub struct RawEventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl RawEventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state
pub fn key_to_action(
    key: KeyEvent,
    page: &Page,
    input_mode: &InputMode,
    overlay: &Overlay,
    input_buffer: &str,
) -> Option<Action> {
    // Overlays swallow every other key
    match overlay {
        Overlay::Help => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Some(Action::ToggleHelp)
                }
                _ => None,
            };
        }
        Overlay::Confirm(_) => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Char('n') | KeyCode::Esc => Some(Action::CloseOverlay),
                _ => None,
            };
        }
        Overlay::None => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    if *input_mode == InputMode::EditingPath {
        return match key.code {
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Enter => Some(Action::SubmitPath(input_buffer.to_string())),
            KeyCode::Backspace => {
                let mut buf = input_buffer.to_string();
                buf.pop();
                Some(Action::UpdateInputBuffer(buf))
            }
            KeyCode::Char(c) => {
                let mut buf = input_buffer.to_string();
                buf.push(c);
                Some(Action::UpdateInputBuffer(buf))
            }
            _ => None,
        };
    }

    match key.code {
        // Global
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('1') => Some(Action::SwitchPage(Page::Upload)),
        KeyCode::Char('2') => Some(Action::SwitchPage(Page::History)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::NextPage),

        // Upload page
        KeyCode::Char('i') | KeyCode::Enter if *page == Page::Upload => Some(Action::StartEditing),
        KeyCode::Char('s') if *page == Page::Upload => Some(Action::SaveLastUpload),
        KeyCode::Char('h') if *page == Page::Upload => Some(Action::SwitchPage(Page::History)),

        // History page
        KeyCode::Char('j') | KeyCode::Down if *page == Page::History => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up if *page == Page::History => Some(Action::NavigateUp),
        KeyCode::Char('g') | KeyCode::Home if *page == Page::History => Some(Action::NavigateTop),
        KeyCode::Char('G') | KeyCode::End if *page == Page::History => {
            Some(Action::NavigateBottom)
        }
        KeyCode::Char('s') | KeyCode::Enter if *page == Page::History => Some(Action::SaveSelected),
        KeyCode::Char('d') | KeyCode::Delete if *page == Page::History => {
            Some(Action::RequestDelete)
        }
        KeyCode::Char('u') if *page == Page::History => Some(Action::SwitchPage(Page::Upload)),
        KeyCode::Char('X') if *page == Page::History => Some(Action::RequestClearHistory),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ConfirmAction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn normal(code: KeyCode, page: Page) -> Option<Action> {
        key_to_action(press(code), &page, &InputMode::Normal, &Overlay::None, "")
    }

    #[test]
    fn page_keys() {
        assert!(matches!(
            normal(KeyCode::Char('2'), Page::Upload),
            Some(Action::SwitchPage(Page::History))
        ));
        assert!(matches!(
            normal(KeyCode::Char('h'), Page::Upload),
            Some(Action::SwitchPage(Page::History))
        ));
        assert!(matches!(
            normal(KeyCode::Char('u'), Page::History),
            Some(Action::SwitchPage(Page::Upload))
        ));
        assert!(matches!(
            normal(KeyCode::Tab, Page::History),
            Some(Action::NextPage)
        ));
    }

    #[test]
    fn enter_depends_on_page() {
        assert!(matches!(
            normal(KeyCode::Enter, Page::Upload),
            Some(Action::StartEditing)
        ));
        assert!(matches!(
            normal(KeyCode::Enter, Page::History),
            Some(Action::SaveSelected)
        ));
        assert!(normal(KeyCode::Char('d'), Page::Upload).is_none());
        assert!(matches!(
            normal(KeyCode::Char('d'), Page::History),
            Some(Action::RequestDelete)
        ));
    }

    #[test]
    fn editing_captures_text() {
        let editing = |code| {
            key_to_action(
                press(code),
                &Page::Upload,
                &InputMode::EditingPath,
                &Overlay::None,
                "a.tx",
            )
        };

        assert!(matches!(
            editing(KeyCode::Char('t')),
            Some(Action::UpdateInputBuffer(ref b)) if b == "a.txt"
        ));
        // 'q' is text while editing, not quit
        assert!(matches!(
            editing(KeyCode::Char('q')),
            Some(Action::UpdateInputBuffer(ref b)) if b == "a.txq"
        ));
        assert!(matches!(
            editing(KeyCode::Backspace),
            Some(Action::UpdateInputBuffer(ref b)) if b == "a.t"
        ));
        assert!(matches!(
            editing(KeyCode::Enter),
            Some(Action::SubmitPath(ref p)) if p == "a.tx"
        ));
        assert!(matches!(editing(KeyCode::Esc), Some(Action::CancelInput)));
    }

    #[test]
    fn confirm_overlay_keys() {
        let overlay = Overlay::Confirm(ConfirmAction::DeleteRecord {
            id: "a".to_string(),
            name: "a.txt".to_string(),
        });
        let confirm =
            |code| key_to_action(press(code), &Page::History, &InputMode::Normal, &overlay, "");

        assert!(matches!(confirm(KeyCode::Char('y')), Some(Action::Confirm)));
        assert!(matches!(confirm(KeyCode::Enter), Some(Action::Confirm)));
        assert!(matches!(confirm(KeyCode::Char('n')), Some(Action::CloseOverlay)));
        assert!(matches!(confirm(KeyCode::Esc), Some(Action::CloseOverlay)));
        assert!(confirm(KeyCode::Char('q')).is_none());
    }

    #[test]
    fn clear_history_key_is_history_only() {
        assert!(matches!(
            normal(KeyCode::Char('X'), Page::History),
            Some(Action::RequestClearHistory)
        ));
        assert!(normal(KeyCode::Char('X'), Page::Upload).is_none());
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            key_to_action(key, &Page::Upload, &InputMode::EditingPath, &Overlay::None, ""),
            Some(Action::Quit)
        ));
    }
}
