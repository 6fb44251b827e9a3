pub mod confirm_modal;
pub mod footer;
pub mod help_overlay;
pub mod history_page;
pub mod tab_bar;
pub mod toast;
pub mod upload_page;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
