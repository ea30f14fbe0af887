//! UI rendering using ratatui

mod canvas;
pub mod colors;
mod messages;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

/// Lines of message history under the canvas (plus its border)
const MESSAGE_PANEL_HEIGHT: u16 = 4;

/// Main render function - draws the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    // Canvas | Messages | Status
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(MESSAGE_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.area());

    canvas::render(frame, layout[0], &app.editor);
    messages::render(frame, layout[1], &app.editor.messages);
    status::render(frame, layout[2], app);
}
