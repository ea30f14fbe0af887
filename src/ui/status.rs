//! Status line: command line on the left, recent keystrokes on the right

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::colors::status;
use crate::app::App;
use crate::mode::Mode;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let keys_width = u16::try_from(app.config.keystroke_log_width)
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(keys_width)])
        .split(area);

    render_command_line(frame, chunks[0], app);
    render_keystrokes(frame, chunks[1], app);
}

/// Mode badge, then the command line while in ex mode
fn render_command_line(frame: &mut Frame, area: Rect, app: &App) {
    let mode = app.controller.mode();
    let badge_color = match mode {
        Mode::Normal => status::MODE_NORMAL,
        Mode::Ex => status::MODE_EX,
    };
    let badge = format!(" {} ", mode.as_str());
    let badge_width = badge.chars().count() as u16 + 1;

    let badge_widget = Paragraph::new(Span::styled(
        badge,
        Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(badge_widget, area);

    let line = app.controller.command_line();
    if !line.has_focus() {
        return;
    }

    let input_area = Rect {
        x: area.x + badge_width.min(area.width),
        y: area.y,
        width: area.width.saturating_sub(badge_width),
        height: 1,
    };

    // Get scroll offset for the input
    let input = line.input();
    let text_width = input_area.width.max(1) as usize;
    let scroll = input.visual_scroll(text_width);

    let input_widget = Paragraph::new(input.value()).scroll((0, scroll as u16));
    frame.render_widget(input_widget, input_area);

    let cursor_x = input_area.x + (input.visual_cursor().saturating_sub(scroll)) as u16;
    frame.set_cursor_position((cursor_x, input_area.y));
}

/// Pending count (if any) and the tail of the keystroke log
fn render_keystrokes(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if let Some(count) = app.controller.dispatcher().pending_multiplier() {
        spans.push(Span::styled(
            format!("{} ", count),
            Style::default().fg(status::COUNT),
        ));
    }

    let tail = app
        .controller
        .keystrokes()
        .tail(app.config.keystroke_log_width);
    spans.push(Span::styled(tail, Style::default().fg(status::KEYSTROKES)));

    let paragraph = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(paragraph, area);
}
