//! Message panel for command output and errors
//!
//! Shows the newest messages first with their age, errors in red.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::editor::messages::{Level, Message, MessageLog};

pub fn render(frame: &mut Frame, area: Rect, log: &MessageLog) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if log.is_empty() {
        return;
    }

    let now = Instant::now();
    let lines: Vec<Line> = log
        .recent_first()
        .take(inner.height as usize)
        .map(|message| format_message(message, now))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn format_message(message: &Message, now: Instant) -> Line<'static> {
    let text_style = match message.level {
        Level::Info => Style::default().fg(Color::White),
        Level::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };

    Line::from(vec![
        Span::styled(
            format_elapsed(now.duration_since(message.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(message.text.clone(), text_style),
    ])
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:>3}s", secs)
    } else if secs < 3600 {
        format!("{:>2}m", secs / 60)
    } else {
        format!("{:>2}h", secs / 3600)
    }
}
