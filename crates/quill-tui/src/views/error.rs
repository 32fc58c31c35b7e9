//! Error view: terminal state after a failed detail fetch.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    /// Diagnostic detail; also in the log.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCommand {
    None,
    /// Back to the feed.
    Home,
    Quit,
}

pub fn handle_key(key: KeyEvent) -> ErrorCommand {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => ErrorCommand::Home,
        KeyCode::Char('q') => ErrorCommand::Quit,
        _ => ErrorCommand::None,
    }
}

/// Renders the error view into `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ErrorState) {
    let block = Block::default().borders(Borders::ALL).title(" Error ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong loading that post.",
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(
            state.message.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "enter home  q quit",
            Style::default().fg(Color::Cyan),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
