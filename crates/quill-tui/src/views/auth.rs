//! Login and register forms.
//!
//! One state machine serves both routes; the intent decides which auth
//! endpoint the submission hits.

use crossterm::event::{KeyCode, KeyEvent};
use quill_core::models::Credentials;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::form::{TextField, field_line};
use crate::events::AuthIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormState {
    pub intent: AuthIntent,
    pub username: TextField,
    pub password: TextField,
    pub focus: AuthFocus,
    /// Inline error from the last failed submission.
    pub error: Option<String>,
}

impl AuthFormState {
    pub fn new(intent: AuthIntent) -> Self {
        Self {
            intent,
            username: TextField::default(),
            password: TextField::default(),
            focus: AuthFocus::Username,
            error: None,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            AuthFocus::Username => &mut self.username,
            AuthFocus::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthFocus::Username => AuthFocus::Password,
            AuthFocus::Password => AuthFocus::Username,
        };
    }
}

/// What the pressed key asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    None,
    /// Submit the form (both fields non-empty).
    Submit(Credentials),
    /// Leave the form without submitting.
    Cancel,
}

pub fn handle_key(state: &mut AuthFormState, key: KeyEvent) -> AuthCommand {
    match key.code {
        KeyCode::Esc => AuthCommand::Cancel,
        KeyCode::Tab | KeyCode::BackTab => {
            state.toggle_focus();
            AuthCommand::None
        }
        KeyCode::Enter => {
            if state.username.is_empty() || state.password.is_empty() {
                state.error = Some("Both fields are required.".to_string());
                AuthCommand::None
            } else {
                AuthCommand::Submit(state.credentials())
            }
        }
        _ => {
            state.focused_field().handle_key(key);
            AuthCommand::None
        }
    }
}

/// Renders the form into `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &AuthFormState, submitting: bool) {
    let title = match state.intent {
        AuthIntent::Login => " Sign in ",
        AuthIntent::Register => " Create account ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        field_line("Username", state.username.value(), state.focus == AuthFocus::Username),
        field_line(
            "Password",
            &"*".repeat(state.password.value().chars().count()),
            state.focus == AuthFocus::Password,
        ),
        Line::from(""),
    ];

    if submitting {
        lines.push(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "tab switch field  enter submit  esc back",
        Style::default().fg(Color::Cyan),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
