//! Create and update post forms.
//!
//! Creating starts from an empty draft; updating first fetches the post to
//! pre-fill the fields (same fetch lifecycle as the detail view, including
//! cancellation on unmount).

use crossterm::event::{KeyCode, KeyEvent};
use quill_core::models::{Post, PostDraft};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::form::{TextField, field_line};
use crate::events::PostIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Title,
    Desc,
    Photo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    /// Update mode only: waiting for the post to pre-fill from.
    Prefilling,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub intent: PostIntent,
    pub phase: EditorPhase,
    pub title: TextField,
    pub desc: TextField,
    pub photo: TextField,
    pub focus: EditorFocus,
    pub error: Option<String>,
}

impl EditorState {
    /// A blank editor for the create route.
    pub fn create() -> Self {
        Self {
            intent: PostIntent::Create,
            phase: EditorPhase::Editing,
            title: TextField::default(),
            desc: TextField::default(),
            photo: TextField::default(),
            focus: EditorFocus::Title,
            error: None,
        }
    }

    /// An editor for the update route, pending pre-fill.
    pub fn update(id: String) -> Self {
        Self {
            intent: PostIntent::Update { id },
            phase: EditorPhase::Prefilling,
            title: TextField::default(),
            desc: TextField::default(),
            photo: TextField::default(),
            focus: EditorFocus::Title,
            error: None,
        }
    }

    /// Pre-fills the fields from the fetched post.
    pub fn on_prefilled(&mut self, post: &Post) {
        self.title = TextField::with_value(post.title.clone());
        self.desc = TextField::with_value(post.desc.clone());
        self.photo = TextField::with_value(post.photo.clone());
        self.phase = EditorPhase::Editing;
    }

    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.value().to_string(),
            desc: self.desc.value().to_string(),
            photo: self.photo.value().to_string(),
        }
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            EditorFocus::Title => &mut self.title,
            EditorFocus::Desc => &mut self.desc,
            EditorFocus::Photo => &mut self.photo,
        }
    }

    fn next_focus(&mut self) {
        self.focus = match self.focus {
            EditorFocus::Title => EditorFocus::Desc,
            EditorFocus::Desc => EditorFocus::Photo,
            EditorFocus::Photo => EditorFocus::Title,
        };
    }
}

/// What the pressed key asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    None,
    /// Submit the draft (title and description non-empty).
    Submit(PostDraft),
    /// Leave without submitting.
    Cancel,
}

pub fn handle_key(state: &mut EditorState, key: KeyEvent) -> EditorCommand {
    if key.code == KeyCode::Esc {
        return EditorCommand::Cancel;
    }
    if state.phase == EditorPhase::Prefilling {
        return EditorCommand::None;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.next_focus();
            EditorCommand::None
        }
        KeyCode::Enter => {
            if state.title.is_empty() || state.desc.is_empty() {
                state.error = Some("Title and description are required.".to_string());
                EditorCommand::None
            } else {
                EditorCommand::Submit(state.draft())
            }
        }
        _ => {
            state.focused_field().handle_key(key);
            EditorCommand::None
        }
    }
}

/// Renders the editor into `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &EditorState, submitting: bool) {
    let title = match state.intent {
        PostIntent::Create => " New post ",
        PostIntent::Update { .. } => " Edit post ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.phase == EditorPhase::Prefilling {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ))),
            inner,
        );
        return;
    }

    let mut lines = vec![
        field_line("Title", state.title.value(), state.focus == EditorFocus::Title),
        field_line("Description", state.desc.value(), state.focus == EditorFocus::Desc),
        field_line("Photo", state.photo.value(), state.focus == EditorFocus::Photo),
        Line::from(""),
    ];

    if submitting {
        lines.push(Line::from(Span::styled(
            "Saving...",
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
        "tab next field  enter save  esc back",
        Style::default().fg(Color::Cyan),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
