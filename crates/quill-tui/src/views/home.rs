//! Home view: the post feed.
//!
//! Same lifecycle shape as the detail view (fetch on mount, cancellation on
//! unmount), but a failed feed fetch stays on this view with an inline
//! message instead of navigating away.

use crossterm::event::{KeyCode, KeyEvent};
use quill_core::models::Post;
use quill_core::session::Session;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::common::format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    Loading,
    Loaded { posts: Vec<Post>, selected: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeState {
    pub phase: FeedPhase,
}

impl HomeState {
    pub fn new() -> Self {
        Self {
            phase: FeedPhase::Loading,
        }
    }

    pub fn on_loaded(&mut self, posts: Vec<Post>) {
        self.phase = FeedPhase::Loaded { posts, selected: 0 };
    }

    pub fn on_failed(&mut self, error: String) {
        self.phase = FeedPhase::Failed { error };
    }

    pub fn selected_post(&self) -> Option<&Post> {
        match &self.phase {
            FeedPhase::Loaded { posts, selected } => posts.get(*selected),
            _ => None,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if let FeedPhase::Loaded { posts, selected } = &mut self.phase {
            if posts.is_empty() {
                return;
            }
            let last = posts.len() - 1;
            *selected = selected
                .saturating_add_signed(delta)
                .min(last);
        }
    }
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the pressed key asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeCommand {
    None,
    /// Open the selected post's detail view.
    Open(String),
    /// Open the new-post form.
    New,
    /// Open the sign-in form.
    SignIn,
    /// Open the registration form.
    Register,
    /// Clear the session (state and disk).
    SignOut,
    /// Re-fetch the feed.
    Refresh,
    Quit,
}

pub fn handle_key(state: &mut HomeState, session: Option<&Session>, key: KeyEvent) -> HomeCommand {
    match key.code {
        KeyCode::Char('q') => HomeCommand::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            state.move_selection(1);
            HomeCommand::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.move_selection(-1);
            HomeCommand::None
        }
        KeyCode::Enter => state
            .selected_post()
            .map_or(HomeCommand::None, |post| HomeCommand::Open(post.id.clone())),
        KeyCode::Char('n') => HomeCommand::New,
        KeyCode::Char('r') => HomeCommand::Refresh,
        KeyCode::Char('i') if session.is_none() => HomeCommand::SignIn,
        KeyCode::Char('a') if session.is_none() => HomeCommand::Register,
        KeyCode::Char('x') if session.is_some() => HomeCommand::SignOut,
        _ => HomeCommand::None,
    }
}

/// Renders the feed into `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &HomeState, session: Option<&Session>) {
    let block = Block::default().borders(Borders::ALL).title(" Quill ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &state.phase {
        FeedPhase::Loading => {
            let para = Paragraph::new(Line::from(Span::styled(
                "Loading feed...",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(para, inner);
        }
        FeedPhase::Failed { error } => {
            let lines = vec![
                Line::from(Span::styled(
                    "Could not load the feed.",
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "r retry  q quit",
                    Style::default().fg(Color::Cyan),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }
        FeedPhase::Loaded { posts, selected } => {
            let items: Vec<ListItem> = posts
                .iter()
                .map(|post| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            post.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!(
                                "  {} · {} likes · {}",
                                post.user_id.username,
                                post.likes.len(),
                                format::relative(post.created_at),
                            ),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");
            let mut list_state = ListState::default();
            list_state.select((!posts.is_empty()).then_some(*selected));

            let [list_area, hint_area] = split_for_hints(inner);
            frame.render_stateful_widget(list, list_area, &mut list_state);

            let hints = if session.is_some() {
                "enter open  n new  r refresh  x sign out  q quit"
            } else {
                "enter open  i sign in  a register  r refresh  q quit"
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    hints,
                    Style::default().fg(Color::Cyan),
                ))),
                hint_area,
            );
        }
    }
}

fn split_for_hints(area: Rect) -> [Rect; 2] {
    let hint_height = 1;
    let list = Rect {
        height: area.height.saturating_sub(hint_height),
        ..area
    };
    let hints = Rect {
        y: area.y + list.height,
        height: area.height - list.height,
        ..area
    };
    [list, hints]
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "_id": format!("p{i}"),
                    "title": format!("Post {i}"),
                    "desc": "",
                    "photo": "x.jpg",
                    "userId": { "_id": "u1", "username": "ada" },
                    "likes": [],
                    "createdAt": "2024-03-01T12:00:00Z",
                }))
                .unwrap()
            })
            .collect()
    }

    fn press(state: &mut HomeState, session: Option<&Session>, code: KeyCode) -> HomeCommand {
        handle_key(state, session, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_selection_clamps_to_bounds() {
        let mut state = HomeState::new();
        state.on_loaded(posts(2));

        press(&mut state, None, KeyCode::Char('k'));
        assert_eq!(state.selected_post().unwrap().id, "p0");

        press(&mut state, None, KeyCode::Char('j'));
        press(&mut state, None, KeyCode::Char('j'));
        press(&mut state, None, KeyCode::Char('j'));
        assert_eq!(state.selected_post().unwrap().id, "p1");
    }

    #[test]
    fn test_enter_opens_selected_post() {
        let mut state = HomeState::new();
        state.on_loaded(posts(2));
        press(&mut state, None, KeyCode::Char('j'));
        assert_eq!(
            press(&mut state, None, KeyCode::Enter),
            HomeCommand::Open("p1".to_string())
        );
    }

    #[test]
    fn test_enter_on_empty_feed_is_noop() {
        let mut state = HomeState::new();
        state.on_loaded(Vec::new());
        assert_eq!(press(&mut state, None, KeyCode::Enter), HomeCommand::None);
    }

    #[test]
    fn test_session_gated_keys() {
        let mut state = HomeState::new();
        state.on_loaded(posts(1));

        assert_eq!(press(&mut state, None, KeyCode::Char('i')), HomeCommand::SignIn);
        assert_eq!(press(&mut state, None, KeyCode::Char('x')), HomeCommand::None);

        let session = Session {
            user: quill_core::models::User {
                id: "u1".to_string(),
                username: "ada".to_string(),
                email: None,
            },
            token: "jwt-abc".to_string(),
        };
        assert_eq!(
            press(&mut state, Some(&session), KeyCode::Char('i')),
            HomeCommand::None
        );
        assert_eq!(
            press(&mut state, Some(&session), KeyCode::Char('x')),
            HomeCommand::SignOut
        );
    }
}
