//! Key handling for the post-detail view.
//!
//! Returns a [`DetailCommand`] for the reducer to translate into effects;
//! the in-flight guards (one like toggle, one delete) live in the reducer
//! where the task state is.

use crossterm::event::{KeyCode, KeyEvent};
use quill_core::session::Session;

use super::state::{Controls, DetailPhase, PostDetailState, controls};

/// What the pressed key asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailCommand {
    None,
    /// Return to the feed.
    Back,
    /// Toggle the viewer's like (reader control).
    Like,
    /// Delete the post (author control).
    Delete,
    /// Open the edit form (author control).
    Edit,
    /// Open the post photo in the system browser.
    OpenPhoto,
    Quit,
}

pub fn handle_key(state: &PostDetailState, session: &Session, key: KeyEvent) -> DetailCommand {
    match key.code {
        KeyCode::Char('q') => return DetailCommand::Quit,
        KeyCode::Esc | KeyCode::Backspace => return DetailCommand::Back,
        _ => {}
    }

    // Action keys only exist once the post is loaded.
    let DetailPhase::Loaded { post, .. } = &state.phase else {
        return DetailCommand::None;
    };

    match (key.code, controls(post, session)) {
        (KeyCode::Char('l'), Controls::Reader) => DetailCommand::Like,
        (KeyCode::Char('d'), Controls::Author) => DetailCommand::Delete,
        (KeyCode::Char('e'), Controls::Author) => DetailCommand::Edit,
        (KeyCode::Char('o'), _) => DetailCommand::OpenPhoto,
        _ => DetailCommand::None,
    }
}
