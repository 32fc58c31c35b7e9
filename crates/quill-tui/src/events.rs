//! UI event types.
//!
//! Events flow into the reducer from two sources: the terminal (key input)
//! and the runtime inbox (async task lifecycle and completions). Every
//! completion event carries the [`TaskId`] of the spawn that produced it so
//! the reducer can drop stale results from unmounted views.

use quill_core::models::Post;
use quill_core::session::Session;

use crate::common::{TaskId, TaskKind, TaskStarted};

/// What a submitted credentials form was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    Login,
    Register,
}

/// What a submitted post form was trying to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostIntent {
    Create,
    Update { id: String },
}

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer tick (spinner animation, redraw cadence).
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// A spawned task reported its id and cancellation token.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// `GET /blog/getAll` finished.
    FeedLoaded {
        task: TaskId,
        result: Result<Vec<Post>, String>,
    },

    /// `GET /blog/find/:id` finished.
    PostLoaded {
        task: TaskId,
        result: Result<Post, String>,
    },

    /// `PUT /blog/likeBlog/:id` finished; `Ok` carries the updated post.
    LikeCompleted {
        task: TaskId,
        result: Result<Post, String>,
    },

    /// `DELETE /blog/deleteBlog/:id` finished.
    DeleteCompleted {
        task: TaskId,
        result: Result<(), String>,
    },

    /// Login or register finished; `Ok` carries the established session.
    AuthCompleted {
        task: TaskId,
        intent: AuthIntent,
        result: Result<Session, String>,
    },

    /// Create or update finished; `Ok` carries the saved post.
    PostSaved {
        task: TaskId,
        result: Result<Post, String>,
    },
}
