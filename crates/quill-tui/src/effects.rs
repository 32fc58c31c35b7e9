//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer mutates state and
//! never performs I/O itself.

use quill_core::models::{Credentials, PostDraft};
use quill_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskId, TaskKind};
use crate::events::{AuthIntent, PostIntent};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the home feed.
    FetchFeed { task: Option<TaskId> },

    /// Fetch one post for the detail view. Cancelled on unmount.
    FetchPost { task: Option<TaskId>, id: String },

    /// Toggle the signed-in user's like on a post.
    ToggleLike { task: Option<TaskId>, id: String },

    /// Delete a post.
    DeletePost { task: Option<TaskId>, id: String },

    /// Exchange credentials for a session (login or register).
    SubmitAuth {
        task: Option<TaskId>,
        intent: AuthIntent,
        credentials: Credentials,
    },

    /// Create or update a post.
    SubmitPost {
        task: Option<TaskId>,
        intent: PostIntent,
        draft: PostDraft,
    },

    /// Write the session to disk (`Some`) or remove it (`None`).
    PersistSession { session: Option<Session> },

    /// Open a URL in the system browser (post photo).
    OpenBrowser { url: String },

    /// Cancel an in-progress task (view unmount, user Esc).
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}
