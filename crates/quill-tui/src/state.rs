//! Application state composition.
//!
//! `AppState` holds the current route, the typed session (the explicit
//! replacement for the original's process-wide store), the mounted view's
//! state, and the async task lifecycle table. All mutation happens in the
//! reducer ([`crate::update`]).

use quill_core::config::Config;
use quill_core::session::Session;

use crate::common::{TaskSeq, Tasks};
use crate::routes::Route;
use crate::views::auth::AuthFormState;
use crate::views::editor::EditorState;
use crate::views::error::ErrorState;
use crate::views::home::HomeState;
use crate::views::post_detail::PostDetailState;

/// State for the currently mounted view.
///
/// Exactly one view is mounted at a time; navigating replaces this wholesale,
/// which is what makes "unmount" a real event the reducer can act on
/// (cancelling the view's outstanding tasks).
#[derive(Debug)]
pub enum ViewState {
    Home(HomeState),
    Auth(AuthFormState),
    Editor(EditorState),
    PostDetail(PostDetailState),
    Error(ErrorState),
}

/// Top-level application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub config: Config,
    /// The authenticated session, if any. Views requiring authentication are
    /// only reachable through the guard, and read it as `&Session`.
    pub session: Option<Session>,
    /// The resolved current route (post-guard).
    pub route: Route,
    pub view: ViewState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
}

impl AppState {
    /// Creates the initial state. The caller mounts the first route via
    /// [`crate::update::navigate`] so mount effects aren't lost.
    pub fn new(config: Config, session: Option<Session>) -> Self {
        Self {
            should_quit: false,
            config,
            session,
            route: Route::Home,
            view: ViewState::Home(HomeState::new()),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
        }
    }
}
