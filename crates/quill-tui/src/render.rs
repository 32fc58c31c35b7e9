//! Top-level render dispatch.

use ratatui::Frame;

use crate::state::{AppState, ViewState};
use crate::views::{auth, editor, error, home, post_detail};

/// Renders the mounted view.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match &app.view {
        ViewState::Home(state) => home::render(frame, area, state, app.session.as_ref()),
        ViewState::Auth(state) => {
            auth::render(frame, area, state, app.tasks.submit_auth.is_running());
        }
        ViewState::Editor(state) => {
            editor::render(frame, area, state, app.tasks.submit_post.is_running());
        }
        ViewState::PostDetail(state) => {
            if let Some(session) = app.session.as_ref() {
                post_detail::render(frame, area, state, session, &app.config.images_url());
            }
        }
        ViewState::Error(state) => error::render(frame, area, state),
    }
}
