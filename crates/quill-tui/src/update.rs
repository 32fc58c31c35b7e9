//! The reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Navigation also lives here: it resolves
//! the guard, cancels the outgoing view's tasks, swaps the view state, and
//! returns the incoming view's mount effects.

use crossterm::event::{Event, KeyEvent, KeyEventKind, KeyModifiers};
use quill_core::models::Post;
use quill_core::session::Session;
use tracing::{error, warn};

use crate::common::{TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::{AuthIntent, PostIntent, UiEvent};
use crate::routes::{self, Route};
use crate::state::{AppState, ViewState};
use crate::views::auth::{self, AuthCommand, AuthFormState};
use crate::views::editor::{self, EditorCommand, EditorPhase, EditorState};
use crate::views::error::{self, ErrorCommand, ErrorState};
use crate::views::home::{self, HomeCommand, HomeState};
use crate::views::post_detail::{self, DetailCommand, PostDetailState};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::FeedLoaded { task, result } => {
            if !app.tasks.fetch_feed.finish_if_active(task) {
                return vec![];
            }
            if let ViewState::Home(state) = &mut app.view {
                match result {
                    Ok(posts) => state.on_loaded(posts),
                    Err(e) => {
                        warn!("feed fetch failed: {e}");
                        state.on_failed(e);
                    }
                }
            }
            vec![]
        }
        UiEvent::PostLoaded { task, result } => handle_post_loaded(app, task, result),
        UiEvent::LikeCompleted { task, result } => {
            if !app.tasks.toggle_like.finish_if_active(task) {
                return vec![];
            }
            let Some(session) = app.session.clone() else {
                return vec![];
            };
            if let ViewState::PostDetail(state) = &mut app.view {
                match result {
                    // Liked flag follows the server's authoritative state.
                    Ok(updated) => state.reconcile_like(updated, &session),
                    // Flag left unchanged; no user-visible divergence.
                    Err(e) => warn!("like toggle failed: {e}"),
                }
            }
            vec![]
        }
        UiEvent::DeleteCompleted { task, result } => {
            if !app.tasks.delete_post.finish_if_active(task) {
                return vec![];
            }
            if let Err(e) = result {
                error!("delete failed: {e}");
            }
            // Home either way; a failed delete is only logged.
            if matches!(app.view, ViewState::PostDetail(_)) {
                navigate(app, Route::Home)
            } else {
                vec![]
            }
        }
        UiEvent::AuthCompleted { task, result, .. } => {
            if !app.tasks.submit_auth.finish_if_active(task) {
                return vec![];
            }
            let ViewState::Auth(state) = &mut app.view else {
                return vec![];
            };
            match result {
                Ok(session) => {
                    app.session = Some(session.clone());
                    let mut effects = vec![UiEffect::PersistSession {
                        session: Some(session),
                    }];
                    effects.extend(navigate(app, Route::Home));
                    effects
                }
                Err(e) => {
                    state.error = Some(e);
                    vec![]
                }
            }
        }
        UiEvent::PostSaved { task, result } => {
            if !app.tasks.submit_post.finish_if_active(task) {
                return vec![];
            }
            let ViewState::Editor(state) = &mut app.view else {
                return vec![];
            };
            match result {
                Ok(post) => navigate(app, Route::PostDetail(post.id)),
                Err(e) => {
                    state.error = Some(e);
                    vec![]
                }
            }
        }
    }
}

/// Navigates to `requested`, running it through the guard first.
///
/// Cancels the outgoing view's tasks (their late completions are dropped by
/// the task-id guard), swaps the view state, and returns mount effects.
pub fn navigate(app: &mut AppState, requested: Route) -> Vec<UiEffect> {
    let mut effects = cancel_view_tasks(app);
    let route = routes::resolve(requested, app.session.as_ref());

    let mount_effects = match &route {
        Route::Home => {
            app.view = ViewState::Home(HomeState::new());
            vec![spawn_fetch_feed(app)]
        }
        Route::Login => {
            app.view = ViewState::Auth(AuthFormState::new(AuthIntent::Login));
            vec![]
        }
        Route::Register => {
            app.view = ViewState::Auth(AuthFormState::new(AuthIntent::Register));
            vec![]
        }
        Route::Create => {
            app.view = ViewState::Editor(EditorState::create());
            vec![]
        }
        Route::PostDetail(id) => {
            app.view = ViewState::PostDetail(PostDetailState::new(id.clone()));
            vec![spawn_fetch_post(app, id.clone())]
        }
        Route::UpdatePost(id) => {
            app.view = ViewState::Editor(EditorState::update(id.clone()));
            vec![spawn_fetch_post(app, id.clone())]
        }
        Route::Error => {
            app.view = ViewState::Error(ErrorState {
                message: String::new(),
            });
            vec![]
        }
    };

    app.route = route;
    effects.extend(mount_effects);
    effects
}

/// Cancels every task owned by the outgoing view and clears its state so
/// stale completions are dropped.
fn cancel_view_tasks(app: &mut AppState) -> Vec<UiEffect> {
    let kinds = [
        TaskKind::FetchFeed,
        TaskKind::FetchPost,
        TaskKind::ToggleLike,
        TaskKind::DeletePost,
        TaskKind::SubmitAuth,
        TaskKind::SubmitPost,
    ];
    let mut effects = Vec::new();
    for kind in kinds {
        let state = app.tasks.state_mut(kind);
        if state.is_running() {
            effects.push(UiEffect::CancelTask {
                kind,
                token: state.cancel.clone(),
            });
            state.clear();
        }
    }
    effects
}

fn spawn_fetch_feed(app: &mut AppState) -> UiEffect {
    UiEffect::FetchFeed {
        task: Some(app.task_seq.next_id()),
    }
}

fn spawn_fetch_post(app: &mut AppState, id: String) -> UiEffect {
    UiEffect::FetchPost {
        task: Some(app.task_seq.next_id()),
        id,
    }
}

fn handle_post_loaded(
    app: &mut AppState,
    task: TaskId,
    result: Result<Post, String>,
) -> Vec<UiEffect> {
    if !app.tasks.fetch_post.finish_if_active(task) {
        return vec![];
    }

    match &mut app.view {
        ViewState::PostDetail(state) => {
            let Some(session) = app.session.clone() else {
                return navigate(app, Route::Login);
            };
            match result {
                Ok(post) => {
                    state.on_loaded(post, &session);
                    vec![]
                }
                Err(e) => {
                    error!("post fetch failed: {e}");
                    navigate_to_error(app, e)
                }
            }
        }
        ViewState::Editor(state) if state.phase == EditorPhase::Prefilling => match result {
            Ok(post) => {
                state.on_prefilled(&post);
                vec![]
            }
            Err(e) => {
                error!("post fetch failed: {e}");
                navigate_to_error(app, e)
            }
        },
        _ => vec![],
    }
}

fn navigate_to_error(app: &mut AppState, message: String) -> Vec<UiEffect> {
    let effects = navigate(app, Route::Error);
    if let ViewState::Error(state) = &mut app.view {
        state.message = message;
    }
    effects
}

// ============================================================================
// Terminal input
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    // Ctrl+C quits from anywhere, including forms.
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == crossterm::event::KeyCode::Char('c')
    {
        return vec![UiEffect::Quit];
    }

    match &mut app.view {
        ViewState::Home(_) => handle_home_key(app, key),
        ViewState::PostDetail(_) => handle_detail_key(app, key),
        ViewState::Auth(_) => handle_auth_key(app, key),
        ViewState::Editor(_) => handle_editor_key(app, key),
        ViewState::Error(_) => match error::handle_key(key) {
            ErrorCommand::Home => navigate(app, Route::Home),
            ErrorCommand::Quit => vec![UiEffect::Quit],
            ErrorCommand::None => vec![],
        },
    }
}

fn handle_home_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let session = app.session.clone();
    let ViewState::Home(state) = &mut app.view else {
        return vec![];
    };
    match home::handle_key(state, session.as_ref(), key) {
        HomeCommand::None => vec![],
        HomeCommand::Quit => vec![UiEffect::Quit],
        HomeCommand::Open(id) => navigate(app, Route::PostDetail(id)),
        HomeCommand::New => navigate(app, Route::Create),
        HomeCommand::SignIn => navigate(app, Route::Login),
        HomeCommand::Register => navigate(app, Route::Register),
        HomeCommand::SignOut => {
            app.session = None;
            vec![UiEffect::PersistSession { session: None }]
        }
        HomeCommand::Refresh => {
            if app.tasks.fetch_feed.is_running() {
                return vec![];
            }
            *state = HomeState::new();
            vec![spawn_fetch_feed(app)]
        }
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(session) = app.session.clone() else {
        // Unreachable through the guard; redirect instead of dereferencing.
        return navigate(app, Route::Login);
    };
    let ViewState::PostDetail(state) = &mut app.view else {
        return vec![];
    };
    match post_detail::handle_key(state, &session, key) {
        DetailCommand::None => vec![],
        DetailCommand::Quit => vec![UiEffect::Quit],
        DetailCommand::Back => navigate(app, Route::Home),
        DetailCommand::Edit => {
            let id = state.post_id.clone();
            navigate(app, Route::UpdatePost(id))
        }
        DetailCommand::OpenPhoto => state.post().map_or_else(Vec::new, |post| {
            vec![UiEffect::OpenBrowser {
                url: format!("{}/{}", app.config.images_url(), post.photo),
            }]
        }),
        DetailCommand::Like => {
            // One toggle call in flight per mount; further presses no-op
            // until the server answers.
            if app.tasks.toggle_like.is_running() {
                return vec![];
            }
            let id = state.post_id.clone();
            vec![UiEffect::ToggleLike {
                task: Some(app.task_seq.next_id()),
                id,
            }]
        }
        DetailCommand::Delete => {
            if app.tasks.delete_post.is_running() {
                return vec![];
            }
            let id = state.post_id.clone();
            vec![UiEffect::DeletePost {
                task: Some(app.task_seq.next_id()),
                id,
            }]
        }
    }
}

fn handle_auth_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ViewState::Auth(state) = &mut app.view else {
        return vec![];
    };
    match auth::handle_key(state, key) {
        AuthCommand::None => vec![],
        AuthCommand::Cancel => navigate(app, Route::Home),
        AuthCommand::Submit(credentials) => {
            if app.tasks.submit_auth.is_running() {
                return vec![];
            }
            let intent = state.intent;
            vec![UiEffect::SubmitAuth {
                task: Some(app.task_seq.next_id()),
                intent,
                credentials,
            }]
        }
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ViewState::Editor(state) = &mut app.view else {
        return vec![];
    };
    match editor::handle_key(state, key) {
        EditorCommand::None => vec![],
        EditorCommand::Cancel => match state.intent.clone() {
            PostIntent::Update { id } => navigate(app, Route::PostDetail(id)),
            PostIntent::Create => navigate(app, Route::Home),
        },
        EditorCommand::Submit(draft) => {
            if app.tasks.submit_post.is_running() {
                return vec![];
            }
            let intent = state.intent.clone();
            vec![UiEffect::SubmitPost {
                task: Some(app.task_seq.next_id()),
                intent,
                draft,
            }]
        }
    }
}
