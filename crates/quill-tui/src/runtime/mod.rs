//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async handlers send their completion `UiEvent`s to a single inbox
//! channel; the runtime drains it each frame. Each spawn first reports
//! `TaskStarted` (carrying the cancellation token) so the reducer can track
//! and cancel in-flight work.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use quill_core::api::ApiClient;
use quill_core::config::Config;
use quill_core::session::Session;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::routes::Route;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while tasks are in flight (~30fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Shared backend client; handlers clone it per spawn.
    client: ApiClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(config: Config, session: Option<Session>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let client = ApiClient::new(&config);
        let state = AppState::new(config, session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        // Mount the initial route through the guard.
        let effects = update::navigate(&mut self.state, Route::Home);
        self.execute_effects(effects);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Only Tick triggers render - this caps frame rate at tick
                // cadence; other events batch their redraws to the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);
                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the terminal and the inbox.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Poll fast while async work is outstanding, slowly when idle.
        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Block on terminal input until the next tick is due, unless there
        // are already events waiting to be processed.
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task, reporting `TaskStarted` with its cancellation
    /// token before the handler runs.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = Some(CancellationToken::new());
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let _ = tx.send(f(cancel).await);
        });
    }

    fn bearer(&self) -> Option<String> {
        self.state.session.as_ref().map(|s| s.token.clone())
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                let _ = open::that(&url);
            }
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::PersistSession { session } => {
                let result = match &session {
                    Some(session) => session.save(),
                    None => Session::clear().map(|_| ()),
                };
                if let Err(e) = result {
                    error!("failed to persist session: {e:#}");
                }
            }

            UiEffect::FetchFeed { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::FetchFeed, task, move |cancel| {
                    handlers::fetch_feed(client, task, cancel)
                });
            }
            UiEffect::FetchPost { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                let token = self.bearer();
                self.spawn_task(TaskKind::FetchPost, task, move |cancel| {
                    handlers::fetch_post(client, token, id, task, cancel)
                });
            }
            UiEffect::ToggleLike { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                let token = self.bearer();
                self.spawn_task(TaskKind::ToggleLike, task, move |cancel| {
                    handlers::toggle_like(client, token, id, task, cancel)
                });
            }
            UiEffect::DeletePost { task, id } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                let token = self.bearer();
                self.spawn_task(TaskKind::DeletePost, task, move |cancel| {
                    handlers::delete_post(client, token, id, task, cancel)
                });
            }
            UiEffect::SubmitAuth {
                task,
                intent,
                credentials,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::SubmitAuth, task, move |cancel| {
                    handlers::submit_auth(client, intent, credentials, task, cancel)
                });
            }
            UiEffect::SubmitPost {
                task,
                intent,
                draft,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                let token = self.bearer();
                self.spawn_task(TaskKind::SubmitPost, task, move |cancel| {
                    handlers::submit_post(client, token, intent, draft, task, cancel)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
