//! Full-screen TUI for the Quill blog client.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod routes;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use quill_core::config::Config;
use quill_core::session::Session;
pub use runtime::TuiRuntime;

/// Runs the interactive blog client.
pub async fn run_app(config: Config, session: Option<Session>) -> Result<()> {
    // The TUI needs a terminal to render into.
    if !stderr().is_terminal() {
        anyhow::bail!("Quill needs a terminal. Use `quill login`/`quill logout` for scripting.");
    }

    let mut runtime = TuiRuntime::new(config, session)?;
    runtime.run()?;

    Ok(())
}
