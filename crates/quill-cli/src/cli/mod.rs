//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use quill_core::config::{Config, paths};
use quill_core::session::Session;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "Terminal client for a blog platform")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and persist the session (reads credentials from stdin)
    Login,

    /// Clear the persisted session
    Logout,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
}

/// Parses arguments and dispatches.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to a file; the TUI owns the terminal.
    let _log_guard = init_tracing()?;

    let config = Config::load()?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        match cli.command {
            None => {
                let session = load_session_lenient();
                quill_tui::run_app(config, session).await
            }
            Some(Commands::Login) => commands::auth::login(&config).await,
            Some(Commands::Logout) => commands::auth::logout(),
            Some(Commands::Config { command }) => match command {
                ConfigCommands::Path => commands::config::path(),
                ConfigCommands::Show => commands::config::show(&config),
            },
        }
    })
}

/// Loads the persisted session, treating a corrupt file as signed-out
/// rather than refusing to start.
fn load_session_lenient() -> Option<Session> {
    match Session::load() {
        Ok(session) => session,
        Err(e) => {
            warn!("ignoring unreadable session file: {e:#}");
            None
        }
    }
}

/// Initializes file-based tracing under `${QUILL_HOME}/logs/`.
///
/// The returned guard must stay alive for the process lifetime so buffered
/// log lines are flushed.
fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, "quill.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
