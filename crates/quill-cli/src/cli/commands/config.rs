//! `quill config` subcommands.

use anyhow::Result;
use quill_core::config::{Config, paths};

/// Prints the config file path.
pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

/// Prints the effective configuration (after env overrides).
pub fn show(config: &Config) -> Result<()> {
    println!("backend_url = {}", config.backend_url);
    Ok(())
}
