//! `quill login` / `quill logout`.
//!
//! Login reads credentials from stdin (one per line) so it works both
//! interactively and in scripts/tests.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use quill_core::api::ApiClient;
use quill_core::config::Config;
use quill_core::models::Credentials;
use quill_core::session::Session;

pub async fn login(config: &Config) -> Result<()> {
    let credentials = read_credentials().context("Failed to read credentials")?;

    let client = ApiClient::new(config);
    let response = client
        .login(&credentials)
        .await
        .context("Login request failed")?;

    let session = Session::from(response);
    session.save()?;

    println!("Signed in as {}", session.user.username);
    Ok(())
}

pub fn logout() -> Result<()> {
    if Session::clear()? {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }
    Ok(())
}

fn read_credentials() -> Result<Credentials> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("Username: ");
    io::stdout().flush()?;
    let username = lines
        .next()
        .context("No username provided")??
        .trim()
        .to_string();

    print!("Password: ");
    io::stdout().flush()?;
    let password = lines
        .next()
        .context("No password provided")??
        .trim()
        .to_string();

    anyhow::ensure!(!username.is_empty(), "Username must not be empty");
    anyhow::ensure!(!password.is_empty(), "Password must not be empty");

    Ok(Credentials { username, password })
}
