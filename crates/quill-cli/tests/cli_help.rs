//! Basic CLI surface tests.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

/// Test: --help lists the subcommands.
#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("quill")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal client for a blog platform"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("config"));
}

/// Test: unknown subcommands are rejected.
#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("quill")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}

/// Test: launching the TUI without a terminal fails with a pointer to the
/// scripting commands.
#[test]
fn test_tui_requires_terminal() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("quill")
        .unwrap()
        .env("QUILL_HOME", temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a terminal"));
}
