//! Integration tests for login/logout against a mock backend.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_login(home: &std::path::Path, backend: &str, input: &str) -> std::process::Output {
    let mut child = Command::cargo_bin("quill")
        .unwrap()
        .env("QUILL_HOME", home)
        .env("QUILL_BACKEND_URL", backend)
        .arg("login")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    child.wait_with_output().expect("Failed to read output")
}

/// Test: login stores the session file and greets the user.
#[tokio::test(flavor = "multi_thread")]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "ada", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "username": "ada",
            "token": "jwt-test-token-123",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();
    let output = run_login(temp.path(), &server.uri(), "ada\nhunter2\n");
    assert!(output.status.success(), "Command failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Signed in as ada"), "stdout: {stdout}");

    let session_path = temp.path().join("session.json");
    assert!(session_path.exists(), "session.json should exist");
    let contents = fs::read_to_string(&session_path).unwrap();
    assert!(contents.contains("jwt-test-token-123"));
}

/// Test: rejected credentials surface the backend's message and leave no
/// session behind.
#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_leaves_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Wrong credentials" })),
        )
        .mount(&server)
        .await;

    let temp = tempdir().unwrap();
    let output = run_login(temp.path(), &server.uri(), "ada\nwrong\n");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrong credentials"), "stderr: {stderr}");
    assert!(!temp.path().join("session.json").exists());
}

/// Test: logout removes the session file.
#[test]
fn test_logout_clears_session() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("session.json"),
        json!({
            "user": { "_id": "u1", "username": "ada" },
            "token": "jwt-test-token-123",
        })
        .to_string(),
    )
    .unwrap();

    Command::cargo_bin("quill")
        .unwrap()
        .env("QUILL_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    assert!(!temp.path().join("session.json").exists());
}

/// Test: logout when not signed in says so.
#[test]
fn test_logout_when_not_signed_in() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("quill")
        .unwrap()
        .env("QUILL_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
}
