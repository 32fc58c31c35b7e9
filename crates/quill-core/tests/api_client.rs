//! Integration tests for the backend API client against a mock server.

use quill_core::api::{ApiClient, ApiError};
use quill_core::models::{Credentials, PostDraft};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn post_body(id: &str, author: &str, likes: &[&str]) -> serde_json::Value {
    json!({
        "_id": id,
        "title": "A day in the shell",
        "desc": "Notes from the terminal",
        "photo": "shell.jpg",
        "userId": { "_id": author, "username": "ada" },
        "views": 7,
        "likes": likes,
        "createdAt": "2024-03-01T12:00:00Z",
    })
}

#[tokio::test]
async fn test_fetch_post_attaches_bearer_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/find/p1"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("p1", "u1", &["u2"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let post = client.fetch_post("jwt-abc", "p1").await.unwrap();

    assert_eq!(post.id, "p1");
    assert_eq!(post.user_id.id, "u1");
    assert_eq!(post.likes, vec!["u2"]);
}

#[tokio::test]
async fn test_fetch_post_missing_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/find/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Blog not found" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client.fetch_post("jwt-abc", "nope").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Http {
            status: 404,
            message: "Blog not found".to_string()
        }
    );
}

#[tokio::test]
async fn test_fetch_post_garbage_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/find/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let err = client.fetch_post("jwt-abc", "p1").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_connection_refused_maps_to_network_error() {
    // Nothing is listening on this port.
    let client = ApiClient::with_base_url("http://127.0.0.1:1".to_string());
    let err = client.fetch_feed().await.unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }));
}

#[tokio::test]
async fn test_toggle_like_returns_updated_post() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/blog/likeBlog/p1"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_body("p1", "u1", &["u2", "u3"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let post = client.toggle_like("jwt-abc", "p1").await.unwrap();
    assert_eq!(post.likes, vec!["u2", "u3"]);
}

#[tokio::test]
async fn test_delete_post_ignores_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/blog/deleteBlog/p1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Successfully deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    client.delete_post("jwt-abc", "p1").await.unwrap();
}

#[tokio::test]
async fn test_fetch_feed_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_body("p1", "u1", &[])])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let feed = client.fetch_feed().await.unwrap();
    assert_eq!(feed.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|r| !r.headers.contains_key("authorization"))
    );
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;
    let credentials = Credentials {
        username: "ada".to_string(),
        password: "hunter2".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(&credentials))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "username": "ada",
            "token": "jwt-abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let resp = client.login(&credentials).await.unwrap();
    assert_eq!(resp.user.username, "ada");
    assert_eq!(resp.token, "jwt-abc");
}

#[tokio::test]
async fn test_create_post_round_trip() {
    let server = MockServer::start().await;
    let draft = PostDraft {
        title: "A day in the shell".to_string(),
        desc: "Notes from the terminal".to_string(),
        photo: "shell.jpg".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/blog/create"))
        .and(header("authorization", "Bearer jwt-abc"))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_body("p9", "u1", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri());
    let post = client.create_post("jwt-abc", &draft).await.unwrap();
    assert_eq!(post.id, "p9");
}
