//! Wire types for the blog backend.
//!
//! The backend is Express/Mongo flavored: camelCase fields, string `_id`
//! identifiers, and posts carry their author as a populated sub-document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated user, as returned by the auth endpoints.
///
/// The client holds a read-only copy; the backend owns the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The populated `userId` sub-document on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// A blog post.
///
/// Fetched per-view and never cached client-side; `likes` is the snapshot of
/// user ids that had liked the post at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub desc: String,
    pub photo: String,
    pub user_id: PostAuthor,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given user id is in this post's liked-set snapshot.
    pub fn liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    /// Whether the given user id authored this post.
    pub fn authored_by(&self, user_id: &str) -> bool {
        self.user_id.id == user_id
    }
}

/// Credentials for `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response from the auth endpoints: the user record plus a bearer token.
///
/// The backend returns the user fields inline next to `token`, so this
/// flattens rather than nesting a `user` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// Body for `POST /blog/create` and `PUT /blog/updateBlog/:id`.
#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    pub title: String,
    pub desc: String,
    pub photo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(author_id: &str, likes: &[&str]) -> Post {
        serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "title": "First post",
            "desc": "Hello",
            "photo": "first.jpg",
            "userId": { "_id": author_id, "username": "ada" },
            "views": 3,
            "likes": likes,
            "createdAt": "2024-03-01T12:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_post_decodes_backend_shape() {
        let post = sample_post("u1", &["u1", "u2"]);
        assert_eq!(post.id, "p1");
        assert_eq!(post.user_id.username, "ada");
        assert_eq!(post.views, 3);
        assert_eq!(post.likes, vec!["u1", "u2"]);
    }

    #[test]
    fn test_post_missing_likes_defaults_empty() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "_id": "p2",
            "title": "Bare",
            "desc": "",
            "photo": "bare.jpg",
            "userId": { "_id": "u9", "username": "nil" },
            "createdAt": "2024-03-01T12:00:00Z",
        }))
        .unwrap();
        assert!(post.likes.is_empty());
        assert_eq!(post.views, 0);
    }

    #[test]
    fn test_liked_by_and_authored_by() {
        let post = sample_post("u1", &["u1", "u2"]);
        assert!(post.liked_by("u2"));
        assert!(!post.liked_by("u3"));
        assert!(post.authored_by("u1"));
        assert!(!post.authored_by("u2"));
    }

    #[test]
    fn test_auth_response_flattens_user() {
        let resp: AuthResponse = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "username": "ada",
            "email": "ada@example.com",
            "token": "jwt-abc",
        }))
        .unwrap();
        assert_eq!(resp.user.id, "u1");
        assert_eq!(resp.token, "jwt-abc");
    }
}
