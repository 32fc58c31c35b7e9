//! Blog endpoints.

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Post, PostDraft};

impl ApiClient {
    /// `GET /blog/getAll` — the home feed.
    ///
    /// The backend allows anonymous reads of the feed, so no token.
    pub async fn fetch_feed(&self) -> ApiResult<Vec<Post>> {
        self.send_json(Method::GET, "/blog/getAll", None, None::<&()>)
            .await
    }

    /// `GET /blog/find/:id` — one post by id.
    pub async fn fetch_post(&self, token: &str, id: &str) -> ApiResult<Post> {
        self.send_json(
            Method::GET,
            &format!("/blog/find/{id}"),
            Some(token),
            None::<&()>,
        )
        .await
    }

    /// `PUT /blog/likeBlog/:id` — toggle the caller's like.
    ///
    /// Returns the updated post; the caller reconciles its liked flag from
    /// this authoritative state rather than flipping locally.
    pub async fn toggle_like(&self, token: &str, id: &str) -> ApiResult<Post> {
        self.send_json(
            Method::PUT,
            &format!("/blog/likeBlog/{id}"),
            Some(token),
            None::<&()>,
        )
        .await
    }

    /// `DELETE /blog/deleteBlog/:id` — delete a post.
    pub async fn delete_post(&self, token: &str, id: &str) -> ApiResult<()> {
        self.send_unit(Method::DELETE, &format!("/blog/deleteBlog/{id}"), Some(token))
            .await
    }

    /// `POST /blog/create` — create a post, returning it.
    pub async fn create_post(&self, token: &str, draft: &PostDraft) -> ApiResult<Post> {
        self.send_json(Method::POST, "/blog/create", Some(token), Some(draft))
            .await
    }

    /// `PUT /blog/updateBlog/:id` — update a post, returning it.
    pub async fn update_post(&self, token: &str, id: &str, draft: &PostDraft) -> ApiResult<Post> {
        self.send_json(
            Method::PUT,
            &format!("/blog/updateBlog/{id}"),
            Some(token),
            Some(draft),
        )
        .await
    }
}
