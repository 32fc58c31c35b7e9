//! Auth endpoints.

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{AuthResponse, Credentials};

impl ApiClient {
    /// `POST /auth/login` — exchange credentials for a user record + token.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send_json(Method::POST, "/auth/login", None, Some(credentials))
            .await
    }

    /// `POST /auth/register` — create an account; responds like login.
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send_json(Method::POST, "/auth/register", None, Some(credentials))
            .await
    }
}
