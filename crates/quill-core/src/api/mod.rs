//! Backend API client.
//!
//! A thin wrapper over a shared [`reqwest::Client`] bound to the configured
//! base URL. Endpoint methods live in [`auth`] and [`blog`]; this module owns
//! request building, bearer attachment, JSON decoding, and error mapping.

mod auth;
mod blog;

use std::fmt;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;

/// Standard User-Agent header for Quill API requests.
pub const USER_AGENT: &str = concat!("quill/", env!("CARGO_PKG_VERSION"));

/// Categories of API failures.
///
/// The view layer collapses all of these into a single observable outcome
/// (navigate to the error view, or leave the view in its last-good state);
/// the taxonomy exists so logs and tests can discriminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    Http { status: u16, message: String },
    /// The request never completed (connection refused, DNS, timeout).
    Network { message: String },
    /// The response body did not parse as the expected type.
    Decode { message: String },
}

impl ApiError {
    /// Builds an HTTP status error, extracting the backend's message when the
    /// body is the usual `{"message": "..."}` shape.
    fn http_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        Self::Http { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::Network { message } => write!(f, "request failed: {message}"),
            ApiError::Decode { message } => write!(f, "unexpected response: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client for the blog backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client bound to the configured backend.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if the base URL is not a
    ///   loopback address.
    /// - At runtime, panics if `QUILL_BLOCK_REAL_API=1` and the base URL is
    ///   not a loopback address.
    ///
    /// This prevents tests from accidentally hitting a real backend. Point
    /// tests at a mock server (wiremock) via `QUILL_BACKEND_URL`.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.backend_url.clone())
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(base_url: String) -> Self {
        #[cfg(test)]
        assert!(
            is_loopback(&base_url),
            "Tests must not use a real backend!\n\
             Point QUILL_BACKEND_URL at a mock server (e.g., wiremock).\n\
             Found base_url: {base_url}"
        );

        #[cfg(not(test))]
        if std::env::var("QUILL_BLOCK_REAL_API").is_ok_and(|v| v == "1") && !is_loopback(&base_url)
        {
            panic!(
                "QUILL_BLOCK_REAL_API=1 but base URL is not a mock server!\n\
                 Found base_url: {base_url}"
            );
        }

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url).header("user-agent", USER_AGENT);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Issues a request and decodes the JSON response body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let text = self.send_raw(method, path, token, body).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    /// Issues a request, checking the status but discarding the body.
    async fn send_unit(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<()> {
        self.send_raw(method, path, token, None::<&()>).await?;
        Ok(())
    }

    async fn send_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> ApiResult<String> {
        tracing::debug!(%method, path, "backend request");
        let mut builder = self.request(method, path, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let err = ApiError::http_status(status.as_u16(), &text);
            tracing::debug!(path, %err, "backend request failed");
            return Err(err);
        }
        Ok(text)
    }
}

fn is_loopback(base_url: &str) -> bool {
    url::Url::parse(base_url).is_ok_and(|url| {
        matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_backend_message() {
        let err = ApiError::http_status(404, r#"{"message": "Blog not found"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                message: "Blog not found".to_string()
            }
        );
    }

    #[test]
    fn test_http_status_falls_back_on_opaque_body() {
        let err = ApiError::http_status(500, "<html>oops</html>");
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_loopback_detection() {
        assert!(is_loopback("http://localhost:5000"));
        assert!(is_loopback("http://127.0.0.1:8080"));
        assert!(!is_loopback("https://blog.example.com"));
        assert!(!is_loopback("not a url"));
    }

    #[test]
    #[should_panic(expected = "Tests must not use a real backend")]
    fn test_client_refuses_real_backend_in_tests() {
        let _ = ApiClient::with_base_url("https://blog.example.com".to_string());
    }
}
