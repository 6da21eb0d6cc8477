//! HTTP client shared by every entity repository.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::errors::AppError;
use crate::validation::ValidationErrors;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Thin wrapper around [`reqwest::Client`] bound to one API origin.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        Self::with_timeout(base_url, Duration::from_secs(Config::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Creating API client for {}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: None,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = Self::with_timeout(config.api_url.clone(), config.timeout)?;
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    /// Send `key` in the `x-api-key` header of every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path (and query) relative to the API origin.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// Issue a request and fail on any non-success status.
    ///
    /// `body`, when given, is sent as JSON exactly as it serializes.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AppError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, path, "Sending API request");

        let mut request = self.build_request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(%method, path, %status, "Failed to read error body: {}", e);
                String::new()
            }
        };
        let message = error_message(status, &text);
        tracing::warn!(%method, path, %status, "API request failed: {}", message);

        Err(AppError::Http { status, message })
    }

    /// Issue a request and decode the response body as `R`.
    ///
    /// An empty body decodes as JSON `null`, so `R` may be `()`, an `Option`
    /// or [`Value`].
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, AppError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let bytes = response.bytes().await?;

        let decoded = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };

        decoded.map_err(|e| {
            tracing::error!(path, "Failed to decode API response: {}", e);
            AppError::InvalidData {
                entity: "response",
                issues: ValidationErrors::single("", e.to_string()),
            }
        })
    }
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"message": ..}` and `{"error": {"message": ..}}`; anything
/// else falls back to the raw text, then to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .get("message")
            .or_else(|| value.get("error").and_then(|e| e.get("message")))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000");
        assert_eq!(
            client.url("/api/movies/all?populate=true"),
            "http://localhost:4000/api/movies/all?populate=true"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = ApiClient::new("http://localhost:4000")
            .unwrap()
            .with_api_key("secret-key");
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_api_key: true"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Title taken"}"#),
            "Title taken"
        );
        assert_eq!(
            error_message(
                StatusCode::UNAUTHORIZED,
                r#"{"success":false,"error":{"code":"UNAUTHORIZED","message":"Invalid API key"}}"#
            ),
            "Invalid API key"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
