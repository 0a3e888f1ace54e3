//! HTTP implementation of [`AuthApi`].

use super::AuthApi;
use crate::config::SessionConfig;
use crate::error::{AuthError, Result};
use crate::state::{
    Credentials, GoogleCredential, ProfileUpdate, RegistrationRequest, TokenPair, UserClaims,
};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Account endpoints reached over HTTP with JSON bodies.
///
/// Error responses are mapped to [`AuthError::Rejected`], using the body's
/// `message`, `error` or `title` field (or the raw text) as the message.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: SessionConfig,
}

impl HttpAuthApi {
    /// Create an API client for `config`.
    #[must_use]
    pub const fn new(client: reqwest::Client, config: SessionConfig) -> Self {
        Self { client, config }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.config.endpoint(path))
    }
}

impl AuthApi for HttpAuthApi {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<TokenPair>> + Send {
        let request = self.post(&self.config.login_path).json(credentials);
        async move { read_json(request.send().await?).await }
    }

    fn login_google(
        &self,
        credential: &GoogleCredential,
    ) -> impl Future<Output = Result<TokenPair>> + Send {
        let request = self.post(&self.config.google_login_path).json(credential);
        async move { read_json(request.send().await?).await }
    }

    fn register(&self, request: &RegistrationRequest) -> impl Future<Output = Result<()>> + Send {
        let request = self.post(&self.config.register_path).json(request);
        async move {
            check_status(request.send().await?).await?;
            Ok(())
        }
    }

    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<TokenPair>> + Send {
        let request = self
            .post(&self.config.refresh_path)
            .json(&serde_json::json!({ "refreshToken": refresh_token }));
        async move { read_json(request.send().await?).await }
    }

    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<UserClaims>> + Send {
        let request = self
            .client
            .put(self.config.endpoint(&self.config.profile_path))
            .bearer_auth(token)
            .json(update);
        async move { read_json(request.send().await?).await }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    tracing::debug!(status = status.as_u16(), %message, "Auth endpoint rejected request");
    Err(AuthError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}

/// Human-readable message from an error response body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => ["message", "error", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str))
            .map(str::to_string),
        Ok(serde_json::Value::String(message)) => Some(message),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}
