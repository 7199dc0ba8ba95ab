//! HTTP plumbing shared by every resource service.
//!
//! [`ApiClient`] wraps a [`reqwest::Client`], the REST base URL and the
//! [`Session`]. It attaches the bearer token, turns non-2xx responses into
//! [`ApiError`]s and expires the session when the backend reports the
//! token as invalid. One request per call; nothing is retried.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskdesk_core::filter::QueryParams;

use crate::config::ClientConfig;
use crate::error::{ApiError, TOKEN_NOT_VALID};
use crate::session::Session;

/// Body of a successful DELETE. Empty bodies decode to `message: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for the task-management REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://host:8000/api`).
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across several sessions).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<Session>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    pub fn from_config(config: &ClientConfig, session: Arc<Session>) -> Self {
        Self::new(config.api_url.clone(), session)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {path}` with optional query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, ApiError> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        let response = self.execute(request).await?;
        Self::parse_response(response).await
    }

    /// `POST {path}` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT {path}` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PATCH {path}` with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `DELETE {path}`.
    pub async fn delete(&self, path: &str) -> Result<DeleteResponse, ApiError> {
        let response = self.execute(self.request(Method::DELETE, path)).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(DeleteResponse::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    // ---- private helpers ----

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(method, path).json(body)).await?;
        Self::parse_response(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send the request and ensure a success status.
    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let err = ApiError::from_status(status.as_u16(), body);

        if status == StatusCode::UNAUTHORIZED {
            if let ApiError::Status {
                code: Some(code),
                message,
                ..
            } = &err
            {
                if code == TOKEN_NOT_VALID {
                    self.session.expire();
                    return Err(ApiError::Unauthorized(
                        message.clone().unwrap_or_else(|| code.clone()),
                    ));
                }
            }
        }

        tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
        Err(err)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
