//! Authentication endpoints (`/auth/`).

use async_trait::async_trait;
use serde::Serialize;
use taskdesk_core::filter::QueryParams;
use taskdesk_core::models::{Credentials, RegisterPayload, User};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::session::{Session, TokenPair};

/// Sign-in, registration and profile operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token pair and store it in the session.
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;
    async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError>;
    /// The signed-in user as the server sees it.
    async fn profile(&self) -> Result<User, ApiError>;
    /// Revoke the refresh token (best effort) and clear the session.
    async fn logout(&self) -> Result<(), ApiError>;
    fn session(&self) -> &Session;
}

#[derive(Serialize)]
struct LogoutRequest<'a> {
    refresh: &'a str,
}

/// [`AuthService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAuth {
    api: ApiClient,
}

impl HttpAuth {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuth {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let tokens: TokenPair = self.api.post("auth/login/", credentials).await?;
        self.api.session().set_tokens(tokens.clone());
        tracing::info!(username = %credentials.username, "Signed in");
        Ok(tokens)
    }

    async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        self.api.post("auth/register/", payload).await
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.api.get("auth/profile/", &QueryParams::new()).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result = match self.api.session().refresh_token() {
            Some(refresh) => self
                .api
                .post::<_, serde_json::Value>("auth/logout/", &LogoutRequest { refresh: &refresh })
                .await
                .map(|_| ()),
            None => Ok(()),
        };
        self.api.session().clear();
        tracing::info!("Signed out");
        result
    }

    fn session(&self) -> &Session {
        self.api.session()
    }
}
