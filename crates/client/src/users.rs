//! User administration resource (`/users/`).
//!
//! Users are never hard-deleted; deactivation is a PATCH of `is_active`.

use async_trait::async_trait;
use taskdesk_core::filter::{QueryParams, UserListFilter};
use taskdesk_core::models::{ActivationPatch, User, UserPayload};
use taskdesk_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ApiError;

/// Remote operations on users.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list(&self, filter: UserListFilter) -> Result<Vec<User>, ApiError>;
    async fn get(&self, id: DbId) -> Result<User, ApiError>;
    async fn create(&self, payload: &UserPayload) -> Result<User, ApiError>;
    async fn update(&self, id: DbId, payload: &UserPayload) -> Result<User, ApiError>;
    /// Activate or deactivate a user.
    async fn set_active(&self, id: DbId, active: bool) -> Result<User, ApiError>;
}

/// [`UserService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpUsers {
    api: ApiClient,
}

impl HttpUsers {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserService for HttpUsers {
    async fn list(&self, filter: UserListFilter) -> Result<Vec<User>, ApiError> {
        self.api.get("users/", &filter.to_query()).await
    }

    async fn get(&self, id: DbId) -> Result<User, ApiError> {
        self.api.get(&format!("users/{id}/"), &QueryParams::new()).await
    }

    async fn create(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let user: User = self.api.post("users/", payload).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn update(&self, id: DbId, payload: &UserPayload) -> Result<User, ApiError> {
        self.api.patch(&format!("users/{id}/"), payload).await
    }

    async fn set_active(&self, id: DbId, active: bool) -> Result<User, ApiError> {
        let user = self
            .api
            .patch(&format!("users/{id}/"), &ActivationPatch { is_active: active })
            .await?;
        tracing::info!(user_id = id, active, "User activation changed");
        Ok(user)
    }
}
