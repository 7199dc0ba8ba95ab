//! Comment resource (`/comments/`).

use async_trait::async_trait;
use taskdesk_core::filter::QueryParams;
use taskdesk_core::models::{Comment, CommentCount, CommentPayload};
use taskdesk_core::types::DbId;

use crate::api::{ApiClient, DeleteResponse};
use crate::error::ApiError;

/// Remote operations on task comments.
#[async_trait]
pub trait CommentService: Send + Sync {
    async fn list_for_task(&self, task_id: DbId) -> Result<Vec<Comment>, ApiError>;
    /// Number of comments on a task (`/comments/count/`).
    async fn count_for_task(&self, task_id: DbId) -> Result<u64, ApiError>;
    async fn get(&self, id: DbId) -> Result<Comment, ApiError>;
    async fn create(&self, payload: &CommentPayload) -> Result<Comment, ApiError>;
    async fn update(&self, id: DbId, payload: &CommentPayload) -> Result<Comment, ApiError>;
    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError>;
}

/// [`CommentService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpComments {
    api: ApiClient,
}

impl HttpComments {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CommentService for HttpComments {
    async fn list_for_task(&self, task_id: DbId) -> Result<Vec<Comment>, ApiError> {
        let mut query = QueryParams::new();
        query.push("task", task_id);
        self.api.get("comments/", &query).await
    }

    async fn count_for_task(&self, task_id: DbId) -> Result<u64, ApiError> {
        let mut query = QueryParams::new();
        query.push("task_id", task_id);
        let count: CommentCount = self.api.get("comments/count/", &query).await?;
        Ok(count.comment_count)
    }

    async fn get(&self, id: DbId) -> Result<Comment, ApiError> {
        self.api.get(&format!("comments/{id}/"), &QueryParams::new()).await
    }

    async fn create(&self, payload: &CommentPayload) -> Result<Comment, ApiError> {
        self.api.post("comments/", payload).await
    }

    async fn update(&self, id: DbId, payload: &CommentPayload) -> Result<Comment, ApiError> {
        self.api.put(&format!("comments/{id}/"), payload).await
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        self.api.delete(&format!("comments/{id}/")).await
    }
}
