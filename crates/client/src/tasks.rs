//! Task resource (`/tasks/`).

use async_trait::async_trait;
use taskdesk_core::filter::{QueryParams, TaskFilter};
use taskdesk_core::models::{Task, TaskPayload};
use taskdesk_core::types::DbId;

use crate::api::{ApiClient, DeleteResponse};
use crate::error::ApiError;

/// Remote operations on tasks.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Tasks visible to the current user, narrowed by `filter`.
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError>;
    /// Tasks belonging to one project.
    async fn list_by_project(&self, project_id: DbId) -> Result<Vec<Task>, ApiError>;
    async fn get(&self, id: DbId) -> Result<Task, ApiError>;
    async fn create(&self, payload: &TaskPayload) -> Result<Task, ApiError>;
    async fn update(&self, id: DbId, payload: &TaskPayload) -> Result<Task, ApiError>;
    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError>;
}

/// [`TaskService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpTasks {
    api: ApiClient,
}

impl HttpTasks {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskService for HttpTasks {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        tracing::debug!(?filter, "Listing tasks");
        self.api.get("tasks/", &filter.to_query()).await
    }

    async fn list_by_project(&self, project_id: DbId) -> Result<Vec<Task>, ApiError> {
        let mut query = QueryParams::new();
        query.push("project_id", project_id);
        self.api.get("tasks/by-project/", &query).await
    }

    async fn get(&self, id: DbId) -> Result<Task, ApiError> {
        self.api.get(&format!("tasks/{id}/"), &QueryParams::new()).await
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, ApiError> {
        let task: Task = self.api.post("tasks/", payload).await?;
        tracing::info!(task_id = task.id, project_id = payload.project, "Task created");
        Ok(task)
    }

    async fn update(&self, id: DbId, payload: &TaskPayload) -> Result<Task, ApiError> {
        self.api.put(&format!("tasks/{id}/"), payload).await
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        let response = self.api.delete(&format!("tasks/{id}/")).await?;
        tracing::info!(task_id = id, "Task deleted");
        Ok(response)
    }
}
