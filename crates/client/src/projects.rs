//! Project resource (`/projects/`).

use async_trait::async_trait;
use taskdesk_core::filter::QueryParams;
use taskdesk_core::models::{Project, ProjectPayload};
use taskdesk_core::types::DbId;

use crate::api::{ApiClient, DeleteResponse};
use crate::error::ApiError;

/// Remote operations on projects.
#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ApiError>;
    async fn get(&self, id: DbId) -> Result<Project, ApiError>;
    async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError>;
    async fn update(&self, id: DbId, payload: &ProjectPayload) -> Result<Project, ApiError>;
    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError>;
}

/// [`ProjectService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpProjects {
    api: ApiClient,
}

impl HttpProjects {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProjectService for HttpProjects {
    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.api.get("projects/", &QueryParams::new()).await
    }

    async fn get(&self, id: DbId) -> Result<Project, ApiError> {
        self.api.get(&format!("projects/{id}/"), &QueryParams::new()).await
    }

    async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        let project: Project = self.api.post("projects/", payload).await?;
        tracing::info!(project_id = project.id, "Project created");
        Ok(project)
    }

    async fn update(&self, id: DbId, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.api.put(&format!("projects/{id}/"), payload).await
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        let response = self.api.delete(&format!("projects/{id}/")).await?;
        tracing::info!(project_id = id, "Project deleted");
        Ok(response)
    }
}
