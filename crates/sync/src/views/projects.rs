//! Projects page: list, create/edit form, admin-only delete.

use std::future::Future;

use taskdesk_core::input::ProjectInput;
use taskdesk_core::models::{Project, User};
use taskdesk_core::types::DbId;

use crate::controller::{LoadOutcome, ViewController};
use crate::error::SyncError;
use crate::form::{FormSession, Submission};
use crate::views::{deleted_message, Services, ADMIN_ONLY_DELETE};

pub struct ProjectsView {
    services: Services,
    controller: ViewController<Project>,
    form: FormSession<ProjectInput>,
    assignable: Vec<User>,
}

impl ProjectsView {
    pub fn new(services: Services) -> Self {
        let controller = ViewController::new("projects", services.notifications.clone());
        Self {
            services,
            controller,
            form: FormSession::new(ProjectInput::default()),
            assignable: Vec::new(),
        }
    }

    pub fn controller(&self) -> &ViewController<Project> {
        &self.controller
    }

    pub fn form(&self) -> &FormSession<ProjectInput> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession<ProjectInput> {
        &mut self.form
    }

    pub fn assignable_users(&self) -> &[User] {
        &self.assignable
    }

    pub async fn load(&self) -> LoadOutcome {
        self.controller.load(self.fetch()).await
    }

    /// Refresh the users offered by the assignee picker.
    pub async fn load_assignable_users(&mut self) -> Result<(), SyncError> {
        self.assignable = self.services.assignable_users().await?;
        Ok(())
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, project: &Project) {
        self.form
            .open_edit(project.id, ProjectInput::from_project(project));
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Validate and send the form. Invalid input never reaches the backend.
    pub async fn submit(&mut self) -> Result<Project, SyncError> {
        let submission = self.form.submit()?;
        let projects = &self.services.projects;

        let saved = match submission {
            Submission::Create(payload) => {
                self.controller
                    .mutate(
                        async { projects.create(&payload).await.map_err(SyncError::from) },
                        |_| "Project created successfully.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
            Submission::Update(id, payload) => {
                self.controller
                    .mutate(
                        async { projects.update(id, &payload).await.map_err(SyncError::from) },
                        |_| "Project updated successfully.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
        };
        self.form.close();
        Ok(saved)
    }

    /// Delete a project. Non-admins are refused before any request is made.
    pub async fn delete(&self, id: DbId) -> Result<(), SyncError> {
        if !self.services.auth.session().is_admin() {
            tracing::warn!(project_id = id, "Project delete refused for non-admin");
            return Err(self.services.refuse(ADMIN_ONLY_DELETE));
        }

        let projects = &self.services.projects;
        self.controller
            .mutate(
                async { projects.delete(id).await.map_err(SyncError::from) },
                |response| deleted_message(response, "Project deleted successfully."),
                self.fetch(),
            )
            .await?;
        Ok(())
    }

    pub async fn set_text_filter(&self, raw: impl Into<String>) {
        self.controller.set_text_filter(raw).await;
    }

    pub async fn visible_rows(&self) -> Vec<Project> {
        self.controller.visible_rows().await
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<Project>, SyncError>> + Send + 'static {
        let projects = self.services.projects.clone();
        async move { projects.list().await.map_err(SyncError::from) }
    }
}
