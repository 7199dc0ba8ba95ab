//! Tasks of a single project.

use std::future::Future;

use taskdesk_core::input::TaskInput;
use taskdesk_core::models::{Task, User};
use taskdesk_core::types::DbId;

use crate::controller::{LoadOutcome, ViewController};
use crate::error::SyncError;
use crate::form::{FormSession, Submission};
use crate::views::{deleted_message, Services, FETCH_TASKS_FAILED};

pub struct ProjectTasksView {
    services: Services,
    project_id: DbId,
    project_name: Option<String>,
    controller: ViewController<Task>,
    form: FormSession<TaskInput>,
    assignable: Vec<User>,
}

impl ProjectTasksView {
    pub fn new(services: Services, project_id: DbId) -> Self {
        let controller = ViewController::new("project_tasks", services.notifications.clone());
        Self {
            services,
            project_id,
            project_name: None,
            controller,
            form: FormSession::new(TaskInput::for_project(project_id)),
            assignable: Vec::new(),
        }
    }

    pub fn project_id(&self) -> DbId {
        self.project_id
    }

    /// Name of the hosting project, once [`load_project`](Self::load_project)
    /// has succeeded.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn controller(&self) -> &ViewController<Task> {
        &self.controller
    }

    pub fn form(&self) -> &FormSession<TaskInput> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession<TaskInput> {
        &mut self.form
    }

    pub fn assignable_users(&self) -> &[User] {
        &self.assignable
    }

    pub async fn load(&self) -> LoadOutcome {
        self.controller.load(self.fetch()).await
    }

    pub async fn load_project(&mut self) -> Result<(), SyncError> {
        let project = self.services.projects.get(self.project_id).await?;
        self.project_name = Some(project.name);
        Ok(())
    }

    pub async fn load_assignable_users(&mut self) -> Result<(), SyncError> {
        self.assignable = self.services.assignable_users().await?;
        Ok(())
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, task: &Task) {
        let mut input = TaskInput::from_task(task);
        if input.project.is_none() {
            input.project = Some(self.project_id);
        }
        self.form.open_edit(task.id, input);
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub async fn submit(&mut self) -> Result<Task, SyncError> {
        let submission = self.form.submit()?;
        let tasks = &self.services.tasks;

        let saved = match submission {
            Submission::Create(payload) => {
                self.controller
                    .mutate(
                        async { tasks.create(&payload).await.map_err(SyncError::from) },
                        |_| "Task created successfully.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
            Submission::Update(id, payload) => {
                self.controller
                    .mutate(
                        async { tasks.update(id, &payload).await.map_err(SyncError::from) },
                        |_| "Task updated successfully.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
        };
        self.form.close();
        Ok(saved)
    }

    pub async fn delete(&self, id: DbId) -> Result<(), SyncError> {
        let tasks = &self.services.tasks;
        self.controller
            .mutate(
                async { tasks.delete(id).await.map_err(SyncError::from) },
                |response| deleted_message(response, "Task deleted successfully."),
                self.fetch(),
            )
            .await?;
        Ok(())
    }

    pub async fn set_text_filter(&self, raw: impl Into<String>) {
        self.controller.set_text_filter(raw).await;
    }

    pub async fn visible_rows(&self) -> Vec<Task> {
        self.controller.visible_rows().await
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<Task>, SyncError>> + Send + 'static {
        let tasks = self.services.tasks.clone();
        let project_id = self.project_id;
        async move {
            tasks
                .list_by_project(project_id)
                .await
                .map_err(|e| SyncError::from(e).context(FETCH_TASKS_FAILED))
        }
    }
}
