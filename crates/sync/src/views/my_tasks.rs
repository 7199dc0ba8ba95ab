//! "My tasks": the server-filtered task list enriched with comment counts.
//!
//! A fetch lists tasks with the server-side filter, then joins one comment
//! count per task. Either step failing fails the fetch with its own fixed
//! message; facets are always derived from the rows currently rendered.

use std::future::Future;
use std::sync::Arc;

use taskdesk_client::{CommentService, TaskService};
use taskdesk_core::facets::{extract_facets, TaskFacets};
use taskdesk_core::filter::TaskFilter;
use taskdesk_core::models::{Task, NOT_AVAILABLE};
use taskdesk_core::text_match::TextMatch;
use taskdesk_core::types::DbId;

use crate::controller::{LoadOutcome, ViewController};
use crate::error::SyncError;
use crate::join::enrich;
use crate::views::{deleted_message, Services, FETCH_COMMENT_COUNTS_FAILED, FETCH_TASKS_FAILED};

/// A task as rendered in the "my tasks" table.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: Task,
    pub comment_count: u64,
    pub project_name: String,
    /// Assignee usernames joined with `", "`, or `"N/A"`.
    pub user_names: String,
}

impl TaskRow {
    pub fn new(task: Task, comment_count: u64) -> Self {
        let project_name = task.project_name();
        let user_names = task
            .assignee_names()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            task,
            comment_count,
            project_name,
            user_names,
        }
    }
}

impl TextMatch for TaskRow {
    fn search_fields(&self) -> Vec<&str> {
        self.task.search_fields()
    }
}

pub struct MyTasksView {
    services: Services,
    controller: ViewController<TaskRow>,
    filter: TaskFilter,
}

impl MyTasksView {
    pub fn new(services: Services) -> Self {
        let controller = ViewController::new("my_tasks", services.notifications.clone());
        Self {
            services,
            controller,
            filter: TaskFilter::default(),
        }
    }

    pub fn controller(&self) -> &ViewController<TaskRow> {
        &self.controller
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub async fn load(&self) -> LoadOutcome {
        self.controller.load(self.fetch()).await
    }

    /// Replace the server-side filter and fetch again.
    pub async fn apply_filter(&mut self, filter: TaskFilter) -> LoadOutcome {
        tracing::debug!(?filter, "Applying task filter");
        self.filter = filter;
        self.load().await
    }

    /// Distinct statuses and assignees of the rendered rows.
    pub async fn facets(&self) -> TaskFacets {
        let rows = self.controller.rows().await;
        extract_facets(rows.iter().map(|row| &row.task))
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

    /// The task details dialog was closed; comments may have changed.
    pub async fn after_details_closed(&self) -> LoadOutcome {
        self.load().await
    }

    pub async fn set_text_filter(&self, raw: impl Into<String>) {
        self.controller.set_text_filter(raw).await;
    }

    pub async fn visible_rows(&self) -> Vec<TaskRow> {
        self.controller.visible_rows().await
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<TaskRow>, SyncError>> + Send + 'static {
        fetch_rows(
            self.services.tasks.clone(),
            self.services.comments.clone(),
            self.filter.clone(),
        )
    }
}

async fn fetch_rows(
    tasks: Arc<dyn TaskService>,
    comments: Arc<dyn CommentService>,
    filter: TaskFilter,
) -> Result<Vec<TaskRow>, SyncError> {
    let listed = tasks
        .list(&filter)
        .await
        .map_err(|e| SyncError::from(e).context(FETCH_TASKS_FAILED))?;

    let joined = enrich(listed, |task| comments.count_for_task(task.id))
        .await
        .map_err(|e| SyncError::from(e).context(FETCH_COMMENT_COUNTS_FAILED))?;

    tracing::debug!(rows = joined.len(), "Tasks enriched with comment counts");
    Ok(joined
        .into_iter()
        .map(|(task, count)| TaskRow::new(task, count))
        .collect())
}
