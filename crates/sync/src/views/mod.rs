//! Page controllers.
//!
//! Each page owns a [`ViewController`](crate::controller::ViewController)
//! and talks to the backend only through the service traits in
//! [`Services`], so tests can drive a page with in-memory fakes.

pub mod auth;
pub mod my_tasks;
pub mod project_tasks;
pub mod projects;
pub mod task_details;
pub mod users;

use std::sync::Arc;

use taskdesk_client::{
    ApiClient, AuthService, CommentService, DeleteResponse, HttpAuth, HttpComments, HttpProjects,
    HttpTasks, HttpUsers, ProjectService, TaskService, UserService,
};
use taskdesk_core::filter::UserListFilter;
use taskdesk_core::models::User;

use crate::error::SyncError;
use crate::notify::{Notification, NotificationBus};

pub use auth::AuthFlow;
pub use my_tasks::{MyTasksView, TaskRow};
pub use project_tasks::ProjectTasksView;
pub use projects::ProjectsView;
pub use task_details::TaskDetailsView;
pub use users::UsersView;

pub const FETCH_TASKS_FAILED: &str = "Failed to fetch tasks. Please try again.";
pub const FETCH_COMMENT_COUNTS_FAILED: &str = "Failed to fetch comment counts. Please try again.";
pub const LOGIN_FAILED: &str = "Invalid credentials. Please try again.";
pub const REGISTER_FAILED: &str = "User creation failed. Please try again.";
pub const REGISTER_SUCCEEDED: &str = "User added successfully!";
pub const ADMIN_ONLY_DELETE: &str = "Only administrators can delete projects.";
pub const OWN_COMMENTS_ONLY: &str = "You can only modify your own comments.";

/// Backend collaborators shared by every page.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub projects: Arc<dyn ProjectService>,
    pub tasks: Arc<dyn TaskService>,
    pub comments: Arc<dyn CommentService>,
    pub users: Arc<dyn UserService>,
    pub notifications: Arc<NotificationBus>,
}

impl Services {
    /// Wire every service to the REST API behind `api`.
    pub fn http(api: ApiClient, notifications: Arc<NotificationBus>) -> Self {
        Self {
            auth: Arc::new(HttpAuth::new(api.clone())),
            projects: Arc::new(HttpProjects::new(api.clone())),
            tasks: Arc::new(HttpTasks::new(api.clone())),
            comments: Arc::new(HttpComments::new(api.clone())),
            users: Arc::new(HttpUsers::new(api)),
            notifications,
        }
    }

    /// Active users offered by the assignee pickers.
    pub async fn assignable_users(&self) -> Result<Vec<User>, SyncError> {
        let users = self.users.list(UserListFilter::default()).await?;
        Ok(users.into_iter().filter(|u| u.is_active).collect())
    }

    /// Report a failure that never reached the backend.
    pub(crate) fn refuse(&self, message: &str) -> SyncError {
        self.notifications.publish(Notification::error(message));
        SyncError::Core(taskdesk_core::error::CoreError::Forbidden(message.to_string()))
    }
}

/// Success text for a delete: the server's message when it sent one.
pub(crate) fn deleted_message(response: &DeleteResponse, fallback: &str) -> String {
    response
        .message
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}
