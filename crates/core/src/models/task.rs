//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::project::Project;
use crate::models::status::{Priority, TaskStatus};
use crate::models::user::User;
use crate::types::{DbId, DueDate};

/// Placeholder shown when a derived column has no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown in tables for a task or project with no assignees.
pub const NO_USERS_ASSIGNED: &str = "No users assigned";

/// A task as returned by `/tasks/`, with its project and assignees
/// embedded by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DueDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "crate::models::embedded_or_none")]
    pub project: Option<Project>,
    /// `null` and a missing key both decode as an empty list.
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub assigned_to: Vec<User>,
}

impl Task {
    /// Name of the owning project, or `"N/A"`.
    pub fn project_name(&self) -> String {
        self.project
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Comma-separated assignee usernames, or `None` if nobody is assigned.
    pub fn assignee_names(&self) -> Option<String> {
        crate::models::usernames(&self.assigned_to)
    }
}

/// DTO for creating (POST) or replacing (PUT) a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub due_date: DueDate,
    pub priority: Priority,
    pub status: TaskStatus,
    pub project: DbId,
    pub assigned_to: Vec<DbId>,
}
