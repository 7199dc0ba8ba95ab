//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::types::{DbId, Timestamp};

/// A project as returned by `/projects/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Absent when the backend serializes the creator as a bare id.
    #[serde(default, deserialize_with = "crate::models::embedded_or_none")]
    pub created_by: Option<User>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub assigned_users: Vec<User>,
}

impl Project {
    /// Comma-joined usernames of the assigned users, `None` when nobody is.
    pub fn assignee_names(&self) -> Option<String> {
        crate::models::usernames(&self.assigned_users)
    }
}

/// DTO for creating (POST) or replacing (PUT) a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
    pub assigned_users: Vec<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_assigned_users_decode_as_empty() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Hermes",
            "created_by": 2,
            "assigned_users": null,
        }))
        .unwrap();

        assert!(project.created_by.is_none());
        assert!(project.assigned_users.is_empty());
        assert_eq!(project.assignee_names(), None);
    }

    #[test]
    fn assignee_names_join_usernames_in_order() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Hermes",
            "description": "Courier service",
            "assigned_users": [{"id": 10, "username": "ana"}, {"id": 11, "username": "ben"}],
        }))
        .unwrap();

        assert_eq!(project.assignee_names().as_deref(), Some("ana, ben"));
    }
}
