//! Filter facet extraction.
//!
//! Derives the values that populate the status and assignee filter
//! controls from whatever collection was last fetched. Pure: recomputed
//! after every fetch, never cached across fetches.

use std::collections::HashSet;

use crate::models::{Task, TaskStatus, User};
use crate::types::DbId;

/// Distinct filterable values present in a task collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFacets {
    /// Distinct statuses in first-seen order.
    pub statuses: Vec<TaskStatus>,
    /// Distinct assignees, keyed by id, in first-seen order.
    pub users: Vec<User>,
}

impl TaskFacets {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.users.is_empty()
    }
}

/// Extract status and assignee facets from `tasks`.
///
/// A task without assignees contributes only its status. When the same
/// user id appears on several tasks the first occurrence wins.
pub fn extract_facets<'a, I>(tasks: I) -> TaskFacets
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut facets = TaskFacets::default();
    let mut seen_users: HashSet<DbId> = HashSet::new();

    for task in tasks {
        if !facets.statuses.contains(&task.status) {
            facets.statuses.push(task.status);
        }
        for user in &task.assigned_to {
            if seen_users.insert(user.id) {
                facets.users.push(user.clone());
            }
        }
    }

    facets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(raw: serde_json::Value) -> Vec<Task> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn scenario_pending_and_completed() {
        let tasks = tasks(serde_json::json!([
            {"id": 1, "title": "a", "status": "pending", "assigned_to": [{"id": 10, "username": "a"}]},
            {"id": 2, "title": "b", "status": "completed", "assigned_to": []},
        ]));

        let facets = extract_facets(&tasks);

        assert_eq!(facets.statuses, vec![TaskStatus::Pending, TaskStatus::Completed]);
        assert_eq!(facets.users.len(), 1);
        assert_eq!(facets.users[0].id, 10);
        assert_eq!(facets.users[0].username, "a");
        assert_eq!(
            serde_json::to_value(&facets.statuses).unwrap(),
            serde_json::json!(["pending", "completed"])
        );
    }

    #[test]
    fn duplicate_assignees_appear_once_first_seen_wins() {
        let tasks = tasks(serde_json::json!([
            {"id": 1, "title": "a", "status": "in_progress",
             "assigned_to": [{"id": 2, "username": "ben"}, {"id": 1, "username": "ana"}]},
            {"id": 2, "title": "b", "status": "in_progress",
             "assigned_to": [{"id": 1, "username": "ana-renamed"}, {"id": 3, "username": "cy"}]},
        ]));

        let facets = extract_facets(&tasks);

        let ids: Vec<DbId> = facets.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(facets.users[1].username, "ana");
        assert_eq!(facets.statuses, vec![TaskStatus::InProgress]);
    }

    #[test]
    fn absent_assignee_list_contributes_nothing() {
        let tasks = tasks(serde_json::json!([
            {"id": 1, "title": "a", "status": "pending"},
            {"id": 2, "title": "b", "status": "pending", "assigned_to": null},
        ]));

        let facets = extract_facets(&tasks);

        assert!(facets.users.is_empty());
        assert_eq!(facets.statuses, vec![TaskStatus::Pending]);
    }

    #[test]
    fn empty_collection_has_no_facets() {
        assert!(extract_facets(&Vec::<Task>::new()).is_empty());
    }

    #[test]
    fn legacy_and_canonical_status_collapse_to_one_facet() {
        let tasks = tasks(serde_json::json!([
            {"id": 1, "title": "a", "status": "ToDo"},
            {"id": 2, "title": "b", "status": "pending"},
        ]));
        assert_eq!(extract_facets(&tasks).statuses, vec![TaskStatus::Pending]);
    }
}
