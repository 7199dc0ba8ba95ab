//! Server-side list filters and their query-string encoding.
//!
//! A filter key whose value is absent or blank is left out of the request
//! entirely; the backend never sees `?status=&user_id=`.

use std::fmt::Display;

use crate::error::CoreError;
use crate::models::TaskStatus;
use crate::types::{DbId, DueDate};

/// Ordered `(key, value)` pairs for a request query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value`, skipping values that render as blank.
    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        let rendered = value.to_string();
        if !rendered.trim().is_empty() {
            self.0.push((key, rendered));
        }
        self
    }

    /// Append `key=value` when `value` is present.
    pub fn push_opt<V: Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Server-side filter for the task list (`GET /tasks/`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub due_date: Option<DueDate>,
    pub user_id: Option<DbId>,
}

impl TaskFilter {
    /// Build a filter from raw control values, where an empty string means
    /// "no filter" for that key.
    pub fn from_raw(status: &str, due_date: &str, user_id: &str) -> Result<Self, CoreError> {
        let status = non_blank(status)
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        let due_date = non_blank(due_date)
            .map(|raw| {
                raw.parse::<DueDate>().map_err(|_| CoreError::UnknownValue {
                    field: "due_date",
                    value: raw.to_string(),
                })
            })
            .transpose()?;
        let user_id = non_blank(user_id)
            .map(|raw| {
                raw.parse::<DbId>().map_err(|_| CoreError::UnknownValue {
                    field: "user_id",
                    value: raw.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            status,
            due_date,
            user_id,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.due_date.is_none() && self.user_id.is_none()
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("status", self.status)
            .push_opt("due_date", self.due_date)
            .push_opt("user_id", self.user_id);
        params
    }
}

/// Filter for the user list (`GET /users/?all=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserListFilter {
    /// Ask the backend for inactive users as well as active ones.
    pub include_inactive: bool,
}

impl UserListFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("all", self.include_inactive);
        params
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_filter_produces_no_params() {
        assert!(TaskFilter::default().to_query().is_empty());
    }

    #[test]
    fn only_present_keys_are_encoded() {
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            due_date: None,
            user_id: Some(10),
        };
        assert_eq!(
            filter.to_query().pairs(),
            &[("status", "in_progress".to_string()), ("user_id", "10".to_string())]
        );
    }

    #[test]
    fn blank_raw_values_mean_no_filter() {
        let filter = TaskFilter::from_raw("", "  ", "").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn raw_values_are_parsed() {
        let filter = TaskFilter::from_raw("completed", "2026-12-01", "7").unwrap();
        assert_eq!(filter.status, Some(TaskStatus::Completed));
        assert_eq!(filter.due_date, DueDate::from_ymd_opt(2026, 12, 1));
        assert_eq!(filter.user_id, Some(7));
        assert_eq!(
            filter.to_query().pairs()[1],
            ("due_date", "2026-12-01".to_string())
        );
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        assert_matches!(
            TaskFilter::from_raw("", "", "abc"),
            Err(CoreError::UnknownValue { field: "user_id", .. })
        );
    }

    #[test]
    fn push_skips_blank_strings() {
        let mut params = QueryParams::new();
        params.push("task", "").push("task_id", 4);
        assert_eq!(params.pairs(), &[("task_id", "4".to_string())]);
    }

    #[test]
    fn user_filter_always_sends_all_flag() {
        assert_eq!(
            UserListFilter::default().to_query().pairs(),
            &[("all", "false".to_string())]
        );
        assert_eq!(
            UserListFilter { include_inactive: true }.to_query().pairs(),
            &[("all", "true".to_string())]
        );
    }
}
