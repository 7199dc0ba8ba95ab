//! Task status and priority vocabularies.
//!
//! The backend has shipped two status vocabularies over time:
//! `pending / in_progress / completed` and the older
//! `ToDo / InProgress / Completed / Archive`. [`TaskStatus`] is the single
//! canonical enum; older values are accepted on decode and migrated, and
//! encoding always emits the canonical snake_case form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "ToDo")]
    Pending,
    #[serde(alias = "InProgress")]
    InProgress,
    /// `Archive` tasks are treated as done.
    #[serde(alias = "Completed", alias = "Archive")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Canonical wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "ToDo" => Ok(TaskStatus::Pending),
            "in_progress" | "InProgress" => Ok(TaskStatus::InProgress),
            "completed" | "Completed" | "Archive" => Ok(TaskStatus::Completed),
            other => Err(CoreError::UnknownValue {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Task priority. New tasks default to [`Priority::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(CoreError::UnknownValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}
