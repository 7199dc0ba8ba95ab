//! Wire models for the task-management REST backend.
//!
//! Foreign entities arrive embedded by value; the deserialization helpers
//! below tolerate the shapes older backend versions emit instead (bare ids,
//! `null` lists).

pub mod comment;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use comment::{Comment, CommentAuthor, CommentCount, CommentPayload};
pub use project::{Project, ProjectPayload};
pub use status::{Priority, TaskStatus};
pub use task::{Task, TaskPayload, NOT_AVAILABLE, NO_USERS_ASSIGNED};
pub use user::{ActivationPatch, Credentials, RegisterPayload, User, UserPayload};

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::DbId;

/// Decode an embedded object, treating a bare id or `null` as absent.
pub(crate) fn embedded_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Comma-joined usernames, or `None` for an empty list.
pub(crate) fn usernames(users: &[user::User]) -> Option<String> {
    if users.is_empty() {
        return None;
    }
    Some(
        users
            .iter()
            .map(|u| u.username.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Decode a list where `null` means empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode either a bare id or an embedded object carrying an `id`.
pub(crate) fn id_or_embedded<'de, D>(deserializer: D) -> Result<DbId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Object(map) => map.get("id").and_then(Value::as_i64),
        other => other.as_i64(),
    };
    id.ok_or_else(|| D::Error::custom(format!("expected an id, got {value}")))
}
