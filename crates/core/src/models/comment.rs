//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::types::{DbId, Timestamp};

/// Author of a comment.
///
/// Some backend versions embed the full user, others only the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentAuthor {
    Embedded(User),
    Username(String),
}

impl CommentAuthor {
    pub fn username(&self) -> &str {
        match self {
            CommentAuthor::Embedded(user) => &user.username,
            CommentAuthor::Username(name) => name,
        }
    }
}

/// A comment on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DbId,
    /// Owning task id; an embedded task object is reduced to its id.
    #[serde(deserialize_with = "crate::models::id_or_embedded")]
    pub task: DbId,
    pub user: CommentAuthor,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Comment {
    /// Whether `user` wrote this comment. Matches by id when the author is
    /// embedded, by username otherwise.
    pub fn is_authored_by(&self, user: &User) -> bool {
        match &self.user {
            CommentAuthor::Embedded(author) => author.id == user.id,
            CommentAuthor::Username(name) => *name == user.username,
        }
    }
}

/// DTO for creating (POST) or replacing (PUT) a comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentPayload {
    pub text: String,
    pub task: DbId,
}

/// Response of `/comments/count/?task_id=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommentCount {
    pub comment_count: u64,
}
