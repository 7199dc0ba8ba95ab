//! User entity and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A user as embedded in backend responses.
///
/// Embedded copies (task assignees, project members) sometimes omit
/// `email` and the flags, so every field but `id` and `username` is
/// defaulted on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for creating (POST) or updating (PATCH) a user.
///
/// `password` is omitted from the body when not being changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
}

/// PATCH body used to activate or deactivate a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivationPatch {
    pub is_active: bool,
}

/// DTO for self-registration via `/auth/register/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Credentials posted to `/auth/login/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
