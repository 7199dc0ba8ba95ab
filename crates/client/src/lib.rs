//! REST client for the task-management backend.
//!
//! [`ApiClient`](api::ApiClient) carries the HTTP plumbing and the explicit
//! [`Session`](session::Session); each resource is exposed through a
//! service trait with an HTTP implementation, so views can be driven by
//! fakes in tests.

pub mod api;
pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod projects;
pub mod session;
pub mod tasks;
pub mod users;

pub use api::{ApiClient, DeleteResponse};
pub use auth::{AuthService, HttpAuth};
pub use comments::{CommentService, HttpComments};
pub use config::ClientConfig;
pub use error::ApiError;
pub use projects::{HttpProjects, ProjectService};
pub use session::{Identity, Session, TokenPair};
pub use tasks::{HttpTasks, TaskService};
pub use users::{HttpUsers, UserService};
