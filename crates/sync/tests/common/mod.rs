#![allow(dead_code)]

//! In-memory fakes of the REST services.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;
use taskdesk_client::{
    ApiError, AuthService, CommentService, DeleteResponse, ProjectService, Session, TaskService,
    TokenPair, UserService,
};
use taskdesk_core::filter::{TaskFilter, UserListFilter};
use taskdesk_core::models::{
    Comment, CommentPayload, Credentials, Project, ProjectPayload, RegisterPayload, Task,
    TaskPayload, User, UserPayload,
};
use taskdesk_core::types::DbId;
use taskdesk_sync::views::Services;
use taskdesk_sync::NotificationBus;

pub fn user(id: DbId, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        is_admin: false,
        is_active: true,
    }
}

pub fn task(id: DbId, status: &str, assignees: &[(DbId, &str)]) -> Task {
    let assigned: Vec<_> = assignees
        .iter()
        .map(|(id, name)| json!({"id": id, "username": name}))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": format!("Description of task {id}"),
        "due_date": "2026-11-01",
        "priority": "medium",
        "status": status,
        "project": {"id": 1, "name": "Apollo"},
        "assigned_to": assigned,
    }))
    .unwrap()
}

pub fn project(id: DbId, name: &str) -> Project {
    serde_json::from_value(json!({"id": id, "name": name, "description": "d"})).unwrap()
}

pub fn comment(id: DbId, task: DbId, author: &str, text: &str) -> Comment {
    serde_json::from_value(json!({"id": id, "task": task, "user": author, "text": text})).unwrap()
}

pub fn forbidden() -> ApiError {
    ApiError::from_status(403, r#"{"error":"Forbidden"}"#.to_string())
}

pub fn server_error() -> ApiError {
    ApiError::from_status(500, "Internal Server Error".to_string())
}

/// Access token carrying identity claims for `user`.
pub fn token_for(user: &User) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({
            "user_id": user.id,
            "username": user.username,
            "email": user.email,
            "is_admin": user.is_admin,
        }),
        &EncodingKey::from_secret(b"fake"),
    )
    .unwrap()
}

fn not_found() -> ApiError {
    ApiError::from_status(404, r#"{"detail":"Not found."}"#.to_string())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeTasks {
    pub rows: Mutex<Vec<Task>>,
    pub list_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub filters: Mutex<Vec<TaskFilter>>,
    pub fail_list: Mutex<bool>,
    pub refuse_delete: Mutex<bool>,
}

impl FakeTasks {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskService for FakeTasks {
    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(filter.clone());
        if *self.fail_list.lock().unwrap() {
            return Err(server_error());
        }
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .into_iter()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| {
                filter
                    .user_id
                    .map_or(true, |id| t.assigned_to.iter().any(|u| u.id == id))
            })
            .collect())
    }

    async fn list_by_project(&self, project_id: DbId) -> Result<Vec<Task>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .into_iter()
            .filter(|t| t.project.as_ref().is_some_and(|p| p.id == project_id))
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<Task, ApiError> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|t| t.id == id).cloned().ok_or_else(not_found)
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut created = task(id, payload.status.as_str(), &[]);
        created.title = payload.title.clone();
        created.description = payload.description.clone();
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &TaskPayload) -> Result<Task, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
        row.title = payload.title.clone();
        row.status = payload.status;
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if *self.refuse_delete.lock().unwrap() {
            return Err(forbidden());
        }
        self.rows.lock().unwrap().retain(|t| t.id != id);
        Ok(DeleteResponse {
            message: Some("Task deleted successfully.".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeComments {
    pub rows: Mutex<Vec<Comment>>,
    pub counts: Mutex<HashMap<DbId, u64>>,
    pub failing_counts: Mutex<HashSet<DbId>>,
    pub count_calls: AtomicUsize,
}

impl FakeComments {
    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentService for FakeComments {
    async fn list_for_task(&self, task_id: DbId) -> Result<Vec<Comment>, ApiError> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows.into_iter().filter(|c| c.task == task_id).collect())
    }

    async fn count_for_task(&self, task_id: DbId) -> Result<u64, ApiError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_counts.lock().unwrap().contains(&task_id) {
            return Err(server_error());
        }
        Ok(self.counts.lock().unwrap().get(&task_id).copied().unwrap_or(0))
    }

    async fn get(&self, id: DbId) -> Result<Comment, ApiError> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|c| c.id == id).cloned().ok_or_else(not_found)
    }

    async fn create(&self, payload: &CommentPayload) -> Result<Comment, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = comment(id, payload.task, "me", &payload.text);
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &CommentPayload) -> Result<Comment, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;
        row.text = payload.text.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(DeleteResponse::default())
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeProjects {
    pub rows: Mutex<Vec<Project>>,
    pub list_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl FakeProjects {
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectService for FakeProjects {
    async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get(&self, id: DbId) -> Result<Project, ApiError> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|p| p.id == id).cloned().ok_or_else(not_found)
    }

    async fn create(&self, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let created = project(id, &payload.name);
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &ProjectPayload) -> Result<Project, ApiError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        row.name = payload.name.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> Result<DeleteResponse, ApiError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(DeleteResponse::default())
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeUsers {
    pub rows: Mutex<Vec<User>>,
    pub filters: Mutex<Vec<UserListFilter>>,
}

#[async_trait]
impl UserService for FakeUsers {
    async fn list(&self, filter: UserListFilter) -> Result<Vec<User>, ApiError> {
        self.filters.lock().unwrap().push(filter);
        let rows = self.rows.lock().unwrap().clone();
        Ok(rows
            .into_iter()
            .filter(|u| filter.include_inactive || u.is_active)
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<User, ApiError> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|u| u.id == id).cloned().ok_or_else(not_found)
    }

    async fn create(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let created = User {
            is_admin: payload.is_admin,
            ..user(id, &payload.username)
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: DbId, payload: &UserPayload) -> Result<User, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
        row.username = payload.username.clone();
        row.email = payload.email.clone();
        row.is_admin = payload.is_admin;
        Ok(row.clone())
    }

    async fn set_active(&self, id: DbId, active: bool) -> Result<User, ApiError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
        row.is_active = active;
        Ok(row.clone())
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

pub struct FakeAuth {
    pub session: Session,
    pub profile: User,
    pub password: String,
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        if credentials.username != self.profile.username || credentials.password != self.password {
            return Err(ApiError::from_status(
                401,
                r#"{"detail":"No active account found with the given credentials"}"#.to_string(),
            ));
        }
        let tokens = TokenPair {
            access: token_for(&self.profile),
            refresh: Some("refresh".to_string()),
        };
        self.session.set_tokens(tokens.clone());
        Ok(tokens)
    }

    async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        if payload.username == self.profile.username {
            return Err(ApiError::from_status(
                400,
                r#"{"username":["A user with that username already exists."]}"#.to_string(),
            ));
        }
        Ok(user(99, &payload.username))
    }

    async fn profile(&self) -> Result<User, ApiError> {
        Ok(self.profile.clone())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.session.clear();
        Ok(())
    }

    fn session(&self) -> &Session {
        &self.session
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

pub struct Fixture {
    pub tasks: Arc<FakeTasks>,
    pub comments: Arc<FakeComments>,
    pub projects: Arc<FakeProjects>,
    pub users: Arc<FakeUsers>,
    pub auth: Arc<FakeAuth>,
    pub notifications: Arc<NotificationBus>,
}

impl Fixture {
    /// Fakes with `me` signed in.
    pub fn signed_in_as(me: User) -> Self {
        let session = Session::with_access_token(token_for(&me));
        Self {
            tasks: Arc::default(),
            comments: Arc::default(),
            projects: Arc::default(),
            users: Arc::default(),
            auth: Arc::new(FakeAuth {
                session,
                profile: me,
                password: "secret1".to_string(),
            }),
            notifications: Arc::new(NotificationBus::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            auth: self.auth.clone(),
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
            comments: self.comments.clone(),
            users: self.users.clone(),
            notifications: self.notifications.clone(),
        }
    }
}
