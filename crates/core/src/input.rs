//! Typed form inputs.
//!
//! Each input mirrors what a create/edit form collects. [`FormInput`]
//! validates the input and converts it into the wire payload; an invalid
//! input never yields a payload, so no request can be issued for it.

use chrono::NaiveDate;
use validator::Validate;

use crate::error::CoreError;
use crate::models::{
    Comment, CommentPayload, Credentials, Priority, Project, ProjectPayload, RegisterPayload,
    Task, TaskPayload, TaskStatus, User, UserPayload,
};
use crate::types::DbId;
use crate::validation::{validate, FieldError};

/// Whether a form is creating a new entity or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A form input that can be validated and turned into a request payload.
pub trait FormInput: Validate + Clone + Send + Sync {
    type Payload: serde::Serialize + Send + Sync;

    /// Violations beyond the derived rules, e.g. ones that depend on the
    /// form mode.
    fn extra_errors(&self, _mode: FormMode) -> Vec<FieldError> {
        Vec::new()
    }

    /// All violations for this input in `mode`.
    fn errors(&self, mode: FormMode) -> Vec<FieldError> {
        let mut errors = validate(self);
        errors.extend(self.extra_errors(mode));
        errors
    }

    /// Build the payload. Callers must have checked [`errors`](Self::errors);
    /// a missing required value is reported as a validation error anyway.
    fn build_payload(&self, mode: FormMode) -> Result<Self::Payload, CoreError>;

    /// Validate, then build the payload.
    fn to_payload(&self, mode: FormMode) -> Result<Self::Payload, CoreError> {
        let errors = self.errors(mode);
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }
        self.build_payload(mode)
    }
}

fn missing(field: &str, message: &str) -> CoreError {
    CoreError::Validation(vec![FieldError::new(field, "required", message)])
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub assigned_users: Vec<DbId>,
}

impl ProjectInput {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            assigned_users: project.assigned_users.iter().map(|u| u.id).collect(),
        }
    }
}

impl FormInput for ProjectInput {
    type Payload = ProjectPayload;

    fn build_payload(&self, _mode: FormMode) -> Result<ProjectPayload, CoreError> {
        Ok(ProjectPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            assigned_users: self.assigned_users.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(required(message = "Due date is required"))]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Owning project; pre-filled by the page that hosts the form.
    #[validate(required(message = "Project is required"))]
    pub project: Option<DbId>,
    pub assigned_to: Vec<DbId>,
}

impl TaskInput {
    /// Defaults for a new task inside `project`.
    pub fn for_project(project: DbId) -> Self {
        Self {
            project: Some(project),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
            project: task.project.as_ref().map(|p| p.id),
            assigned_to: task.assigned_to.iter().map(|u| u.id).collect(),
        }
    }
}

impl FormInput for TaskInput {
    type Payload = TaskPayload;

    fn build_payload(&self, _mode: FormMode) -> Result<TaskPayload, CoreError> {
        let due_date = self
            .due_date
            .ok_or_else(|| missing("due_date", "Due date is required"))?;
        let project = self
            .project
            .ok_or_else(|| missing("project", "Project is required"))?;
        Ok(TaskPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date,
            priority: self.priority,
            status: self.status,
            project,
            assigned_to: self.assigned_to.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, message = "Comment text is required"))]
    pub text: String,
    #[validate(required(message = "Task is required"))]
    pub task: Option<DbId>,
}

impl CommentInput {
    pub fn for_task(task: DbId) -> Self {
        Self {
            text: String::new(),
            task: Some(task),
        }
    }

    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
            task: Some(comment.task),
        }
    }
}

impl FormInput for CommentInput {
    type Payload = CommentPayload;

    fn build_payload(&self, _mode: FormMode) -> Result<CommentPayload, CoreError> {
        let task = self.task.ok_or_else(|| missing("task", "Task is required"))?;
        Ok(CommentPayload {
            text: self.text.clone(),
            task,
        })
    }
}

// ---------------------------------------------------------------------------
// User administration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Required when creating; left blank on edit to keep the current one.
    pub password: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub is_admin: bool,
}

impl UserInput {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl FormInput for UserInput {
    type Payload = UserPayload;

    fn extra_errors(&self, mode: FormMode) -> Vec<FieldError> {
        if mode == FormMode::Create && self.password.is_empty() {
            vec![FieldError::new("password", "required", "Password is required")]
        } else {
            Vec::new()
        }
    }

    fn build_payload(&self, _mode: FormMode) -> Result<UserPayload, CoreError> {
        Ok(UserPayload {
            username: self.username.clone(),
            email: self.email.clone(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            is_admin: self.is_admin,
            is_active: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub is_admin: bool,
}

impl FormInput for RegisterInput {
    type Payload = RegisterPayload;

    fn build_payload(&self, _mode: FormMode) -> Result<RegisterPayload, CoreError> {
        Ok(RegisterPayload {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            is_admin: self.is_admin,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl FormInput for LoginInput {
    type Payload = Credentials;

    fn build_payload(&self, _mode: FormMode) -> Result<Credentials, CoreError> {
        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}
