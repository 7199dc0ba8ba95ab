//! Task details: the task itself plus its comment thread.
//!
//! Comments may only be edited or deleted by their author; the check runs
//! against the profile of the signed-in user before any request is made.

use std::future::Future;

use taskdesk_core::input::CommentInput;
use taskdesk_core::models::{Comment, Task, User};
use taskdesk_core::types::DbId;

use crate::controller::{LoadOutcome, ViewController};
use crate::error::SyncError;
use crate::form::{FormSession, Submission};
use crate::views::{deleted_message, Services, OWN_COMMENTS_ONLY};

pub struct TaskDetailsView {
    services: Services,
    task_id: DbId,
    task: Option<Task>,
    current_user: Option<User>,
    comments: ViewController<Comment>,
    form: FormSession<CommentInput>,
}

impl TaskDetailsView {
    pub fn new(services: Services, task_id: DbId) -> Self {
        let comments = ViewController::new("task_comments", services.notifications.clone());
        let mut form = FormSession::new(CommentInput::for_task(task_id));
        form.open_create();
        Self {
            services,
            task_id,
            task: None,
            current_user: None,
            comments,
            form,
        }
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn comments(&self) -> &ViewController<Comment> {
        &self.comments
    }

    pub fn form(&self) -> &FormSession<CommentInput> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession<CommentInput> {
        &mut self.form
    }

    /// Load the task, the signed-in user and the comments.
    pub async fn open(&mut self) -> Result<LoadOutcome, SyncError> {
        self.task = Some(self.services.tasks.get(self.task_id).await?);
        self.current_user = Some(self.services.auth.profile().await?);
        Ok(self.load_comments().await)
    }

    pub async fn load_comments(&self) -> LoadOutcome {
        self.comments.load(self.fetch()).await
    }

    /// Whether the signed-in user may edit or delete `comment`.
    pub fn can_modify(&self, comment: &Comment) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| comment.is_authored_by(user))
    }

    /// Switch the comment box to editing `comment`.
    pub fn start_edit(&mut self, comment: &Comment) -> Result<(), SyncError> {
        if !self.can_modify(comment) {
            return Err(self.services.refuse(OWN_COMMENTS_ONLY));
        }
        self.form
            .open_edit(comment.id, CommentInput::from_comment(comment));
        Ok(())
    }

    /// Leave edit mode; the comment box returns to adding a new comment.
    pub fn cancel_edit(&mut self) {
        self.form.open_create();
    }

    pub async fn submit(&mut self) -> Result<Comment, SyncError> {
        let submission = self.form.submit()?;
        let comments = &self.services.comments;

        let saved = match submission {
            Submission::Create(payload) => {
                self.comments
                    .mutate(
                        async { comments.create(&payload).await.map_err(SyncError::from) },
                        |_| "Comment added.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
            Submission::Update(id, payload) => {
                self.comments
                    .mutate(
                        async { comments.update(id, &payload).await.map_err(SyncError::from) },
                        |_| "Comment updated.".to_string(),
                        self.fetch(),
                    )
                    .await?
            }
        };
        self.form.open_create();
        Ok(saved)
    }

    pub async fn delete(&self, comment: &Comment) -> Result<(), SyncError> {
        if !self.can_modify(comment) {
            return Err(self.services.refuse(OWN_COMMENTS_ONLY));
        }

        let comments = &self.services.comments;
        let id = comment.id;
        self.comments
            .mutate(
                async { comments.delete(id).await.map_err(SyncError::from) },
                |response| deleted_message(response, "Comment deleted successfully."),
                self.fetch(),
            )
            .await?;
        Ok(())
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<Comment>, SyncError>> + Send + 'static {
        let comments = self.services.comments.clone();
        let task_id = self.task_id;
        async move {
            comments
                .list_for_task(task_id)
                .await
                .map_err(SyncError::from)
        }
    }
}
