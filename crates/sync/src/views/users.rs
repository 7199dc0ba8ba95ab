//! User administration: active/inactive toggle, create/edit, activation.

use std::future::Future;

use taskdesk_core::filter::UserListFilter;
use taskdesk_core::input::UserInput;
use taskdesk_core::models::User;
use taskdesk_core::types::DbId;

use crate::controller::{LoadOutcome, ViewController};
use crate::error::SyncError;
use crate::form::{FormSession, Submission};
use crate::views::Services;

pub struct UsersView {
    services: Services,
    controller: ViewController<User>,
    form: FormSession<UserInput>,
    show_active: bool,
}

impl UsersView {
    pub fn new(services: Services) -> Self {
        let controller = ViewController::new("users", services.notifications.clone());
        Self {
            services,
            controller,
            form: FormSession::new(UserInput::default()),
            show_active: true,
        }
    }

    pub fn controller(&self) -> &ViewController<User> {
        &self.controller
    }

    pub fn form(&self) -> &FormSession<UserInput> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormSession<UserInput> {
        &mut self.form
    }

    /// `true` when the page lists active users, `false` for inactive ones.
    pub fn show_active(&self) -> bool {
        self.show_active
    }

    pub async fn load(&self) -> LoadOutcome {
        self.controller.load(self.fetch()).await
    }

    /// Switch between active and inactive users and fetch again.
    pub async fn set_show_active(&mut self, active: bool) -> LoadOutcome {
        self.show_active = active;
        self.load().await
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, user: &User) {
        self.form.open_edit(user.id, UserInput::from_user(user));
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub async fn submit(&mut self) -> Result<User, SyncError> {
        let submission = self.form.submit()?;
        let users = &self.services.users;

        let saved = match submission {
            Submission::Create(payload) => {
                self.controller
                    .mutate(
                        async { users.create(&payload).await.map_err(SyncError::from) },
                        |user| format!("User {} created.", user.username),
                        self.fetch(),
                    )
                    .await?
            }
            Submission::Update(id, payload) => {
                self.controller
                    .mutate(
                        async { users.update(id, &payload).await.map_err(SyncError::from) },
                        |user| format!("User {} updated.", user.username),
                        self.fetch(),
                    )
                    .await?
            }
        };
        self.form.close();
        Ok(saved)
    }

    pub async fn activate(&self, id: DbId) -> Result<User, SyncError> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: DbId) -> Result<User, SyncError> {
        self.set_active(id, false).await
    }

    pub async fn set_text_filter(&self, raw: impl Into<String>) {
        self.controller.set_text_filter(raw).await;
    }

    pub async fn visible_rows(&self) -> Vec<User> {
        self.controller.visible_rows().await
    }

    async fn set_active(&self, id: DbId, active: bool) -> Result<User, SyncError> {
        let users = &self.services.users;
        self.controller
            .mutate(
                async { users.set_active(id, active).await.map_err(SyncError::from) },
                |user| {
                    let verb = if user.is_active { "activated" } else { "deactivated" };
                    format!("User {} {verb}.", user.username)
                },
                self.fetch(),
            )
            .await
    }

    /// Fetch with `all=` following the toggle, then keep only users whose
    /// activity matches it.
    fn fetch(&self) -> impl Future<Output = Result<Vec<User>, SyncError>> + Send + 'static {
        let users = self.services.users.clone();
        let show_active = self.show_active;
        async move {
            let filter = UserListFilter {
                include_inactive: !show_active,
            };
            let listed = users.list(filter).await.map_err(SyncError::from)?;
            Ok::<Vec<User>, SyncError>(
                listed
                    .into_iter()
                    .filter(|u| u.is_active == show_active)
                    .collect(),
            )
        }
    }
}
