use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use taskdesk_client::{ApiClient, ClientConfig};
use taskdesk_core::filter::TaskFilter;
use taskdesk_core::input::LoginInput;
use taskdesk_core::types::DbId;
use taskdesk_sync::views::{
    AuthFlow, MyTasksView, ProjectTasksView, ProjectsView, Services, TaskDetailsView, UsersView,
};
use taskdesk_sync::{LoadOutcome, Notification, NotificationBus, SyncError};
use tokio::sync::{broadcast, Mutex};

use crate::render;

/// One CLI invocation: the wired services plus a notification listener.
pub struct App {
    services: Services,
    config: ClientConfig,
    notices: Mutex<broadcast::Receiver<Notification>>,
}

impl App {
    pub fn new(api: ApiClient, config: ClientConfig) -> Self {
        let bus = Arc::new(NotificationBus::default());
        let notices = Mutex::new(bus.subscribe());
        Self {
            services: Services::http(api, bus),
            config,
            notices,
        }
    }

    pub async fn login(
        &self,
        username: Option<String>,
        password: Option<String>,
    ) -> anyhow::Result<()> {
        let input = LoginInput {
            username: username
                .or_else(|| self.config.username.clone())
                .context("--username or TASKDESK_USERNAME is required")?,
            password: password
                .or_else(|| self.config.password.clone())
                .context("--password or TASKDESK_PASSWORD is required")?,
        };
        let identity = AuthFlow::new(&self.services)
            .login(&input)
            .await
            .map_err(|e| self.fail(e));
        self.flush_notices().await;
        let identity = identity?;

        match identity {
            Some(identity) => println!(
                "Signed in as {}{}",
                identity.username,
                if identity.is_admin { " (admin)" } else { "" }
            ),
            None => println!("Signed in as {}", input.username),
        }
        if let Some(token) = self.services.auth.session().access_token() {
            println!("export TASKDESK_ACCESS_TOKEN={token}");
        }
        Ok(())
    }

    pub async fn profile(&self) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let user = AuthFlow::new(&self.services)
            .profile()
            .await
            .map_err(|e| self.fail(e))?;
        render::users(&[user]);
        Ok(())
    }

    pub async fn projects(&self, search: Option<String>) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let view = ProjectsView::new(self.services.clone());
        self.check(view.load().await).await?;
        if let Some(search) = search {
            view.set_text_filter(search).await;
        }
        render::projects(&view.visible_rows().await);
        Ok(())
    }

    pub async fn project_tasks(
        &self,
        project_id: DbId,
        search: Option<String>,
    ) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let mut view = ProjectTasksView::new(self.services.clone(), project_id);
        if let Err(e) = view.load_project().await {
            tracing::warn!(project_id, error = %e, "Project name unavailable");
        }
        self.check(view.load().await).await?;
        if let Some(search) = search {
            view.set_text_filter(search).await;
        }

        println!(
            "Project: {}",
            view.project_name().unwrap_or(taskdesk_core::models::NOT_AVAILABLE)
        );
        render::tasks(&view.visible_rows().await);
        Ok(())
    }

    pub async fn my_tasks(
        &self,
        status: &str,
        due_date: &str,
        user_id: &str,
        search: Option<String>,
    ) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let filter = TaskFilter::from_raw(status, due_date, user_id)?;
        let mut view = MyTasksView::new(self.services.clone());
        self.check(view.apply_filter(filter).await).await?;
        if let Some(search) = search {
            view.set_text_filter(search).await;
        }

        render::task_rows(&view.visible_rows().await);
        render::facets(&view.facets().await);
        Ok(())
    }

    pub async fn comments(&self, task_id: DbId) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let mut view = TaskDetailsView::new(self.services.clone(), task_id);
        let outcome = view.open().await.map_err(|e| self.fail(e))?;
        self.check(outcome).await?;

        if let Some(task) = view.task() {
            render::task_detail(task);
        }
        let comments = view.comments().rows().await;
        let own: Vec<bool> = comments.iter().map(|c| view.can_modify(c)).collect();
        render::comments(&comments, &own);
        Ok(())
    }

    pub async fn users(&self, inactive: bool, search: Option<String>) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let mut view = UsersView::new(self.services.clone());
        self.check(view.set_show_active(!inactive).await).await?;
        if let Some(search) = search {
            view.set_text_filter(search).await;
        }
        render::users(&view.visible_rows().await);
        Ok(())
    }

    pub async fn set_active(&self, user_id: DbId, active: bool) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let view = UsersView::new(self.services.clone());
        let result = if active {
            view.activate(user_id).await
        } else {
            view.deactivate(user_id).await
        };
        self.flush_notices().await;
        result.map_err(|e| self.fail(e))?;
        Ok(())
    }

    pub async fn delete_task(&self, id: DbId) -> anyhow::Result<()> {
        self.ensure_signed_in().await?;
        let view = MyTasksView::new(self.services.clone());
        let result = view.delete(id).await;
        self.flush_notices().await;
        result.map_err(|e| self.fail(e))?;
        Ok(())
    }

    // ---- private helpers ----

    /// Sign in with configured credentials when no token was supplied.
    async fn ensure_signed_in(&self) -> anyhow::Result<()> {
        if self.services.auth.session().is_authenticated() {
            return Ok(());
        }
        let (Some(username), Some(password)) = (&self.config.username, &self.config.password)
        else {
            bail!("Not signed in. Run `taskdesk login` or set TASKDESK_ACCESS_TOKEN.");
        };
        let input = LoginInput {
            username: username.clone(),
            password: password.clone(),
        };
        let result = AuthFlow::new(&self.services).login(&input).await;
        self.flush_notices().await;
        result.map_err(|e| self.fail(e))?;
        Ok(())
    }

    async fn check(&self, outcome: LoadOutcome) -> anyhow::Result<()> {
        self.flush_notices().await;
        match outcome {
            LoadOutcome::Applied { .. } | LoadOutcome::Superseded => Ok(()),
            LoadOutcome::Failed { message } => Err(anyhow!(message)),
        }
    }

    fn fail(&self, e: SyncError) -> anyhow::Error {
        tracing::debug!(error = ?e, "Command failed");
        if e.is_unauthorized() {
            return anyhow!("Session expired. Run `taskdesk login` again.");
        }
        anyhow!(e.notification_text())
    }

    /// Print pending notifications to stderr.
    async fn flush_notices(&self) {
        let mut notices = self.notices.lock().await;
        while let Ok(notice) = notices.try_recv() {
            render::notification(&notice);
        }
    }
}
