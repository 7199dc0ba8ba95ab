//! `taskdesk`: terminal front-end for the task-management backend.
//!
//! ```bash
//! taskdesk login --username ana --password secret1
//! taskdesk my-tasks --status pending --search release
//! taskdesk users --inactive
//! ```

mod commands;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use taskdesk_client::{ApiClient, ClientConfig, Session};
use taskdesk_core::types::DbId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "taskdesk")]
#[command(about = "Manage projects, tasks, comments and users", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// REST base URL (overrides TASKDESK_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Access token (overrides TASKDESK_ACCESS_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and print the issued access token
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show the signed-in user
    Profile,

    /// List projects
    Projects {
        /// Case-insensitive text filter over name and description
        #[arg(long)]
        search: Option<String>,
    },

    /// List the tasks of one project
    Tasks {
        #[arg(long, value_name = "ID")]
        project: DbId,
        #[arg(long)]
        search: Option<String>,
    },

    /// List tasks visible to you, with comment counts
    MyTasks {
        /// pending, in_progress or completed
        #[arg(long, default_value = "")]
        status: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        due_date: String,
        #[arg(long, default_value = "")]
        user_id: String,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a task and its comments
    Comments {
        #[arg(long, value_name = "ID")]
        task: DbId,
    },

    /// List users
    Users {
        /// List inactive users instead of active ones
        #[arg(long)]
        inactive: bool,
        #[arg(long)]
        search: Option<String>,
    },

    /// Reactivate a user
    Activate {
        #[arg(long, value_name = "ID")]
        user: DbId,
    },

    /// Deactivate a user
    Deactivate {
        #[arg(long, value_name = "ID")]
        user: DbId,
    },

    /// Delete a task
    DeleteTask {
        #[arg(long, value_name = "ID")]
        id: DbId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskdesk=info,taskdesk_client=info,taskdesk_sync=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(token) = cli.token {
        config.access_token = Some(token);
    }
    tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

    // --- Session ---
    let session = match &config.access_token {
        Some(token) => Session::with_access_token(token.clone()),
        None => Session::new(),
    }
    .on_unauthorized(|| {
        tracing::warn!("Session expired; run `taskdesk login` again");
    });
    let api = ApiClient::from_config(&config, Arc::new(session));
    let app = commands::App::new(api, config);

    match cli.command {
        Command::Login { username, password } => app.login(username, password).await,
        Command::Profile => app.profile().await,
        Command::Projects { search } => app.projects(search).await,
        Command::Tasks { project, search } => app.project_tasks(project, search).await,
        Command::MyTasks {
            status,
            due_date,
            user_id,
            search,
        } => app.my_tasks(&status, &due_date, &user_id, search).await,
        Command::Comments { task } => app.comments(task).await,
        Command::Users { inactive, search } => app.users(inactive, search).await,
        Command::Activate { user } => app.set_active(user, true).await,
        Command::Deactivate { user } => app.set_active(user, false).await,
        Command::DeleteTask { id } => app.delete_task(id).await,
    }
}
