/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local development backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API including the `/api` prefix
    /// (default: `http://localhost:8000/api`).
    pub api_url: String,
    /// Previously issued access token to resume a session with.
    pub access_token: Option<String>,
    /// Credentials used to sign in when no token is supplied.
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Default REST base URL for a local backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `TASKDESK_API_URL`      | `http://localhost:8000/api` |
    /// | `TASKDESK_ACCESS_TOKEN` | unset                       |
    /// | `TASKDESK_USERNAME`     | unset                       |
    /// | `TASKDESK_PASSWORD`     | unset                       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("TASKDESK_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            access_token: non_empty("TASKDESK_ACCESS_TOKEN"),
            username: non_empty("TASKDESK_USERNAME"),
            password: non_empty("TASKDESK_PASSWORD"),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
