#![allow(dead_code)]

use std::sync::Arc;

use mockito::ServerGuard;
use taskdesk_client::{ApiClient, Session};

/// Access token whose claims are never inspected by the HTTP layer.
pub const TOKEN: &str = "test-access-token";

/// Start a mock backend.
pub async fn mock_backend() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Build a client pointed at `server` with an authenticated session.
pub fn authed_client(server: &ServerGuard) -> ApiClient {
    ApiClient::new(server.url(), Arc::new(Session::with_access_token(TOKEN)))
}

/// Build a client pointed at `server` around the given session.
pub fn client_with(server: &ServerGuard, session: Session) -> ApiClient {
    ApiClient::new(server.url(), Arc::new(session))
}

pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}
