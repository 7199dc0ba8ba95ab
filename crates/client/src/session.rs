//! Explicit session context shared by every request.
//!
//! [`Session`] owns the access/refresh token pair and the callback fired
//! when the backend rejects the access token. It is created once, wrapped
//! in an `Arc`, and handed to [`ApiClient`](crate::api::ApiClient) at
//! construction.

use std::sync::{Arc, PoisonError, RwLock};

use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use taskdesk_core::models::User;
use taskdesk_core::types::DbId;

/// Token pair returned by `/auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// The signed-in user as described by the access token's claims.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub user_id: DbId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Identity {
    pub fn to_user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
            is_active: true,
        }
    }
}

/// Callback invoked after the session is cleared because the access token
/// was rejected.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Session state for one signed-in client.
#[derive(Default)]
pub struct Session {
    tokens: RwLock<Option<TokenPair>>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session resuming from a previously issued access token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_tokens(TokenPair {
            access: token.into(),
            refresh: None,
        });
        session
    }

    /// Register the callback fired when the backend reports the token as
    /// invalid (typically: navigate to the login screen).
    pub fn on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn set_tokens(&self, tokens: TokenPair) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(|t| t.access.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(|t| t.refresh.clone()).flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    /// Forget both tokens.
    pub fn clear(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Decode the identity claims of the current access token.
    ///
    /// The signature is not checked: the backend verifies the token on
    /// every request, the client only reads the display claims.
    pub fn identity(&self) -> Option<Identity> {
        let token = self.access_token()?;
        decode_identity(&token)
    }

    /// Whether the current token marks the user as an administrator.
    pub fn is_admin(&self) -> bool {
        self.identity().is_some_and(|i| i.is_admin)
    }

    /// Clear the session and notify the unauthorized hook.
    pub(crate) fn expire(&self) {
        self.clear();
        tracing::warn!("Access token rejected, session cleared");
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    fn read<R>(&self, f: impl FnOnce(&TokenPair) -> R) -> Option<R> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }
}

fn decode_identity(token: &str) -> Option<Identity> {
    let header = jsonwebtoken::decode_header(token).ok()?;
    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    match jsonwebtoken::decode::<Identity>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!(error = %e, "Access token claims could not be decoded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use jsonwebtoken::{Algorithm, EncodingKey, Header};

    use super::*;

    fn token(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn identity_reads_claims_without_the_signing_key() {
        let session = Session::with_access_token(token(serde_json::json!({
            "token_type": "access",
            "exp": 1,
            "user_id": 42,
            "username": "ana",
            "email": "ana@example.com",
            "is_admin": true,
        })));

        let identity = session.identity().expect("claims should decode");
        assert_eq!(identity.user_id, 42);
        assert_eq!(identity.username, "ana");
        assert!(identity.is_admin);
        assert!(session.is_admin());
        assert_eq!(identity.to_user().id, 42);
    }

    #[test]
    fn garbage_token_has_no_identity() {
        let session = Session::with_access_token("not-a-jwt");
        assert!(session.is_authenticated());
        assert_eq!(session.identity(), None);
        assert!(!session.is_admin());
    }

    #[test]
    fn expire_clears_tokens_and_fires_hook() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let session = Session::new().on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        session.set_tokens(TokenPair {
            access: "a".into(),
            refresh: Some("r".into()),
        });
        assert_eq!(session.refresh_token().as_deref(), Some("r"));

        session.expire();

        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
