//! Sign-in, registration and sign-out.

use std::sync::Arc;

use taskdesk_client::{AuthService, Identity};
use taskdesk_core::input::{FormInput, FormMode, LoginInput, RegisterInput};
use taskdesk_core::models::User;

use crate::error::SyncError;
use crate::notify::{Notification, NotificationBus};
use crate::views::{Services, LOGIN_FAILED, REGISTER_FAILED, REGISTER_SUCCEEDED};

pub struct AuthFlow {
    auth: Arc<dyn AuthService>,
    notifications: Arc<NotificationBus>,
}

impl AuthFlow {
    pub fn new(services: &Services) -> Self {
        Self {
            auth: services.auth.clone(),
            notifications: services.notifications.clone(),
        }
    }

    /// Sign in and return the identity carried by the new access token.
    ///
    /// Invalid input is rejected without a request. Any backend failure is
    /// reported with a single fixed message.
    pub async fn login(&self, input: &LoginInput) -> Result<Option<Identity>, SyncError> {
        let credentials = input.to_payload(FormMode::Create)?;
        match self.auth.login(&credentials).await {
            Ok(_) => {
                tracing::info!(username = %credentials.username, "Login succeeded");
                Ok(self.auth.session().identity())
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                self.notifications.publish(Notification::error(LOGIN_FAILED));
                Err(SyncError::from(e).context(LOGIN_FAILED))
            }
        }
    }

    pub async fn register(&self, input: &RegisterInput) -> Result<User, SyncError> {
        let payload = input.to_payload(FormMode::Create)?;
        match self.auth.register(&payload).await {
            Ok(user) => {
                self.notifications.publish(Notification::success(REGISTER_SUCCEEDED));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(username = %payload.username, error = %e, "Registration failed");
                self.notifications.publish(Notification::error(REGISTER_FAILED));
                Err(SyncError::from(e).context(REGISTER_FAILED))
            }
        }
    }

    /// The signed-in user as the backend reports it.
    pub async fn profile(&self) -> Result<User, SyncError> {
        Ok(self.auth.profile().await?)
    }

    /// Sign out. The local session is cleared even if the backend call fails.
    pub async fn logout(&self) -> Result<(), SyncError> {
        if let Err(e) = self.auth.logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        Ok(())
    }
}
