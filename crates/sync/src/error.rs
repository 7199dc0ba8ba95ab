use taskdesk_client::error::GENERIC_FAILURE;
use taskdesk_client::ApiError;
use taskdesk_core::error::CoreError;

use crate::join::JoinError;

/// Errors surfaced by page controllers.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure replaced by a fixed user-facing message.
    #[error("{message}")]
    Context {
        message: &'static str,
        #[source]
        source: Box<SyncError>,
    },
}

impl SyncError {
    /// Replace the user-facing text of this error with `message`.
    pub fn context(self, message: &'static str) -> Self {
        SyncError::Context {
            message,
            source: Box::new(self),
        }
    }

    /// Text for the notification reporting this failure.
    pub fn notification_text(&self) -> String {
        match self {
            SyncError::Api(e) => e.user_message(),
            SyncError::Join(_) => GENERIC_FAILURE.to_string(),
            SyncError::Core(e) => e.user_message(),
            SyncError::Context { message, .. } => (*message).to_string(),
        }
    }

    /// Whether the backend rejected the session, forcing a new login.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SyncError::Api(ApiError::Unauthorized(_)) => true,
            SyncError::Context { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }
}
