//! Transient user notifications backed by a `tokio::sync::broadcast` channel.
//!
//! Page controllers publish a [`Notification`] for every mutation outcome
//! and every failed fetch; whatever renders the UI subscribes and shows
//! them as toasts.

use serde::Serialize;
use tokio::sync::broadcast;

/// Action label offered on failed fetches.
pub const RETRY: &str = "Retry";

/// Action label offered on every other notification.
pub const CLOSE: &str = "Close";

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown to the user for a short while.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Label of the single action button.
    pub action: &'static str,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            action: CLOSE,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            action: CLOSE,
        }
    }

    /// A failure the user can recover from by fetching again.
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            action: RETRY,
            ..Self::error(message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 64;

/// Fan-out channel for [`Notification`]s, shared via `Arc<NotificationBus>`.
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity. Slow receivers lose
    /// the oldest notifications and observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped when nobody listens.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            kind = ?notification.kind,
            message = %notification.message,
            "Notification"
        );
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
