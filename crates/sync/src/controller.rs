//! Per-page view state and the authoritative-refresh protocol.
//!
//! ```text
//! Idle -> Loading -> Ready -> Mutating -> Loading -> Ready
//!            \                   \
//!             -> Error(retry)     -> previous state (failed mutation, rows untouched)
//! ```
//!
//! Each fetch takes a ticket from a generation counter. When the fetch
//! resolves, its result is applied only if no newer fetch started in the
//! meantime; otherwise it is dropped.
//!
//! The reported state is derived from what is outstanding: `Mutating` while
//! any mutation runs, then `Loading` while the latest fetch runs, then the
//! outcome of the last applied fetch.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use taskdesk_core::text_match::{filter_rows, TextMatch};
use tokio::sync::RwLock;

use crate::error::SyncError;
use crate::notify::{Notification, NotificationBus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready,
    Mutating,
    /// The last fetch failed; the previous rows are still rendered.
    Error { message: String },
}

/// What happened to a fetch started by [`ViewController::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetch result replaced the rendered rows.
    Applied { rows: usize },
    /// A newer fetch started before this one resolved; its result was dropped.
    Superseded,
    /// The fetch failed; rows are unchanged and the view is in `Error`.
    Failed { message: String },
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }
}

struct Inner<R> {
    state: ViewState,
    rows: Vec<R>,
    text_filter: String,
    mutations: usize,
    fetching: bool,
    loaded: bool,
    fetch_error: Option<String>,
}

impl<R> Inner<R> {
    fn settle(&mut self) {
        self.state = if self.mutations > 0 {
            ViewState::Mutating
        } else if self.fetching {
            ViewState::Loading
        } else if let Some(message) = &self.fetch_error {
            ViewState::Error {
                message: message.clone(),
            }
        } else if self.loaded {
            ViewState::Ready
        } else {
            ViewState::Idle
        };
    }
}

/// Owner of one page's rendered collection.
pub struct ViewController<R> {
    name: &'static str,
    inner: RwLock<Inner<R>>,
    generation: AtomicU64,
    notifications: Arc<NotificationBus>,
}

impl<R: Clone + Send + Sync> ViewController<R> {
    /// `name` identifies the page in logs.
    pub fn new(name: &'static str, notifications: Arc<NotificationBus>) -> Self {
        Self {
            name,
            inner: RwLock::new(Inner {
                state: ViewState::Idle,
                rows: Vec::new(),
                text_filter: String::new(),
                mutations: 0,
                fetching: false,
                loaded: false,
                fetch_error: None,
            }),
            generation: AtomicU64::new(0),
            notifications,
        }
    }

    pub fn notifications(&self) -> &Arc<NotificationBus> {
        &self.notifications
    }

    pub async fn state(&self) -> ViewState {
        self.inner.read().await.state.clone()
    }

    /// The full rendered collection, ignoring the text filter.
    pub async fn rows(&self) -> Vec<R> {
        self.inner.read().await.rows.clone()
    }

    pub async fn text_filter(&self) -> String {
        self.inner.read().await.text_filter.clone()
    }

    /// Narrow the visible rows without fetching.
    pub async fn set_text_filter(&self, raw: impl Into<String>) {
        self.inner.write().await.text_filter = raw.into();
    }

    /// Run `fetch` and, if it is still the latest fetch when it resolves,
    /// make its result the rendered collection.
    ///
    /// A failure keeps the previous rows, moves to [`ViewState::Error`] and
    /// publishes a notification offering a retry. While a mutation is in
    /// flight the view keeps reporting [`ViewState::Mutating`].
    pub async fn load<F>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<Vec<R>, SyncError>>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut inner = self.inner.write().await;
            inner.fetching = true;
            inner.settle();
        }

        let result = fetch.await;

        let mut inner = self.inner.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(view = self.name, ticket, "Dropping superseded fetch result");
            return LoadOutcome::Superseded;
        }

        inner.fetching = false;
        match result {
            Ok(rows) => {
                let count = rows.len();
                inner.rows = rows;
                inner.loaded = true;
                inner.fetch_error = None;
                inner.settle();
                tracing::debug!(view = self.name, rows = count, "Fetch applied");
                LoadOutcome::Applied { rows: count }
            }
            Err(e) => {
                let message = e.notification_text();
                tracing::warn!(view = self.name, error = %e, "Fetch failed");
                inner.fetch_error = Some(message.clone());
                inner.settle();
                drop(inner);
                self.notifications.publish(Notification::retryable(message.clone()));
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Run a mutation, then re-fetch the whole collection with `reload`.
    ///
    /// On success the text produced by `describe` is published and the
    /// rendered rows become exactly the re-fetch result. On failure the
    /// server's message is published and the rows are left as they were. The
    /// view falls back to whatever else is outstanding, so a pending fetch
    /// still reads `Loading` and a failed fetch still reads `Error`.
    pub async fn mutate<T, M, D, L>(
        &self,
        operation: M,
        describe: D,
        reload: L,
    ) -> Result<T, SyncError>
    where
        M: Future<Output = Result<T, SyncError>>,
        D: FnOnce(&T) -> String,
        L: Future<Output = Result<Vec<R>, SyncError>>,
    {
        {
            let mut inner = self.inner.write().await;
            inner.mutations += 1;
            inner.settle();
        }

        let result = operation.await;
        {
            let mut inner = self.inner.write().await;
            inner.mutations -= 1;
            inner.settle();
        }

        match result {
            Ok(value) => {
                tracing::info!(view = self.name, "Mutation succeeded");
                self.notifications.publish(Notification::success(describe(&value)));
                self.load(reload).await;
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(view = self.name, error = %e, "Mutation failed");
                self.notifications.publish(Notification::error(e.notification_text()));
                Err(e)
            }
        }
    }
}

impl<R: Clone + Send + Sync + TextMatch> ViewController<R> {
    /// Rendered rows narrowed by the current text filter.
    pub async fn visible_rows(&self) -> Vec<R> {
        let inner = self.inner.read().await;
        filter_rows(&inner.rows, &inner.text_filter)
            .into_iter()
            .cloned()
            .collect()
    }
}
