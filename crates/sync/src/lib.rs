//! Client-side state synchronization for the task-management pages.
//!
//! A [`ViewController`](controller::ViewController) owns one page's rendered
//! collection and keeps it authoritative: every successful mutation is
//! followed by a full re-fetch, and responses from superseded fetches are
//! dropped. The page controllers in [`views`] compose it with the REST
//! services, form sessions and the [`NotificationBus`](notify::NotificationBus).

pub mod controller;
pub mod dialog;
pub mod error;
pub mod form;
pub mod join;
pub mod notify;
pub mod views;

pub use controller::{LoadOutcome, ViewController, ViewState};
pub use error::SyncError;
pub use notify::{Notification, NotificationBus, NotificationKind};
