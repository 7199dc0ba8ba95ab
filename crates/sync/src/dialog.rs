//! Seam for modal dialogs.
//!
//! A page asks a [`Dialog`] to collect a form input and awaits the user's
//! decision. Terminal front-ends prompt on stdin; tests script the answer.

use async_trait::async_trait;
use taskdesk_core::input::FormMode;

/// What the dialog is asked to show.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogRequest<I> {
    pub title: String,
    pub mode: FormMode,
    /// Values the controls start with.
    pub initial: I,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome<I> {
    Submitted(I),
    Cancelled,
}

#[async_trait]
pub trait Dialog<I: Send + 'static>: Send + Sync {
    async fn open(&self, request: DialogRequest<I>) -> DialogOutcome<I>;
}

/// A dialog that answers every request with a fixed outcome.
#[derive(Debug, Clone)]
pub struct ScriptedDialog<I> {
    outcome: DialogOutcome<I>,
}

impl<I> ScriptedDialog<I> {
    pub fn submitting(input: I) -> Self {
        Self {
            outcome: DialogOutcome::Submitted(input),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcome: DialogOutcome::Cancelled,
        }
    }
}

#[async_trait]
impl<I: Clone + Send + Sync + 'static> Dialog<I> for ScriptedDialog<I> {
    async fn open(&self, request: DialogRequest<I>) -> DialogOutcome<I> {
        tracing::debug!(title = %request.title, mode = ?request.mode, "Dialog opened");
        self.outcome.clone()
    }
}
