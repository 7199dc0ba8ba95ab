//! Create/edit form state shared by every page.
//!
//! A form is in create mode when `editing_id` is `None` and in edit mode
//! otherwise. Closing or reopening in create mode always clears the id and
//! restores the page's defaults, so no edit state leaks into a new entity.

use taskdesk_core::error::CoreError;
use taskdesk_core::input::{FormInput, FormMode};
use taskdesk_core::types::DbId;
use taskdesk_core::validation::FieldError;

use crate::dialog::{Dialog, DialogOutcome, DialogRequest};

/// A validated form ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<P> {
    Create(P),
    Update(DbId, P),
}

#[derive(Debug, Clone)]
pub struct FormSession<I: FormInput> {
    defaults: I,
    input: I,
    editing_id: Option<DbId>,
    open: bool,
    errors: Vec<FieldError>,
}

impl<I: FormInput> FormSession<I> {
    /// A closed form whose create mode starts from `defaults`.
    pub fn new(defaults: I) -> Self {
        Self {
            input: defaults.clone(),
            defaults,
            editing_id: None,
            open: false,
            errors: Vec::new(),
        }
    }

    /// Replace the create-mode template (e.g. when the hosting page's
    /// project changes).
    pub fn set_defaults(&mut self, defaults: I) {
        self.defaults = defaults;
        if self.editing_id.is_none() && !self.open {
            self.input = self.defaults.clone();
        }
    }

    pub fn open_create(&mut self) {
        self.editing_id = None;
        self.input = self.defaults.clone();
        self.errors.clear();
        self.open = true;
    }

    pub fn open_edit(&mut self, id: DbId, input: I) {
        self.editing_id = Some(id);
        self.input = input;
        self.errors.clear();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.editing_id = None;
        self.input = self.defaults.clone();
        self.errors.clear();
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing_id(&self) -> Option<DbId> {
        self.editing_id
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id {
            Some(_) => FormMode::Edit,
            None => FormMode::Create,
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Field errors from the last [`submit`](Self::submit).
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Validate the current input. Nothing is sent from here; callers issue
    /// the request only for an `Ok` submission.
    pub fn submit(&mut self) -> Result<Submission<I::Payload>, CoreError> {
        let mode = self.mode();
        match self.input.to_payload(mode) {
            Ok(payload) => {
                self.errors.clear();
                Ok(match self.editing_id {
                    Some(id) => Submission::Update(id, payload),
                    None => Submission::Create(payload),
                })
            }
            Err(e) => {
                if let CoreError::Validation(errors) = &e {
                    self.errors = errors.clone();
                }
                Err(e)
            }
        }
    }

    /// Let `dialog` collect the input, then validate it.
    ///
    /// Returns `Ok(None)` when the user cancelled; the form is closed in
    /// that case.
    pub async fn run_dialog<D>(
        &mut self,
        dialog: &D,
        title: impl Into<String>,
    ) -> Result<Option<Submission<I::Payload>>, CoreError>
    where
        D: Dialog<I> + ?Sized,
        I: 'static,
    {
        let request = DialogRequest {
            title: title.into(),
            mode: self.mode(),
            initial: self.input.clone(),
        };
        match dialog.open(request).await {
            DialogOutcome::Submitted(input) => {
                self.input = input;
                self.submit().map(Some)
            }
            DialogOutcome::Cancelled => {
                self.close();
                Ok(None)
            }
        }
    }
}
