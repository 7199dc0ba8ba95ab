use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<FieldError>),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unknown {field} value: {value}")]
    UnknownValue { field: &'static str, value: String },
}

impl CoreError {
    /// Text suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(errors) => describe(errors),
            CoreError::Forbidden(msg) => msg.clone(),
            CoreError::UnknownValue { .. } => self.to_string(),
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
