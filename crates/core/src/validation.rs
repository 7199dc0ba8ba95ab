//! Field-level validation of form inputs.
//!
//! Inputs derive [`validator::Validate`]; [`validate`] flattens the result
//! into a stable, ordered list of [`FieldError`]s so a view can render them
//! next to the offending controls without touching the network.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    /// Rule that failed (`required`, `length`, `email`, ...).
    pub rule: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Run the derived rules of `input`, returning violations sorted by field
/// name. An empty list means the input may be submitted.
pub fn validate<T: Validate + ?Sized>(input: &T) -> Vec<FieldError> {
    let Err(errors) = input.validate() else {
        return Vec::new();
    };

    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, violations)| {
            let field = field.to_string();
            violations.iter().map(move |v| {
                let message = v
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                FieldError::new(field.clone(), v.code.to_string(), message)
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
