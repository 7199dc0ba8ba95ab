//! Errors from the REST client layer.

use serde_json::Value;

/// Fallback shown to the user when the server gave no usable message.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Error code the backend attaches to a 401 for an expired or revoked token.
pub const TOKEN_NOT_VALID: &str = "token_not_valid";

/// Errors from the task-management REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the error payload.
        message: Option<String>,
        /// Machine-readable `code` from the error payload, if any.
        code: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// The access token was rejected; the session has been cleared.
    #[error("Session is no longer valid: {0}")]
    Unauthorized(String),

    /// A success response carried a body that did not decode.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a status code and raw body,
    /// extracting the server's message and code when the body is JSON.
    pub fn from_status(status: u16, body: String) -> Self {
        let parsed = serde_json::from_str::<Value>(&body).ok();
        let message = parsed.as_ref().and_then(extract_message);
        let code = parsed
            .as_ref()
            .and_then(|v| v.get("code"))
            .and_then(Value::as_str)
            .map(str::to_string);
        ApiError::Status {
            status,
            message,
            code,
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// Message the server supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            ApiError::Unauthorized(message) => Some(message),
            _ => None,
        }
    }

    /// Text for a transient notification: the server's message when it sent
    /// one, [`GENERIC_FAILURE`] otherwise.
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

/// Pull a readable message out of a backend error payload.
///
/// Recognizes `{"error": ..}`, `{"detail": ..}`, `{"message": ..}` and
/// field-keyed validation maps such as `{"name": ["This field is required."]}`.
fn extract_message(payload: &Value) -> Option<String> {
    for key in ["error", "detail", "message"] {
        if let Some(text) = payload.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    let fields = payload.as_object()?;
    let parts: Vec<String> = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "code")
        .filter_map(|(key, value)| {
            let first = match value {
                Value::Array(items) => items.first()?.as_str()?,
                Value::String(s) => s.as_str(),
                _ => return None,
            };
            Some(if key == "non_field_errors" {
                first.to_string()
            } else {
                format!("{key}: {first}")
            })
        })
        .collect();

    (!parts.is_empty()).then(|| parts.join("; "))
}
