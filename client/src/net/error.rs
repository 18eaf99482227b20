//! Error type shared by every remote call.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures never cross the component boundary: pages turn an
//! [`ApiError`] into a transient toast. The variants only exist so messages
//! read well and tests can assert on the failure class.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("backend configuration not loaded")]
    NotConfigured,
    #[error("not signed in")]
    Unauthenticated,
    #[error("not available outside the browser")]
    Unavailable,
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("{status}: {message}")]
    Function { status: String, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an [`ApiError::Http`] from a status code and raw response body.
    ///
    /// Google-style APIs answer with `{"error": {"message": "..."}}`; anything
    /// else falls back to the trimmed body text.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthenticated;
        }
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message").or(Some(e)))
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() { "no response body".to_owned() } else { trimmed.to_owned() }
            });
        Self::Http { status, message }
    }

    /// True when the caller should drop its session and sign in again.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated)
            || matches!(self, Self::Function { status, .. } if status == "UNAUTHENTICATED")
    }
}
