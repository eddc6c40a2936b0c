//! Application layer error taxonomy
//!
//! Validation errors carry field-level detail and are produced before any
//! cache or upstream interaction. Degraded upstream calls (placeholder audio,
//! empty provider results) are logged at the call site and never surface here.

use thiserror::Error;

/// One field-level validation failure
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application layer error
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Malformed caller input, recoverable
    #[error("Validation failed")]
    Validation { details: Vec<FieldError> },

    /// Required upstream collaborator not configured or unreachable,
    /// with no fallback path for the capability
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            details: vec![FieldError::new(field, message)],
        }
    }

    /// Multi-field validation error
    pub fn validation_details(details: Vec<FieldError>) -> Self {
        Self::Validation { details }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
