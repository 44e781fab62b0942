//! Error types used throughout the client
//!
//! Two taxonomies meet here: failures derived from the HTTP status of a
//! response (`BadRequest`, `Unauthorized`, `Forbidden`, `MethodNotAllowed`)
//! and failures the service reports inside a JSON envelope (`Service`).
//! The remaining variants cover the local side of a call.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad grouping of [`MetrikaError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Classified from the HTTP status code (400, 401, 403, 405)
    Transport,
    /// Reported by the service inside the response body
    Service,
    /// The transport adapter could not complete the exchange
    Network,
    /// The response body could not be interpreted
    Decode,
    /// Local configuration or request construction problem
    Config,
}

/// Failure decoded from a service error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Human-readable message
    pub message: String,
    /// Numeric code, when the envelope carries one
    pub code: Option<i64>,
    /// Error type tag (beta API envelopes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ServiceError {
    /// Create a service error with a message and optional code
    pub fn new(message: impl Into<String>, code: Option<i64>) -> Self {
        Self { message: message.into(), code, error_type: None }
    }

    /// Attach the envelope's error type tag
    #[must_use]
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error_type, self.code) {
            (Some(kind), Some(code)) => write!(f, "[{kind}] {} (code {code})", self.message),
            (Some(kind), None) => write!(f, "[{kind}] {}", self.message),
            (None, Some(code)) => write!(f, "{} (code {code})", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// Main error type for the Metrika client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum MetrikaError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Service error: {0}")]
    Service(ServiceError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MetrikaError {
    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BadRequest(_)
            | Self::Unauthorized(_)
            | Self::Forbidden(_)
            | Self::MethodNotAllowed(_) => ErrorCategory::Transport,
            Self::Service(_) => ErrorCategory::Service,
            Self::Network(_) => ErrorCategory::Network,
            Self::Decode(_) => ErrorCategory::Decode,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// The service error carried by this error, if any
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for MetrikaError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

/// Result type alias for Metrika operations
pub type Result<T> = std::result::Result<T, MetrikaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            MetrikaError::BadRequest("400".to_string()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            MetrikaError::MethodNotAllowed("405".to_string()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            MetrikaError::Service(ServiceError::new("boom", Some(3))).category(),
            ErrorCategory::Service
        );
        assert_eq!(MetrikaError::Network("down".to_string()).category(), ErrorCategory::Network);
        assert_eq!(MetrikaError::Decode("html".to_string()).category(), ErrorCategory::Decode);
    }

    #[test]
    fn test_service_error_display() {
        assert_eq!(ServiceError::new("Invalid counter", Some(404)).to_string(), "Invalid counter (code 404)");
        assert_eq!(ServiceError::new("plain", None).to_string(), "plain");
        assert_eq!(
            ServiceError::new("Access denied", Some(403))
                .with_error_type("access_denied")
                .to_string(),
            "[access_denied] Access denied (code 403)"
        );
    }

    #[test]
    fn test_service_error_accessor() {
        let err: MetrikaError = ServiceError::new("x", None).into();
        assert_eq!(err.service_error().map(|e| e.message.as_str()), Some("x"));
        assert!(MetrikaError::Config("bad".into()).service_error().is_none());
    }

    #[test]
    fn test_error_serializes_with_type_tag() {
        let err = MetrikaError::Unauthorized("401: Check your token".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Unauthorized");
        assert_eq!(json["detail"], "401: Check your token");
    }
}
