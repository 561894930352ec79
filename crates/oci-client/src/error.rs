//! OCI client errors

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to an OCI control-plane API
#[derive(Debug, Error)]
pub enum OciError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("OCI service error: {status} {code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be built (bad endpoint, missing credentials)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error body returned by OCI services
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl OciError {
    pub fn service(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        OciError::Service {
            status,
            code: code.into(),
            message: message.into(),
            request_id,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::service(404, "NotAuthorizedOrNotFound", message, None)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            OciError::Service { status, .. } => Some(*status),
            OciError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Transport failures, conflicts, throttling and server errors are worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            OciError::Http(_) => true,
            OciError::Service { status, .. } => {
                matches!(*status, 409 | 429) || (500..600).contains(status)
            }
            OciError::Serialization(_) | OciError::InvalidRequest(_) => false,
        }
    }

    /// Canonical HTTP reason without spaces, e.g. `TooManyRequests`
    pub fn reason(&self) -> Option<String> {
        let status = StatusCode::from_u16(self.status_code()?).ok()?;
        status
            .canonical_reason()
            .map(|reason| reason.split_whitespace().collect())
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            OciError::Service { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Service message suffixed with the request id, as surfaced in conditions
    pub fn service_message(&self) -> Option<String> {
        match self {
            OciError::Service {
                message,
                request_id: Some(id),
                ..
            } => Some(format!("{message} (opc-request-id: {id})")),
            OciError::Service { message, .. } => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(OciError::service(429, "TooManyRequests", "slow down", None).is_retryable());
        assert!(OciError::service(409, "IncorrectState", "busy", None).is_retryable());
        assert!(OciError::service(503, "ServiceUnavailable", "down", None).is_retryable());
        assert!(!OciError::service(400, "InvalidParameter", "bad", None).is_retryable());
        assert!(!OciError::not_found("gone").is_retryable());
        assert!(!OciError::InvalidRequest("no".into()).is_retryable());
    }

    #[test]
    fn test_reason_strips_spaces() {
        let err = OciError::service(429, "TooManyRequests", "slow down", None);
        assert_eq!(err.reason().as_deref(), Some("TooManyRequests"));
        let err = OciError::service(400, "InvalidParameter", "bad", None);
        assert_eq!(err.reason().as_deref(), Some("BadRequest"));
        assert_eq!(OciError::InvalidRequest("x".into()).reason(), None);
    }

    #[test]
    fn test_service_message_includes_request_id() {
        let err = OciError::service(400, "InvalidParameter", "bad name", Some("req-1".into()));
        assert_eq!(
            err.service_message().as_deref(),
            Some("bad name (opc-request-id: req-1)")
        );
        assert!(err.to_string().contains("InvalidParameter"));
    }
}
