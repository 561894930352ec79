//! Operator error types.
//!
//! `ControllerError` covers process-level failures (configuration, watch
//! streams). `ServiceManagerError` is what a reconcile pass returns; its
//! [`ErrorKind`] drives the requeue decision in the error policy.

use kube::Error as KubeError;
use oci_client::OciError;
use thiserror::Error;

/// Errors that can stop the operator process.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// OCI client could not be built
    #[error("OCI error: {0}")]
    Oci(#[from] OciError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}

/// Whether a failed reconcile pass should be retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Retryable,
    Terminal,
}

/// Failures of the pure conversion layer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unknown {0} target")]
    UnknownTarget(&'static str),

    #[error("unknown mtls mode")]
    UnknownMtlsMode,

    #[error("unknown {0}")]
    UnknownVariant(&'static str),

    #[error("unresolved reference {0}")]
    MissingDependency(String),

    #[error("port {0} is outside 1-65535")]
    InvalidPort(i32),
}

/// Errors returned by one reconcile pass of the service manager
#[derive(Debug, Error)]
pub enum ServiceManagerError {
    /// Transient condition; retry with backoff
    #[error("{0}")]
    RequeueOnError(String),

    /// Needs operator intervention; do not retry until the object changes
    #[error("{0}")]
    DoNotRequeue(String),

    #[error(transparent)]
    Remote(#[from] OciError),

    #[error(transparent)]
    Kube(#[from] KubeError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    Validation(String),
}

impl ServiceManagerError {
    pub fn requeue(message: impl Into<String>) -> Self {
        ServiceManagerError::RequeueOnError(message.into())
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        ServiceManagerError::DoNotRequeue(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceManagerError::RequeueOnError(_) | ServiceManagerError::Kube(_) => {
                ErrorKind::Retryable
            }
            ServiceManagerError::Remote(e) if e.is_retryable() => ErrorKind::Retryable,
            ServiceManagerError::Remote(_)
            | ServiceManagerError::DoNotRequeue(_)
            | ServiceManagerError::Conversion(_)
            | ServiceManagerError::Validation(_) => ErrorKind::Terminal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Retryable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ServiceManagerError::requeue("not yet").kind(),
            ErrorKind::Retryable
        );
        assert_eq!(
            ServiceManagerError::terminal("failed").kind(),
            ErrorKind::Terminal
        );
        assert_eq!(
            ServiceManagerError::from(ConversionError::UnknownMtlsMode).kind(),
            ErrorKind::Terminal
        );
        assert_eq!(
            ServiceManagerError::from(OciError::service(429, "TooManyRequests", "slow", None))
                .kind(),
            ErrorKind::Retryable
        );
        assert_eq!(
            ServiceManagerError::from(OciError::service(400, "InvalidParameter", "bad", None))
                .kind(),
            ErrorKind::Terminal
        );
    }

    #[test]
    fn test_conversion_messages() {
        assert_eq!(
            ConversionError::UnknownTarget("access policy").to_string(),
            "unknown access policy target"
        );
        assert_eq!(ConversionError::UnknownMtlsMode.to_string(), "unknown mtls mode");
    }
}
