//! Error types for the B2 integration module.
//!
//! Errors are grouped by source. The resilience layer never wraps or annotates
//! an error coming from the raw client: whatever the lowest call produced is
//! what the caller sees, except for [`B2Error::Cancelled`], which is produced
//! when a caller cancels during a backoff wait.

mod mapping;

pub use mapping::{map_b2_error_code, parse_error_body, B2ErrorResponse};

use std::time::Duration;
use thiserror::Error;

/// Top-level error type for the B2 integration.
#[derive(Debug, Error)]
pub enum B2Error {
    /// Error reported by the B2 API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network and transport errors.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Credential-related errors.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The caller cancelled the operation while it was waiting to retry.
    #[error("Operation cancelled")]
    Cancelled,
}

impl B2Error {
    /// Returns true if the error is likely to succeed when retried.
    pub fn is_transient(&self) -> bool {
        match self {
            B2Error::Api(e) => e.is_transient(),
            B2Error::Network(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Returns true if the session's authorization token is no longer valid.
    pub fn is_auth_expired(&self) -> bool {
        match self {
            B2Error::Api(e) => e.is_auth_expired(),
            _ => false,
        }
    }

    /// Returns the retry delay hint if the server supplied one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            B2Error::Api(e) => e.retry_after,
            _ => None,
        }
    }

    /// Returns the HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            B2Error::Api(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns the B2 error code if available.
    pub fn b2_error_code(&self) -> Option<&str> {
        match self {
            B2Error::Api(e) => Some(e.code.as_str()),
            _ => None,
        }
    }

    /// Returns true if this is the cancellation error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, B2Error::Cancelled)
    }
}

/// An error response from the B2 API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{status} {code}: {message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// B2 error code (e.g. "expired_auth_token").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Retry-After hint, if the response carried one.
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Create a new API error without a retry hint.
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            retry_after: None,
        }
    }

    /// Attach a Retry-After hint.
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Returns true if the status is one B2 documents as retryable.
    pub fn is_transient(&self) -> bool {
        matches!(self.status, 408 | 429 | 500 | 502 | 503 | 504)
    }

    /// Returns true if the authorization token must be refreshed.
    pub fn is_auth_expired(&self) -> bool {
        self.status == 401 && matches!(self.code.as_str(), "expired_auth_token" | "bad_auth_token")
    }
}

/// Network and transport errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection failed.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out after {duration:?}")]
    Timeout {
        /// The timeout duration.
        duration: Duration,
    },

    /// DNS resolution failed.
    #[error("DNS resolution failed for '{host}'")]
    DnsResolutionFailed {
        /// The host that could not be resolved.
        host: String,
    },

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    TlsError {
        /// Error message.
        message: String,
    },

    /// Connection reset.
    #[error("Connection reset by peer")]
    ConnectionReset,
}

impl NetworkError {
    /// Returns true if the error is retryable.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NetworkError::ConnectionFailed { .. }
                | NetworkError::Timeout { .. }
                | NetworkError::ConnectionReset
        )
    }
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// Reauthorization was requested before any authorization succeeded.
    #[error("Not authorized: no account has been authorized on this session")]
    NotAuthorized,

    /// Credentials are invalid.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing account ID or application key.
    #[error("Missing credentials: account ID and application key must be specified via config or environment")]
    MissingCredentials,

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(408, true ; "request timeout")]
    #[test_case(429, true ; "too many requests")]
    #[test_case(500, true ; "internal error")]
    #[test_case(503, true ; "service unavailable")]
    #[test_case(400, false ; "bad request")]
    #[test_case(401, false ; "unauthorized")]
    #[test_case(404, false ; "not found")]
    fn test_api_error_transient(status: u16, expected: bool) {
        let err = B2Error::Api(ApiError::new(status, "code", "message"));
        assert_eq!(err.is_transient(), expected);
    }

    #[test_case("expired_auth_token", true ; "expired token")]
    #[test_case("bad_auth_token", true ; "bad token")]
    #[test_case("unauthorized", false ; "unauthorized")]
    fn test_api_error_auth_expired(code: &str, expected: bool) {
        let err = B2Error::Api(ApiError::new(401, code, "message"));
        assert_eq!(err.is_auth_expired(), expected);
    }

    #[test]
    fn test_auth_expired_requires_401() {
        let err = B2Error::Api(ApiError::new(400, "expired_auth_token", "message"));
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn test_network_error_transient() {
        let timeout = B2Error::Network(NetworkError::Timeout {
            duration: Duration::from_secs(30),
        });
        assert!(timeout.is_transient());

        let tls = B2Error::Network(NetworkError::TlsError {
            message: "bad certificate".into(),
        });
        assert!(!tls.is_transient());
    }

    #[test]
    fn test_cancelled_is_not_transient() {
        assert!(!B2Error::Cancelled.is_transient());
        assert!(!B2Error::Cancelled.is_auth_expired());
        assert!(B2Error::Cancelled.is_cancelled());
    }

    #[test]
    fn test_retry_after() {
        let err = B2Error::Api(
            ApiError::new(503, "service_unavailable", "busy")
                .with_retry_after(Duration::from_secs(7)),
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.b2_error_code(), Some("service_unavailable"));

        let reset = B2Error::Network(NetworkError::ConnectionReset);
        assert!(reset.retry_after().is_none());
        assert!(reset.status_code().is_none());
    }
}
