//! Error code mapping from B2 responses to typed errors.

use super::*;
use serde::Deserialize;

/// Parsed B2 error response body.
///
/// B2 reports failures as `{"status": 401, "code": "expired_auth_token", "message": "..."}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct B2ErrorResponse {
    /// HTTP status echoed in the body.
    pub status: u16,
    /// B2 error code (e.g., "expired_auth_token").
    pub code: String,
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
}

/// Map a B2 error code to a typed error.
///
/// A rejected application key on `b2_authorize_account` comes back as
/// `401 unauthorized` and is reported as invalid credentials; every other
/// code is kept as an [`ApiError`] so classification can look at its status.
pub fn map_b2_error_code(response: B2ErrorResponse, retry_after: Option<Duration>) -> B2Error {
    match (response.status, response.code.as_str()) {
        (401, "unauthorized") => B2Error::Credentials(CredentialsError::Invalid {
            message: response.message,
        }),
        _ => B2Error::Api(ApiError {
            status: response.status,
            code: response.code,
            message: response.message,
            retry_after,
        }),
    }
}

/// Parse a raw error body returned with `status`.
///
/// Bodies that are not valid B2 error JSON are kept verbatim as the message
/// with the code `unknown`, so the status still drives classification.
pub fn parse_error_body(status: u16, body: &[u8], retry_after: Option<Duration>) -> B2Error {
    match serde_json::from_slice::<B2ErrorResponse>(body) {
        Ok(mut response) => {
            // the transport status wins over whatever the body echoes
            response.status = status;
            map_b2_error_code(response, retry_after)
        }
        Err(_) => B2Error::Api(ApiError {
            status,
            code: "unknown".to_string(),
            message: String::from_utf8_lossy(body).into_owned(),
            retry_after,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expired_token() {
        let body = br#"{"status": 401, "code": "expired_auth_token", "message": "Authorization token has expired"}"#;
        let err = parse_error_body(401, body, None);
        assert!(err.is_auth_expired());
        assert!(!err.is_transient());
        assert_eq!(err.b2_error_code(), Some("expired_auth_token"));
    }

    #[test]
    fn test_parse_unauthorized_maps_to_credentials() {
        let body = br#"{"status": 401, "code": "unauthorized", "message": "bad key"}"#;
        match parse_error_body(401, body, None) {
            B2Error::Credentials(CredentialsError::Invalid { message }) => {
                assert_eq!(message, "bad key");
            }
            other => panic!("Expected CredentialsError::Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_service_unavailable_keeps_retry_after() {
        let body = br#"{"status": 503, "code": "service_unavailable", "message": "try later"}"#;
        let err = parse_error_body(503, body, Some(Duration::from_secs(5)));
        assert!(err.is_transient());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_non_json_body() {
        let err = parse_error_body(502, b"<html>Bad Gateway</html>", None);
        assert!(err.is_transient());
        assert_eq!(err.b2_error_code(), Some("unknown"));
        match err {
            B2Error::Api(api) => assert_eq!(api.message, "<html>Bad Gateway</html>"),
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let body = br#"{"status": 400, "code": "bad_request"}"#;
        match parse_error_body(400, body, None) {
            B2Error::Api(api) => {
                assert_eq!(api.code, "bad_request");
                assert!(api.message.is_empty());
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }
}
