use serde::Deserialize;
use thiserror::Error;

use crate::auth::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Could not reach the server - check your connection")]
    Network(#[source] reqwest::Error),

    #[error("Secure storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Fallback shown when the server rejects a request without a message body
const GENERIC_AUTH_MESSAGE: &str = "Request was rejected by the server";

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error envelope the backend uses for 4xx responses: `{"message": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // Back off to a char boundary; a fixed byte cut can land inside
        // a multibyte character
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    /// Extract the server-provided `message` field, falling back to the raw body
    fn server_message(body: &str) -> Option<String> {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message {
                if !message.is_empty() {
                    return Some(message);
                }
            }
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::truncate_body(trimmed))
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body);
        match status.as_u16() {
            401 | 403 | 409 => {
                ApiError::Authentication(message.unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string()))
            }
            404 => ApiError::NotFound(message.unwrap_or_default()),
            500..=599 => ApiError::ServerError(message.unwrap_or_default()),
            _ => ApiError::InvalidResponse(format!(
                "Status {}: {}",
                status,
                message.unwrap_or_default()
            )),
        }
    }

    /// Map a non-2xx from the auth endpoints. A rejected login or
    /// register is an authentication failure whatever the exact status,
    /// carrying the server message when one is supplied.
    pub fn from_auth_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body)
            .unwrap_or_else(|| format!("{} (status {})", GENERIC_AUTH_MESSAGE, status));
        ApiError::Authentication(message)
    }

    /// Classify a transport-level failure from reqwest.
    /// Anything that never produced a response (timeout, refused connection,
    /// DNS failure) is a network error; the rest is a malformed exchange.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            ApiError::Network(err)
        } else {
            ApiError::InvalidResponse(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_extracts_server_message() {
        let err = ApiError::from_status(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"message":"Invalid credentials"}"#,
        );
        match err {
            ApiError::Authentication(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_falls_back_on_empty_body() {
        let err = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, "");
        match err {
            ApiError::Authentication(msg) => assert_eq!(msg, GENERIC_AUTH_MESSAGE),
            other => panic!("expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_conflict_is_authentication() {
        // Register returns 409 when the email is already taken
        let err = ApiError::from_status(
            reqwest::StatusCode::CONFLICT,
            r#"{"message":"Email already registered"}"#,
        );
        match err {
            ApiError::Authentication(msg) => assert_eq!(msg, "Email already registered"),
            other => panic!("expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_from_auth_status_maps_any_failure_to_authentication() {
        // A 500 during login still surfaces as an authentication failure
        let err = ApiError::from_auth_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"database unavailable"}"#,
        );
        match err {
            ApiError::Authentication(msg) => assert_eq!(msg, "database unavailable"),
            other => panic!("expected Authentication, got {:?}", other),
        }

        let err = ApiError::from_auth_status(reqwest::StatusCode::SERVICE_UNAVAILABLE, "");
        match err {
            ApiError::Authentication(msg) => assert!(msg.contains("503")),
            other => panic!("expected Authentication, got {:?}", other),
        }
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 200 three-byte euro signs put the cut inside a character
        let body = "€".repeat(200);
        let err = ApiError::from_status(reqwest::StatusCode::BAD_REQUEST, &body);
        let text = err.to_string();
        assert!(text.contains("truncated"));
        assert!(text.contains("600 total bytes"));
    }

    #[test]
    fn test_from_status_server_error() {
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(reqwest::StatusCode::BAD_REQUEST, &body);
        let text = err.to_string();
        assert!(text.len() < 700);
        assert!(text.contains("truncated"));
    }
}
