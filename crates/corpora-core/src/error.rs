//! Error types for the corpora client.

use thiserror::Error;

use crate::credential::CredentialError;

/// Result type alias using the corpora Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for corpora client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection string could not be parsed (local, no network involved)
    #[error("Invalid URI format: {0}")]
    Credential(#[from] CredentialError),

    /// Authenticated call attempted with no credential held
    #[error("No active session")]
    NoSession,

    /// Liveness or readiness probe failed during connect
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// Server answered with a non-success HTTP status
    #[error("Request failed ({status}): {body}")]
    RequestFailed { status: u16, body: String },

    /// Transport-level failure (connection refused, timeout, ...)
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input (empty text, empty catalog, missing filename, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another operation of the same category is still in flight
    #[error("Operation already in flight: {0}")]
    Busy(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_session() {
        let err = Error::NoSession;
        assert_eq!(err.to_string(), "No active session");
    }

    #[test]
    fn test_error_display_handshake() {
        let err = Error::Handshake("readiness probe returned 503".to_string());
        assert_eq!(
            err.to_string(),
            "Handshake failed: readiness probe returned 503"
        );
    }

    #[test]
    fn test_error_display_request_failed() {
        let err = Error::RequestFailed {
            status: 422,
            body: "unprocessable".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (422): unprocessable");
    }

    #[test]
    fn test_error_display_busy() {
        let err = Error::Busy("query");
        assert_eq!(err.to_string(), "Operation already in flight: query");
    }

    #[test]
    fn test_credential_error_converts_with_uri_prefix() {
        let err: Error = CredentialError::MissingToken.into();
        assert!(err.to_string().starts_with("Invalid URI format: "));
    }

    #[test]
    fn test_serde_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
