//! Remote store error types.

use mdvita_core::VitaError;
use thiserror::Error;

/// Errors that can occur while talking to the document service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("Remote request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the JSON we expected.
    #[error("Failed to parse remote response: {0}")]
    ParseError(String),

    /// Request exceeded the configured timeout, in milliseconds.
    #[error("Remote request timed out after {0}ms")]
    Timeout(u64),

    /// Service could not be reached.
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    /// The service rejected the request; retrying will not help.
    #[error("Remote store rejected request with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// All retry attempts exhausted.
    #[error("All remote retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// Attempts made, including the first.
        attempts: u32,
        /// Error from the final attempt.
        last_error: String,
    },

    /// Configuration error.
    #[error("Remote store configuration error: {0}")]
    ConfigError(String),
}

impl From<RemoteError> for VitaError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::ConfigError(msg) => VitaError::Config(msg),
            RemoteError::ParseError(msg) => VitaError::Serialization(msg),
            other => VitaError::Remote(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_core_error() {
        let err: VitaError = RemoteError::Rejected { status: 403, body: "nope".into() }.into();
        assert!(matches!(err, VitaError::Remote(ref m) if m.contains("403")));

        let err: VitaError = RemoteError::ConfigError("bad url".into()).into();
        assert!(matches!(err, VitaError::Config(_)));

        let err: VitaError = RemoteError::ParseError("eof".into()).into();
        assert!(matches!(err, VitaError::Serialization(_)));

        let err: VitaError = RemoteError::Timeout(250).into();
        assert_eq!(err.to_string(), "Remote store error: Remote request timed out after 250ms");
    }
}
