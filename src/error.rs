//! Error types for the ViaRAG client and CLI.

use thiserror::Error;

/// Errors returned by [`ViaRagClient`](crate::client::ViaRagClient) operations.
///
/// Transport failures, rejected requests and malformed responses are kept
/// apart so callers can decide on their own recovery policy. The client never
/// retries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service could not be reached (refused, DNS, TLS handshake).
    #[error("failed to connect to ViaRAG service: {0}")]
    Connection(String),

    /// The configured request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but the body did not have the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String, body: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The upload could not be assembled (unnamed path, empty filename).
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Reading an upload file from disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status code, if the service responded at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } | ClientError::InvalidResponse { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Timeout => true,
            ClientError::Request(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// True when no service was reachable (connection failure or timeout).
    pub fn is_connection(&self) -> bool {
        match self {
            ClientError::Connection(_) => true,
            ClientError::Request(e) => e.is_connect(),
            _ => self.is_timeout(),
        }
    }

    /// True when the service rejected the request with a non-2xx status.
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }

    pub fn is_invalid_response(&self) -> bool {
        matches!(self, ClientError::InvalidResponse { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Connection(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }
}

/// Errors related to the CLI configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_accessors() {
        let err = ClientError::Status {
            status: 404,
            body: r#"{"detail":"not found"}"#.to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.body(), Some(r#"{"detail":"not found"}"#));
        assert!(err.is_status());
        assert!(!err.is_connection());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_counts_as_unreachable() {
        let err = ClientError::Timeout;
        assert!(err.is_timeout());
        assert!(err.is_connection());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.body(), None);
    }

    #[test]
    fn test_invalid_response_keeps_body() {
        let err = ClientError::InvalidResponse {
            message: "missing field `documents`".to_string(),
            body: "{}".to_string(),
        };
        assert!(err.is_invalid_response());
        assert_eq!(err.body(), Some("{}"));
        assert!(!err.is_status());
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = ClientError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "service returned status 500: boom");
    }
}
