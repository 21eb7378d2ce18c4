//! Error types for jirabridge-core

use thiserror::Error;

/// Result type alias for jirabridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jirabridge operations
///
/// Malformed document shapes never surface here; the table extractor absorbs
/// them. Only configuration, transport and output failures do.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing action input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The requested resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials rejected (HTTP 401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-success API response
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure writing action outputs
    #[error("Output error: {0}")]
    Output(String),

    /// Runtime error (Tokio, threading, etc.)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Config(format!("invalid issue key pattern: {}", err))
    }
}

/// Fieldless error category for zero-cost pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Transport error
    Http,
    /// Resource not found
    NotFound,
    /// Credentials rejected
    Unauthorized,
    /// Non-success API response
    Api,
    /// JSON error
    Json,
    /// I/O operation error
    Io,
    /// Output sink error
    Output,
    /// Runtime error
    Runtime,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Http(_) => ErrorKind::Http,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            Error::Api { .. } => ErrorKind::Api,
            Error::Json(_) => ErrorKind::Json,
            Error::Io(_) => ErrorKind::Io,
            Error::Output(_) => ErrorKind::Output,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Borrow the error message without allocating.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Http(msg)
            | Error::NotFound(msg)
            | Error::Unauthorized(msg)
            | Error::Json(msg)
            | Error::Output(msg)
            | Error::Runtime(msg)
            | Error::Other(msg) => msg,
            Error::Api { body, .. } => body,
            Error::Io(_) => "I/O error",
        }
    }

    /// True when the error means the issue does not exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Config("test".to_string());
        let k = err.kind();
        let k2 = k;
        assert_eq!(k, k2);
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_error_message_borrows() {
        let err = Error::Config("bad config".to_string());
        assert_eq!(err.message(), "bad config");

        let err = Error::Api {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn test_display_includes_status() {
        let err = Error::Api {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: bad gateway");
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::Config("c".into()), ErrorKind::Config),
            (Error::Http("h".into()), ErrorKind::Http),
            (Error::NotFound("n".into()), ErrorKind::NotFound),
            (Error::Unauthorized("u".into()), ErrorKind::Unauthorized),
            (
                Error::Api {
                    status: 400,
                    body: "a".into(),
                },
                ErrorKind::Api,
            ),
            (Error::Json("j".into()), ErrorKind::Json),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
            (Error::Output("o".into()), ErrorKind::Output),
            (Error::Runtime("r".into()), ErrorKind::Runtime),
            (Error::Other("o".into()), ErrorKind::Other),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_regex_error_maps_to_config() {
        let err: Error = regex::Regex::new("(").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().contains("invalid issue key pattern"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NotFound("PROJ-1".into()).is_not_found());
        assert!(!Error::Http("x".into()).is_not_found());
    }
}
