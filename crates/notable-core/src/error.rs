//! Error types for notable.

use thiserror::Error;

/// Result type alias using notable's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notable operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Completion backend unreachable, timed out, or returned a non-success status
    #[error("Extraction backend error: {0}")]
    ExtractionBackend(String),

    /// Backend answered but the output could not be read as a list of items
    #[error("Extraction parse error: {0}")]
    ExtractionParse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures caused by the completion backend rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::ExtractionBackend(_) | Error::ExtractionParse(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::ExtractionBackend(format!("Request timed out: {}", e))
        } else {
            Error::ExtractionBackend(format!("Request failed: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_extraction_backend() {
        let err = Error::ExtractionBackend("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "Extraction backend error: connection refused"
        );
    }

    #[test]
    fn test_error_display_extraction_parse() {
        let err = Error::ExtractionParse("no list structure".to_string());
        assert_eq!(err.to_string(), "Extraction parse error: no list structure");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing model".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing model");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("text is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: text is required");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_is_upstream() {
        assert!(Error::ExtractionBackend("x".into()).is_upstream());
        assert!(Error::ExtractionParse("x".into()).is_upstream());
        assert!(!Error::InvalidInput("x".into()).is_upstream());
        assert!(!Error::Config("x".into()).is_upstream());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
