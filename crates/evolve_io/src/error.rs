//! Error types for evolve_io crate.
//!
//! Every variant is a persistence failure from the session's point of view;
//! the variants only record where it came from.

use thiserror::Error;

/// Main error type for evolve_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The store is unavailable or its contents are corrupt
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for evolve_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new persistence failure.
    #[must_use]
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::PersistenceFailure(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::persistence("no such table");
        assert_eq!(err.to_string(), "Persistence failure: no such table");
    }

    #[test]
    fn test_error_context() {
        let err = IoError::persistence("locked").with_context("saving world");
        assert!(err.to_string().starts_with("saving world"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: IoError = io_err.into();
        assert!(matches!(err, IoError::FileSystem(_)));
    }
}
