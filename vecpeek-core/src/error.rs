//! Error types for vecpeek operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using vecpeek's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting a store.
///
/// Ragged arrays, null fields and empty collections are not errors; the
/// normalizer absorbs them.
#[derive(Debug, Error)]
pub enum Error {
    /// The persistence path could not be opened by the engine.
    #[error("cannot open store at {}: {reason}", path.display())]
    Connection { path: PathBuf, reason: String },

    /// The named collection does not exist in the store.
    #[error("collection not found: {0}")]
    NotFound(String),

    /// An operation needed a store but none is open.
    #[error("no store is open")]
    NoStore,

    /// Any other failure reported by the engine.
    #[error("engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Builds a connection error for `path`.
    pub fn connection(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Connection {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if the error means "no valid store" to the user.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::NoStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::connection("/no/such/dir", "not a directory");
        assert_eq!(
            err.to_string(),
            "cannot open store at /no/such/dir: not a directory"
        );

        let err = Error::NotFound("docs".into());
        assert_eq!(err.to_string(), "collection not found: docs");
    }

    #[test]
    fn test_store_unavailable() {
        assert!(Error::NoStore.is_store_unavailable());
        assert!(Error::connection("x", "y").is_store_unavailable());
        assert!(!Error::NotFound("c".into()).is_store_unavailable());
        assert!(!Error::Engine("boom".into()).is_store_unavailable());
    }
}
