//! Error types for the contacts service.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the contacts service.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing, empty, or malformed.
    #[error("{message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },

    /// No contact exists with the requested identifier.
    #[error("Contact not found: {id}")]
    NotFound {
        /// The requested contact identifier.
        id: String,
    },

    /// The underlying store failed to complete an operation.
    #[error("Store error: {message}")]
    Store {
        /// Error message.
        message: String,
    },

    /// The store connection string could not be understood.
    #[error("Invalid database URL '{url}': {reason}")]
    InvalidDatabaseUrl {
        /// The rejected connection string.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not-found error for the given contact identifier.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a store error with the given message.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Returns `true` if the caller sent bad input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if the requested contact does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_bare() {
        let err = Error::validation("name is required");
        assert_eq!(err.to_string(), "name is required");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_mentions_id() {
        let err = Error::not_found("abc");
        assert_eq!(err.to_string(), "Contact not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
