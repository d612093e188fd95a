//! Store-specific error types
//!
//! Errors raised while reading or writing the tag tree snapshot.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing the stored tree
//! - **`EncodeError`**: Failures when serializing the tree for storage
//! - **`Poisoned`**: An in-memory store lock was poisoned by a panicking writer

use thiserror::Error;

/// Tree store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding tag tree: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding tag tree: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Lock guarding an in-memory snapshot was poisoned
    #[error("Tag tree lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisoned_display() {
        assert_eq!(StoreError::Poisoned.to_string(), "Tag tree lock poisoned");
    }

    #[test]
    fn test_sled_error_conversion() {
        let sled_err = sled::Error::Unsupported("nope".to_string());
        let err: StoreError = sled_err.into();
        assert!(matches!(err, StoreError::SledError(_)));
        assert!(err.to_string().starts_with("Database error:"));
    }
}
