//! Session-specific error types
//!
//! Selection problems (dangling paths, empty navigation) are never errors; they
//! resolve to `DEFAULT` or to a no-op. Only collaborator failures surface here.

use thiserror::Error;

use crate::store::StoreError;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The tree store failed to read or write
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// A registered hook failed while reacting to a selection change
    #[error("Hook failed: {0}")]
    HookError(String),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, SessionError>;
