//! Tagtree - A copy-on-write tag hierarchy for note-taking applications
//!
//! This library provides a path-addressed tree of tags whose mutations share
//! every untouched subtree with the previous snapshot, plus a session that
//! keeps a single active tag consistent with the tree and the selected note.
//!
//! - [`path`]: splitting and comparing `a/b/c` style tag paths
//! - [`tree`]: the tree snapshot and its copy-on-write mutations
//! - [`store`]: where snapshots live (memory or sled)
//! - [`session`]: active selection, collapse state and selection inference

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod path;
pub mod session;
pub mod store;
pub mod tree;

#[cfg(test)]
pub mod testing;

pub use session::{PseudoTag, TagSession};
pub use tree::{MutationOutcome, TagNode, TagTree};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TagtreeError {
    /// Store error
    #[error("Store error: {0}")]
    StoreError(#[from] store::StoreError),
    /// Session error
    #[error("Session error: {0}")]
    SessionError(#[from] session::SessionError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
