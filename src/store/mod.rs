//! Tag tree storage
//!
//! The store holds the single source of truth for the tag tree. Readers get a
//! snapshot ([`TagTree`] clones are shallow); writers replace the whole
//! snapshot at once. There is no merging: when two writers derive trees from
//! the same snapshot, the last write wins.
//!
//! Two backends are provided:
//! - [`MemoryStore`]: process-local snapshot behind a lock
//! - [`SledStore`]: the snapshot persisted in a sled database

pub mod error;
pub mod sled_store;

pub use sled_store::SledStore;
pub use error::StoreError;

use std::sync::RwLock;

use crate::tree::TagTree;

/// Storage collaborator for the tag tree
pub trait TreeStore {
    /// Read the current tree snapshot
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or decoded.
    fn read(&self) -> Result<TagTree, StoreError>;

    /// Replace the stored tree
    ///
    /// The new tree must be visible to every subsequent [`read`](Self::read)
    /// once this returns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tree cannot be encoded or persisted.
    fn write(&self, tree: TagTree) -> Result<(), StoreError>;
}

impl<T: TreeStore + ?Sized> TreeStore for &T {
    fn read(&self) -> Result<TagTree, StoreError> {
        (**self).read()
    }

    fn write(&self, tree: TagTree) -> Result<(), StoreError> {
        (**self).write(tree)
    }
}

/// In-memory tree store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: RwLock<TagTree>,
}

impl MemoryStore {
    /// Create a store seeded with `tree`
    #[must_use]
    pub fn new(tree: TagTree) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }
}

impl TreeStore for MemoryStore {
    fn read(&self) -> Result<TagTree, StoreError> {
        let tree = self.tree.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tree.clone())
    }

    fn write(&self, tree: TagTree) -> Result<(), StoreError> {
        let mut current = self.tree.write().map_err(|_| StoreError::Poisoned)?;
        *current = tree;
        Ok(())
    }
}
