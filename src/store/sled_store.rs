//! Sled-backed tree store
//!
//! The whole tree is stored as a single bincode-encoded value, so a write is
//! one atomic sled insert.

use sled::{Db, Tree};
use std::path::Path;

use super::{StoreError, TreeStore};
use crate::tree::TagTree;

const TREE_KEY: &[u8] = b"root";

/// Tree store persisted in a sled database
pub struct SledStore {
    db: Db,
    tags: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use tagtree::store::{SledStore, TreeStore};
    /// let store = SledStore::open("my_db").unwrap();
    /// let tree = store.read().unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its internal tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let tags = db.open_tree("tags")?;
        Ok(Self { db, tags })
    }

    /// Remove the stored tree
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database operation fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.tags.clear()?;
        self.db.flush()?;
        Ok(())
    }
}

impl TreeStore for SledStore {
    fn read(&self) -> Result<TagTree, StoreError> {
        match self.tags.get(TREE_KEY)? {
            Some(value) => {
                let (tree, _): (TagTree, usize) =
                    bincode::serde::decode_from_slice(&value, bincode::config::standard())?;
                Ok(tree)
            }
            None => Ok(TagTree::default()),
        }
    }

    fn write(&self, tree: TagTree) -> Result<(), StoreError> {
        let value = bincode::serde::encode_to_vec(&tree, bincode::config::standard())?;
        let bytes = value.len();
        self.tags.insert(TREE_KEY, value)?;
        self.db.flush()?;
        tracing::trace!(bytes, "tag tree persisted");
        Ok(())
    }
}
