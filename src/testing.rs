//! Testing utilities for tagtree
//!
//! Fixtures shared by the unit tests: a temporary sled store, a sample tree,
//! a minimal note type and hooks that record what the session told them.
//!
//! Only available when compiled with `cfg(test)`.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tempfile::TempDir;

use crate::session::{HookResult, SessionHooks, TaggedNote};
use crate::store::SledStore;
use crate::tree::{TagNode, TagTree};

/// Sled store living in a temporary directory
///
/// The directory is removed when the wrapper goes out of scope.
pub struct TestDb {
    store: SledStore,
    dir: TempDir,
}

impl TestDb {
    /// Create an empty store in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SledStore::open(dir.path().join("db")).expect("Failed to open test database");
        Self { store, dir }
    }

    /// Get a reference to the underlying store
    #[must_use]
    pub const fn store(&self) -> &SledStore {
        &self.store
    }

    /// Get the path of the temporary directory
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Tree used throughout the tests
///
/// ```text
/// personal
/// work
/// ├── clients
/// │   └── acme      [kickoff.md]
/// └── reports       [q1.md]
/// ```
#[must_use]
pub fn sample_tree() -> TagTree {
    TagTree::from_nodes([
        TagNode::new("personal"),
        TagNode::new("work")
            .with_child(
                TagNode::new("work/clients")
                    .with_child(TagNode::new("work/clients/acme").with_notes(["kickoff.md"])),
            )
            .with_child(TagNode::new("work/reports").with_notes(["q1.md"])),
    ])
}

/// Minimal note used to drive selection inference
#[derive(Debug, Clone, Default)]
pub struct TestNote {
    pub tags: Vec<String>,
    pub favorited: bool,
    pub deleted: bool,
}

impl TestNote {
    #[must_use]
    pub fn untagged() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tagged<const N: usize>(tags: [&str; N]) -> Self {
        Self {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn favorited(mut self) -> Self {
        self.favorited = true;
        self
    }

    #[must_use]
    pub const fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

impl TaggedNote for TestNote {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorited(&self) -> bool {
        self.favorited
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// Shared handle on the events seen by [`RecordingHooks`]
#[derive(Debug, Clone, Default)]
pub struct HookLog(Rc<RefCell<Vec<String>>>);

impl HookLog {
    fn push(&self, event: String) {
        self.0.borrow_mut().push(event);
    }

    /// Events recorded so far
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Forget recorded events
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Hooks recording every notification as a string
#[derive(Debug, Default)]
pub struct RecordingHooks {
    log: HookLog,
    fail_search: bool,
}

impl RecordingHooks {
    /// Hooks whose search refresh always fails
    #[must_use]
    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Self::default()
        }
    }

    /// Handle on the recorded events
    #[must_use]
    pub fn log(&self) -> HookLog {
        self.log.clone()
    }
}

impl SessionHooks for RecordingHooks {
    fn refresh_search(&mut self, active: &str) -> HookResult {
        if self.fail_search {
            return Err("search index unavailable".into());
        }
        self.log.push(format!("search:{active}"));
        Ok(())
    }

    fn scroll_to_tag(&mut self, active: &str) {
        self.log.push(format!("scroll:{active}"));
    }

    fn rescroll_note(&mut self) {
        self.log.push("rescroll".to_string());
    }

    fn revalidate_note(&mut self) -> HookResult {
        self.log.push("revalidate".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TreeStore;

    #[test]
    fn test_db_starts_empty() {
        let test_db = TestDb::new();
        assert!(test_db.store().read().unwrap().tags.is_empty());
        assert!(test_db.path().exists());
    }

    #[test]
    fn test_sample_tree_shape() {
        let tree = sample_tree();
        assert_eq!(tree.walk().count(), 5);
        assert_eq!(tree.notes("work/reports"), ["q1.md".to_string()]);
    }

    #[test]
    fn test_recording_hooks() {
        let mut hooks = RecordingHooks::default();
        let log = hooks.log();

        hooks.refresh_search("work").unwrap();
        hooks.rescroll_note();

        assert_eq!(log.events(), vec!["search:work", "rescroll"]);
        log.clear();
        assert!(log.events().is_empty());
    }
}
