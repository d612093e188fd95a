//! Copy-on-write tag tree
//!
//! [`TagTree`] is the explicit root handle of the tag hierarchy. Its `tags`
//! mapping holds the top-level tags; every node below is shared through `Arc`.
//!
//! Mutations never touch an existing node. [`TagTree::with_added`] and
//! [`TagTree::with_deleted`] return a new tree in which exactly the nodes on the
//! path from the root to the mutated parent are fresh allocations, while every
//! other subtree is the very same `Arc` as before:
//!
//! ```text
//!   before                 after add("a/b/x")
//!   root ─┬─ a ── b        root' ─┬─ a' ── b' ── x
//!         └─ c                    └─ c          (same Arc as before)
//! ```
//!
//! Consumers can therefore detect changes with `Arc::ptr_eq`.
//!
//! A mutation whose parent chain is incomplete is a no-op and reports
//! [`MutationOutcome::ParentMissing`].

pub mod node;

pub use node::{TagNode, Tags, Walk};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::path;

/// Result of a structural mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new tree was produced
    Applied,
    /// Some ancestor of the target does not exist; nothing changed
    ParentMissing,
    /// The parent exists but the mutation had nothing to do
    Unchanged,
}

impl MutationOutcome {
    /// Whether the mutation produced a new tree
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of resolving a path against a tree
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// The empty path, naming the root itself
    Root(&'a TagTree),
    /// A stored tag node
    Node(&'a Arc<TagNode>),
}

impl<'a> Resolved<'a> {
    /// Child tags of the resolved entry
    #[must_use]
    pub fn tags(self) -> &'a Tags {
        match self {
            Self::Root(tree) => &tree.tags,
            Self::Node(node) => &node.tags,
        }
    }

    /// Notes of the resolved entry; the root holds none
    #[must_use]
    pub fn notes(self) -> &'a [String] {
        match self {
            Self::Root(_) => &[],
            Self::Node(node) => &node.notes,
        }
    }

    /// The node, unless the root was resolved
    #[must_use]
    pub fn node(self) -> Option<&'a Arc<TagNode>> {
        match self {
            Self::Root(_) => None,
            Self::Node(node) => Some(node),
        }
    }
}

/// Root handle of the tag hierarchy
///
/// Cloning is shallow: only the top-level `Arc` handles are copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TagTree {
    /// Top-level tags keyed by name
    #[serde(default)]
    pub tags: Tags,
}

impl TagTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from top-level nodes
    #[must_use]
    pub fn from_nodes(nodes: impl IntoIterator<Item = TagNode>) -> Self {
        let tags = nodes
            .into_iter()
            .map(|node| (node.name.clone(), Arc::new(node)))
            .collect();
        Self { tags }
    }

    /// Walk `path` from the root
    ///
    /// The empty path resolves to [`Resolved::Root`] and is never absent.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        let mut segments = path::split(path).into_iter();
        let Some(first) = segments.next() else {
            return Some(Resolved::Root(self));
        };

        let mut node = self.tags.get(first)?;
        for segment in segments {
            node = node.tags.get(segment)?;
        }
        Some(Resolved::Node(node))
    }

    /// Node stored at `path`, if any
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Arc<TagNode>> {
        self.resolve(path).and_then(Resolved::node)
    }

    /// Whether `path` resolves (always true for the empty path)
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// Notes filed under `path`, empty if it doesn't resolve
    #[must_use]
    pub fn notes(&self, path: &str) -> &[String] {
        self.resolve(path).map(Resolved::notes).unwrap_or_default()
    }

    /// Child tags of `path`, `None` if it doesn't resolve
    #[must_use]
    pub fn tags(&self, path: &str) -> Option<&Tags> {
        self.resolve(path).map(Resolved::tags)
    }

    /// Whether `path` resolves and has at least one child
    #[must_use]
    pub fn has_children(&self, path: &str) -> bool {
        self.tags(path).is_some_and(|tags| !tags.is_empty())
    }

    /// Whether `path` names a collapsed node
    #[must_use]
    pub fn is_collapsed(&self, path: &str) -> bool {
        self.get(path).is_some_and(|node| node.collapsed)
    }

    /// Depth-first iterator over every stored node in key order
    pub fn walk(&self) -> impl Iterator<Item = &TagNode> {
        self.tags.values().flat_map(|node| node.walk())
    }

    /// Copy of this tree with `tag` stored under its parent
    ///
    /// An existing entry with the same name is overwritten. The node itself is
    /// stored as given.
    #[must_use]
    pub fn with_added(&self, tag: TagNode) -> (Option<Self>, MutationOutcome) {
        let tag_path = tag.path.clone();
        let parents = path::parent_segments(&tag_path);
        let name = tag.name.clone();
        let node = Arc::new(tag);

        match rebuild(&self.tags, &parents, |tags| {
            tags.insert(name, node);
            true
        }) {
            Some(tags) => (Some(Self { tags }), MutationOutcome::Applied),
            None => (None, MutationOutcome::ParentMissing),
        }
    }

    /// Copy of this tree with `tag` removed from its parent
    ///
    /// Descendants of `tag` go with it.
    #[must_use]
    pub fn with_deleted(&self, tag: &TagNode) -> (Option<Self>, MutationOutcome) {
        let parents = path::parent_segments(&tag.path);
        if self.resolve(&path::join(&parents)).is_none() {
            return (None, MutationOutcome::ParentMissing);
        }

        match rebuild(&self.tags, &parents, |tags| tags.remove(&tag.name).is_some()) {
            Some(tags) => (Some(Self { tags }), MutationOutcome::Applied),
            None => (None, MutationOutcome::Unchanged),
        }
    }
}

/// Rebuild the child mapping reached through `parents`, cloning each node on the way
///
/// Returns `None` if a segment is missing or `edit` reports no change.
fn rebuild<F>(tags: &Tags, parents: &[&str], edit: F) -> Option<Tags>
where
    F: FnOnce(&mut Tags) -> bool,
{
    match parents.split_first() {
        None => {
            let mut next = tags.clone();
            edit(&mut next).then_some(next)
        }
        Some((segment, rest)) => {
            let current = tags.get(*segment)?;
            let mut node = TagNode::clone(current);
            node.tags = rebuild(&current.tags, rest, edit)?;

            let mut next = tags.clone();
            next.insert((*segment).to_string(), Arc::new(node));
            Some(next)
        }
    }
}
