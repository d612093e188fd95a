//! Tag nodes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::path;

/// Child mapping of a node: tag name → shared child node
pub type Tags = BTreeMap<String, Arc<TagNode>>;

/// A single tag in the tree
///
/// Children are held behind `Arc` so that copies of a tree share every subtree
/// they did not modify. Two nodes denote the same tag iff their paths are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TagNode {
    /// Last path segment
    pub name: String,
    /// Full tag path (e.g., "work/clients/acme")
    pub path: String,
    /// Whether the node is collapsed in the sidebar
    #[serde(default)]
    pub collapsed: bool,
    /// Child tags keyed by name
    #[serde(default)]
    pub tags: Tags,
    /// Notes filed directly under this tag
    #[serde(default)]
    pub notes: Vec<String>,
}

impl TagNode {
    /// Create an empty, expanded node for `path`
    ///
    /// # Examples
    /// ```
    /// # use tagtree::tree::TagNode;
    /// let node = TagNode::new("work/clients");
    /// assert_eq!(node.name, "clients");
    /// assert!(node.tags.is_empty());
    /// ```
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: path::name(&path).to_string(),
            path,
            ..Self::default()
        }
    }

    /// Builder-style helper attaching notes
    #[must_use]
    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper attaching a child node
    ///
    /// The child is keyed by its own name; its path is not checked against ours.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.tags.insert(child.name.clone(), Arc::new(child));
        self
    }

    /// Whether the node has at least one child tag
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Copy of this subtree moved under `new_path`
    ///
    /// The node's own name and path and the path of every descendant are
    /// rewritten. All nodes of the returned subtree are freshly allocated.
    #[must_use]
    pub fn rebased(&self, new_path: &str) -> Self {
        let tags = self
            .tags
            .values()
            .map(|child| {
                let child_path = path::join(&[new_path, child.name.as_str()]);
                (child.name.clone(), Arc::new(child.rebased(&child_path)))
            })
            .collect();

        Self {
            name: path::name(new_path).to_string(),
            path: new_path.to_string(),
            collapsed: self.collapsed,
            tags,
            notes: self.notes.clone(),
        }
    }

    /// Depth-first iterator over this node and its descendants in key order
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`TagNode::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a TagNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TagNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.tags.values().rev().map(|child| &**child));
        Some(node)
    }
}
