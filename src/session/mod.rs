//! Tag session: tree operations bound to a store, plus the active selection
//!
//! A [`TagSession`] owns the single "currently active tag" and keeps it
//! consistent with the tree:
//!
//! ```text
//! set_active(path)
//!     ↓
//! path resolves? ── no ──→ DEFAULT
//!     ↓
//! commit active path
//!     ↓
//! hooks: refresh_search → scroll_to_tag → rescroll_note
//! ```
//!
//! Tree mutations re-read the store, rebuild the path they touch (see
//! [`crate::tree`]) and write the new snapshot back before returning, so
//! operations issued one after another apply in order.

pub mod error;
pub mod hooks;
pub mod infer;
pub mod pseudo;

pub use error::{Result, SessionError};
pub use hooks::{HookResult, RenderedTag, SessionHooks, TagView, TaggedNote};
pub use infer::infer_selection;
pub use pseudo::PseudoTag;

use std::sync::Arc;

use crate::config::ScopeRoots;
use crate::path;
use crate::store::TreeStore;
use crate::tree::{MutationOutcome, TagNode, TagTree, Tags};

/// Session over a tag tree store
pub struct TagSession<S: TreeStore> {
    store: S,
    active: String,
    scopes: ScopeRoots,
    hooks: Vec<Box<dyn SessionHooks>>,
}

impl<S: TreeStore> TagSession<S> {
    /// Create a session with `DEFAULT` selected and default scope roots
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            active: PseudoTag::Default.as_str().to_string(),
            scopes: ScopeRoots::default(),
            hooks: Vec::new(),
        }
    }

    /// Use custom scope roots for notebook/template inference
    #[must_use]
    pub fn with_scopes(mut self, scopes: ScopeRoots) -> Self {
        self.scopes = scopes;
        self
    }

    /// Register a hook (builder style)
    #[must_use]
    pub fn with_hook(mut self, hook: impl SessionHooks + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Register a hook
    pub fn add_hook(&mut self, hook: Box<dyn SessionHooks>) {
        self.hooks.push(hook);
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Currently active tag path or pseudo-tag identifier
    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Configured scope roots
    #[must_use]
    pub const fn scopes(&self) -> &ScopeRoots {
        &self.scopes
    }

    /// Current tree snapshot
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn tree(&self) -> Result<TagTree> {
        Ok(self.store.read()?)
    }

    /// Store `tag` under its parent, overwriting an entry of the same name
    ///
    /// Does nothing when the parent chain is incomplete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read or written.
    pub fn add(&self, tag: TagNode) -> Result<MutationOutcome> {
        let path = tag.path.clone();
        let (next, outcome) = self.tree()?.with_added(tag);
        self.commit(next, outcome, "add", &path)
    }

    /// Remove `tag` (and its subtree) from its parent
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read or written.
    pub fn delete(&self, tag: &TagNode) -> Result<MutationOutcome> {
        let (next, outcome) = self.tree()?.with_deleted(tag);
        self.commit(next, outcome, "delete", &tag.path)
    }

    /// Replace `tag` with `next`
    ///
    /// With equal paths this is an in-place update; otherwise `tag` is deleted
    /// first and `next` added at its own path. The outcome of the add is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read or written.
    pub fn replace(&self, tag: &TagNode, next: TagNode) -> Result<MutationOutcome> {
        if tag.path != next.path {
            self.delete(tag)?;
        }
        self.add(next)
    }

    fn commit(
        &self,
        next: Option<TagTree>,
        outcome: MutationOutcome,
        op: &str,
        path: &str,
    ) -> Result<MutationOutcome> {
        match next {
            Some(tree) => {
                self.store.write(tree)?;
                tracing::debug!(op, path, "tag tree updated");
            }
            None => tracing::debug!(op, path, ?outcome, "tag tree left unchanged"),
        }
        Ok(outcome)
    }

    /// Node stored at `path`
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn get(&self, path: &str) -> Result<Option<Arc<TagNode>>> {
        Ok(self.tree()?.get(path).cloned())
    }

    /// Notes filed under `path`
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn notes(&self, path: &str) -> Result<Vec<String>> {
        Ok(self.tree()?.notes(path).to_vec())
    }

    /// Child tags of `path`, empty if it doesn't resolve
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn tags(&self, path: &str) -> Result<Tags> {
        Ok(self.tree()?.tags(path).cloned().unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn has_children(&self, path: &str) -> Result<bool> {
        Ok(self.tree()?.has_children(path))
    }

    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn is_collapsed(&self, path: &str) -> Result<bool> {
        Ok(self.tree()?.is_collapsed(path))
    }

    /// Whether `path` may become the active selection
    ///
    /// Pseudo-tags are always selectable; concrete paths must resolve.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read.
    pub fn is_selectable(&self, path: &str) -> Result<bool> {
        if PseudoTag::parse(path).is_some() {
            return Ok(true);
        }
        Ok(self.tree()?.contains(path))
    }

    /// Make `path` the active selection, falling back to `DEFAULT`
    ///
    /// The path is validated and committed before any hook runs, so hooks
    /// observe the corrected path.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store cannot be read or a search refresh fails.
    pub fn set_active(&mut self, path: &str) -> Result<()> {
        self.active = if self.is_selectable(path)? {
            path.to_string()
        } else {
            tracing::info!(path, "active tag does not exist, falling back to DEFAULT");
            PseudoTag::Default.as_str().to_string()
        };
        tracing::debug!(active = %self.active, "active tag set");

        for hook in &mut self.hooks {
            hook.refresh_search(&self.active)
                .map_err(|e| SessionError::HookError(e.to_string()))?;
        }
        if !self.active.is_empty() {
            for hook in &mut self.hooks {
                hook.scroll_to_tag(&self.active);
            }
        }
        for hook in &mut self.hooks {
            hook.rescroll_note();
        }

        Ok(())
    }

    /// Flip (or force) the collapsed flag of the node at `path`
    ///
    /// If the active tag sits below `path`, the selection moves up to `path`.
    /// A missing node is left alone and reported as `Unchanged`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store fails or re-selecting fails.
    pub fn toggle_collapse(&mut self, path: &str, force: Option<bool>) -> Result<MutationOutcome> {
        let tree = self.tree()?;
        let Some(node) = tree.get(path) else {
            return Ok(MutationOutcome::Unchanged);
        };

        let mut next = TagNode::clone(node);
        next.collapsed = force.unwrap_or(!node.collapsed);
        let outcome = self.replace(node, next)?;

        if path::is_descendant(&self.active, path) {
            self.set_active(path)?;
        }

        Ok(outcome)
    }

    /// Reset the selection to `DEFAULT` if the active tag no longer resolves
    ///
    /// Meant to run after external changes to the tree.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the store fails or a hook fails.
    pub fn update(&mut self) -> Result<()> {
        if self.is_selectable(&self.active)? {
            return Ok(());
        }

        tracing::info!(active = %self.active, "active tag vanished, resetting");
        self.set_active(PseudoTag::Default.as_str())?;

        for hook in &mut self.hooks {
            hook.revalidate_note()
                .map_err(|e| SessionError::HookError(e.to_string()))?;
        }

        Ok(())
    }

    /// Move the selection `modifier` steps through the rendered tag list
    ///
    /// With `wrap` the index wraps around the list; without it, stepping past
    /// either end does nothing. Nothing happens when the list is empty or has
    /// no active element. Returns whether a new tag was selected.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if selecting the target fails.
    pub fn navigate<V>(&mut self, view: &V, modifier: isize, wrap: bool) -> Result<bool>
    where
        V: TagView + ?Sized,
    {
        let tags = view.rendered_tags();
        let Some(current) = tags.iter().position(|tag| tag.active) else {
            return Ok(false);
        };

        #[allow(clippy::cast_possible_wrap)]
        let (index, len) = (current as isize + modifier, tags.len() as isize);
        let index = if wrap { index.rem_euclid(len) } else { index };

        let target = usize::try_from(index).ok().and_then(|i| tags.get(i));
        match target {
            Some(tag) if !tag.path.is_empty() => {
                self.set_active(&tag.path)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Select the previous rendered tag, wrapping around
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if selecting the target fails.
    pub fn previous<V: TagView + ?Sized>(&mut self, view: &V) -> Result<bool> {
        self.navigate(view, -1, true)
    }

    /// Select the next rendered tag, wrapping around
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if selecting the target fails.
    pub fn next<V: TagView + ?Sized>(&mut self, view: &V) -> Result<bool> {
        self.navigate(view, 1, true)
    }
}
