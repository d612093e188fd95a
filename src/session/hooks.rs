//! Collaborator traits at the session boundary
//!
//! The session never reaches into the rest of the application directly. It
//! reads notes through [`TaggedNote`], the rendered sidebar through [`TagView`],
//! and announces selection changes to registered [`SessionHooks`].

use std::error::Error;

use crate::path;

/// Result returned by fallible hooks
pub type HookResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

/// Observer notified when the active tag changes
///
/// Every method has a no-op default so implementors only override what they
/// care about. Hooks run in registration order.
pub trait SessionHooks {
    /// Refresh search results for the new active tag
    ///
    /// Runs after the new path has been committed. A failure aborts the
    /// remaining notifications and is returned to the caller.
    fn refresh_search(&mut self, _active: &str) -> HookResult {
        Ok(())
    }

    /// Bring the sidebar element for `active` into view
    fn scroll_to_tag(&mut self, _active: &str) {}

    /// Re-scroll the note list after a selection change
    fn rescroll_note(&mut self) {}

    /// Re-validate the selected note after the active tag was reset
    fn revalidate_note(&mut self) -> HookResult {
        Ok(())
    }
}

/// An entry of the rendered tag list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTag {
    /// Tag path (or pseudo-tag identifier) the element represents
    pub path: String,
    /// Whether the element is highlighted as active
    pub active: bool,
}

impl RenderedTag {
    /// Create a rendered entry
    #[must_use]
    pub fn new(path: impl Into<String>, active: bool) -> Self {
        Self {
            path: path.into(),
            active,
        }
    }
}

/// Read access to the tag list as currently rendered
pub trait TagView {
    /// Rendered tag elements in display order
    fn rendered_tags(&self) -> Vec<RenderedTag>;
}

impl TagView for [RenderedTag] {
    fn rendered_tags(&self) -> Vec<RenderedTag> {
        self.to_vec()
    }
}

impl TagView for Vec<RenderedTag> {
    fn rendered_tags(&self) -> Vec<RenderedTag> {
        self.clone()
    }
}

/// Trait for note types the session can reason about
///
/// # Examples
///
/// ```ignore
/// impl TaggedNote for MyNote {
///     fn tags(&self) -> &[String] { &self.tags }
///     fn is_favorited(&self) -> bool { self.favorited }
///     fn is_deleted(&self) -> bool { self.deleted }
/// }
/// ```
pub trait TaggedNote {
    /// Tag paths attached to the note
    fn tags(&self) -> &[String];

    /// Whether the note is marked as favorite
    fn is_favorited(&self) -> bool;

    /// Whether the note sits in the trash
    fn is_deleted(&self) -> bool;

    /// Tags of the note that fall within `scope` (the scope tag or its descendants)
    fn tags_in_scope(&self, scope: &str) -> Vec<&str> {
        self.tags()
            .iter()
            .map(String::as_str)
            .filter(|tag| path::pattern_matches(scope, tag))
            .collect()
    }
}

impl<T: TaggedNote + ?Sized> TaggedNote for &T {
    fn tags(&self) -> &[String] {
        (**self).tags()
    }

    fn is_favorited(&self) -> bool {
        (**self).is_favorited()
    }

    fn is_deleted(&self) -> bool {
        (**self).is_deleted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestNote;

    #[test]
    fn test_tags_in_scope() {
        let note = TestNote::tagged(["notebooks/work", "notebooks", "templates/x", "notebooksx"]);
        assert_eq!(note.tags_in_scope("notebooks"), vec!["notebooks/work", "notebooks"]);
        assert_eq!(note.tags_in_scope("templates"), vec!["templates/x"]);
        assert!(note.tags_in_scope("trash").is_empty());
    }

    #[test]
    fn test_slice_view() {
        let view = vec![RenderedTag::new("a", false), RenderedTag::new("b", true)];
        assert_eq!(view.rendered_tags().len(), 2);
        assert!(view.as_slice().rendered_tags()[1].active);
    }
}
