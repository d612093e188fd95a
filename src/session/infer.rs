//! Selection inference from the selected note
//!
//! When the selected note changes, the active tag may no longer show it. The
//! current selection is kept whenever it still covers the note:
//!
//! | active      | kept when                          |
//! |-------------|------------------------------------|
//! | `ALL`       | always                             |
//! | `FAVORITES` | the note is favorited              |
//! | `TAGS`      | the note has at least one tag      |
//! | `UNTAGGED`  | the note has no tags               |
//! | `NOTEBOOKS` | the note carries a notebook tag    |
//! | `TEMPLATES` | the note carries a template tag    |
//! | `TRASH`     | the note is deleted                |
//! | tag path    | the note carries that tag or below |
//!
//! Otherwise the first match wins: no note → `ALL`, a template tag, a notebook
//! tag, `FAVORITES`, `ALL` for tagged notes, and finally `UNTAGGED`.

use super::{PseudoTag, Result, TagSession, TaggedNote};
use crate::config::ScopeRoots;
use crate::store::TreeStore;

/// Decide what the active selection should become for `note`
///
/// Returns `None` when `active` should be kept.
///
/// # Examples
/// ```
/// # use tagtree::config::ScopeRoots;
/// # use tagtree::session::{TaggedNote, infer_selection};
/// struct Note(Vec<String>);
///
/// impl TaggedNote for Note {
///     fn tags(&self) -> &[String] {
///         &self.0
///     }
///     fn is_favorited(&self) -> bool {
///         false
///     }
///     fn is_deleted(&self) -> bool {
///         false
///     }
/// }
///
/// let note = Note(vec!["notebooks/journal".into(), "templates/meeting".into()]);
/// let scopes = ScopeRoots::default();
///
/// let next = infer_selection("TRASH", Some(&note), &scopes);
/// assert_eq!(next.as_deref(), Some("templates/meeting"));
///
/// // The notebooks view still covers the note
/// assert_eq!(infer_selection("NOTEBOOKS", Some(&note), &scopes), None);
/// ```
#[must_use]
pub fn infer_selection<N>(active: &str, note: Option<&N>, scopes: &ScopeRoots) -> Option<String>
where
    N: TaggedNote + ?Sized,
{
    let tags = note.map(|note| note.tags()).unwrap_or_default();
    let favorited = note.is_some_and(|note| note.is_favorited());
    let deleted = note.is_some_and(|note| note.is_deleted());

    let keep = match PseudoTag::parse(active) {
        Some(PseudoTag::All) => true,
        Some(PseudoTag::Favorites) => favorited,
        Some(PseudoTag::Tags) => !tags.is_empty(),
        Some(PseudoTag::Untagged) => tags.is_empty(),
        Some(PseudoTag::Trash) => deleted,
        Some(PseudoTag::Notebooks) => {
            note.is_some_and(|note| !note.tags_in_scope(&scopes.notebooks).is_empty())
        }
        Some(PseudoTag::Templates) => {
            note.is_some_and(|note| !note.tags_in_scope(&scopes.templates).is_empty())
        }
        _ => note.is_some_and(|note| !note.tags_in_scope(active).is_empty()),
    };
    if keep {
        return None;
    }

    let Some(note) = note else {
        return Some(PseudoTag::All.to_string());
    };

    if let Some(tag) = note.tags_in_scope(&scopes.templates).first() {
        return Some((*tag).to_string());
    }
    if let Some(tag) = note.tags_in_scope(&scopes.notebooks).first() {
        return Some((*tag).to_string());
    }

    let next = if favorited {
        PseudoTag::Favorites
    } else if !tags.is_empty() {
        PseudoTag::All
    } else {
        PseudoTag::Untagged
    };
    Some(next.to_string())
}

impl<S: TreeStore> TagSession<S> {
    /// Re-evaluate the active selection for a newly selected note
    ///
    /// Returns whether the selection was changed. A changed selection goes
    /// through [`set_active`](Self::set_active), so an inferred tag that does
    /// not exist in the tree still ends up as `DEFAULT`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if selecting the inferred tag fails.
    pub fn infer_for_note<N>(&mut self, note: Option<&N>) -> Result<bool>
    where
        N: TaggedNote + ?Sized,
    {
        match infer_selection(&self.active, note, &self.scopes) {
            Some(next) => {
                tracing::debug!(from = %self.active, to = %next, "selection inferred from note");
                self.set_active(&next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::{TestNote, sample_tree};
    use crate::tree::TagNode;

    fn infer(active: &str, note: Option<&TestNote>) -> Option<String> {
        infer_selection(active, note, &ScopeRoots::default())
    }

    #[test]
    fn test_all_is_always_kept() {
        assert_eq!(infer("ALL", None), None);
        assert_eq!(infer("ALL", Some(&TestNote::tagged(["x"]))), None);
    }

    #[test]
    fn test_keeps_matching_pseudo_tags() {
        assert_eq!(infer("FAVORITES", Some(&TestNote::untagged().favorited())), None);
        assert_eq!(infer("TAGS", Some(&TestNote::tagged(["x"]))), None);
        assert_eq!(infer("UNTAGGED", Some(&TestNote::untagged())), None);
        assert_eq!(infer("TRASH", Some(&TestNote::untagged().deleted())), None);
    }

    #[test]
    fn test_keeps_concrete_tag_and_ancestors() {
        let note = TestNote::tagged(["work/clients/acme"]);
        assert_eq!(infer("work/clients/acme", Some(&note)), None);
        assert_eq!(infer("work", Some(&note)), None);
        assert_eq!(infer("work/reports", Some(&note)), Some("ALL".to_string()));
    }

    #[test]
    fn test_keeps_scope_views() {
        let journal = TestNote::tagged(["notebooks/journal"]);
        let meeting = TestNote::tagged(["templates/meeting"]);

        assert_eq!(infer("NOTEBOOKS", Some(&journal)), None);
        assert_eq!(infer("TEMPLATES", Some(&meeting)), None);
        assert_eq!(infer("NOTEBOOKS", Some(&meeting)), Some("templates/meeting".to_string()));
        assert_eq!(infer("TEMPLATES", Some(&journal)), Some("notebooks/journal".to_string()));
        assert_eq!(infer("NOTEBOOKS", None), Some("ALL".to_string()));
    }

    #[test]
    fn test_scope_views_follow_configured_roots() {
        let scopes = ScopeRoots {
            notebooks: "Notebooks".to_string(),
            templates: "Templates".to_string(),
        };
        let note = TestNote::tagged(["Notebooks/Work"]);
        assert_eq!(infer_selection("NOTEBOOKS", Some(&note), &scopes), None);

        let note = TestNote::tagged(["notebooks/work"]);
        assert_eq!(
            infer_selection("NOTEBOOKS", Some(&note), &scopes),
            Some("ALL".to_string())
        );
    }

    #[test]
    fn test_no_note_selects_all() {
        assert_eq!(infer("TRASH", None), Some("ALL".to_string()));
        assert_eq!(infer("work", None), Some("ALL".to_string()));
        assert_eq!(infer("DEFAULT", None), Some("ALL".to_string()));
    }

    #[test]
    fn test_untagged_kept_without_note() {
        assert_eq!(infer("UNTAGGED", None), None);
    }

    #[test]
    fn test_templates_beat_notebooks() {
        let note = TestNote::tagged(["notebooks/y", "templates/x"]).favorited();
        assert_eq!(infer("TRASH", Some(&note)), Some("templates/x".to_string()));
    }

    #[test]
    fn test_notebooks_beat_favorites() {
        let note = TestNote::tagged(["misc", "notebooks/journal"]).favorited();
        assert_eq!(infer("UNTAGGED", Some(&note)), Some("notebooks/journal".to_string()));
    }

    #[test]
    fn test_favorites_beat_generic_tags() {
        let note = TestNote::tagged(["misc"]).favorited();
        assert_eq!(infer("TRASH", Some(&note)), Some("FAVORITES".to_string()));
    }

    #[test]
    fn test_tagged_note_selects_all() {
        let note = TestNote::tagged(["misc"]);
        assert_eq!(infer("UNTAGGED", Some(&note)), Some("ALL".to_string()));
    }

    #[test]
    fn test_untagged_note_selects_untagged() {
        let note = TestNote::untagged();
        assert_eq!(infer("TAGS", Some(&note)), Some("UNTAGGED".to_string()));
    }

    #[test]
    fn test_custom_scope_roots() {
        let scopes = ScopeRoots {
            notebooks: "Notebooks".to_string(),
            templates: "Templates".to_string(),
        };
        let note = TestNote::tagged(["templates/x", "Notebooks/Work"]);
        assert_eq!(
            infer_selection("TRASH", Some(&note), &scopes),
            Some("Notebooks/Work".to_string())
        );
    }

    #[test]
    fn test_session_applies_inferred_tag() {
        let (tree, _) = sample_tree().with_added(TagNode::new("templates"));
        let (tree, _) = tree.unwrap().with_added(TagNode::new("templates/x"));
        let store = MemoryStore::new(tree.unwrap());
        let mut session = TagSession::new(store);
        session.set_active("TRASH").unwrap();

        let note = TestNote::tagged(["notebooks/y", "templates/x"]);
        assert!(session.infer_for_note(Some(&note)).unwrap());
        assert_eq!(session.active(), "templates/x");

        assert!(!session.infer_for_note(Some(&note)).unwrap());
    }

    #[test]
    fn test_session_inferred_missing_tag_falls_back() {
        let mut session = TagSession::new(MemoryStore::new(sample_tree()));
        session.set_active("work").unwrap();

        let note = TestNote::tagged(["notebooks/ghost"]);
        assert!(session.infer_for_note(Some(&note)).unwrap());
        assert_eq!(session.active(), "DEFAULT");
    }
}
