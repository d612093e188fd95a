//! Reserved pseudo-tags
//!
//! Pseudo-tags name computed views ("all notes", "trash", ...) rather than
//! stored tree nodes. Their identifiers share the active-path namespace with
//! concrete tag paths, so the exact spelling is part of the persisted format.

use std::fmt;

/// A reserved view identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoTag {
    /// Fallback selection when nothing else is valid
    Default,
    /// Every note
    All,
    /// Favorited notes
    Favorites,
    /// Notes filed under the notebooks scope
    Notebooks,
    /// Notes carrying at least one tag
    Tags,
    /// Notes filed under the templates scope
    Templates,
    /// Notes carrying no tag
    Untagged,
    /// Deleted notes
    Trash,
}

impl PseudoTag {
    /// Every reserved identifier
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::All,
        Self::Favorites,
        Self::Notebooks,
        Self::Tags,
        Self::Templates,
        Self::Untagged,
        Self::Trash,
    ];

    /// The identifier as stored in the active path
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::All => "ALL",
            Self::Favorites => "FAVORITES",
            Self::Notebooks => "NOTEBOOKS",
            Self::Tags => "TAGS",
            Self::Templates => "TEMPLATES",
            Self::Untagged => "UNTAGGED",
            Self::Trash => "TRASH",
        }
    }

    /// Parse an active path as a pseudo-tag
    ///
    /// # Examples
    /// ```
    /// # use tagtree::session::PseudoTag;
    /// assert_eq!(PseudoTag::parse("TRASH"), Some(PseudoTag::Trash));
    /// assert_eq!(PseudoTag::parse("work/trash"), None);
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == path)
    }
}

impl fmt::Display for PseudoTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
