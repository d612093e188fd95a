//! Tag path addressing
//!
//! A tag path is a sequence of segments joined by [`SEPARATOR`]. Segment 0 is a
//! child of the root, the last segment is the tag's own name:
//! - `work` → a top-level tag
//! - `work/clients/acme` → `acme`, nested under `work/clients`
//!
//! Segment contents are not validated. Keeping [`SEPARATOR`] out of tag names
//! is the caller's responsibility.

/// Reserved delimiter between path segments
pub const SEPARATOR: char = '/';

/// Split a path into its segments
///
/// The empty path has no segments.
///
/// # Examples
/// ```
/// # use tagtree::path::split;
/// assert_eq!(split("a/b/c"), vec!["a", "b", "c"]);
/// assert!(split("").is_empty());
/// ```
#[must_use]
pub fn split(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(SEPARATOR).collect()
}

/// Join segments back into a path
///
/// # Examples
/// ```
/// # use tagtree::path::join;
/// assert_eq!(join(&["a", "b"]), "a/b");
/// ```
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// The segments of a path's ancestor chain (everything but the last segment)
#[must_use]
pub fn parent_segments(path: &str) -> Vec<&str> {
    let mut segments = split(path);
    segments.pop();
    segments
}

/// Parent path, or `None` for top-level tags and the empty path
///
/// # Examples
/// ```
/// # use tagtree::path::parent;
/// assert_eq!(parent("a/b/c"), Some("a/b"));
/// assert_eq!(parent("a"), None);
/// ```
#[must_use]
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Last segment of a path
///
/// # Examples
/// ```
/// # use tagtree::path::name;
/// assert_eq!(name("a/b/c"), "c");
/// assert_eq!(name("a"), "a");
/// ```
#[must_use]
pub fn name(path: &str) -> &str {
    path.rsplit_once(SEPARATOR).map_or(path, |(_, name)| name)
}

/// Number of segments in a path
#[must_use]
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.matches(SEPARATOR).count() + 1
    }
}

/// Whether `path` lies strictly below `ancestor`
///
/// # Examples
/// ```
/// # use tagtree::path::is_descendant;
/// assert!(is_descendant("a/b", "a"));
/// assert!(!is_descendant("a", "a"));
/// assert!(!is_descendant("ab", "a"));
/// ```
#[must_use]
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.starts_with(ancestor) && path[ancestor.len()..].starts_with(SEPARATOR)
}

/// Check if a tag falls within a scope (the scope itself or anything below it)
///
/// # Examples
/// ```
/// # use tagtree::path::pattern_matches;
/// assert!(pattern_matches("notebooks", "notebooks"));
/// assert!(pattern_matches("notebooks", "notebooks/work"));
/// assert!(!pattern_matches("notebooks", "notebooksx"));
/// ```
#[must_use]
pub fn pattern_matches(scope: &str, tag: &str) -> bool {
    scope == tag || is_descendant(tag, scope)
}
