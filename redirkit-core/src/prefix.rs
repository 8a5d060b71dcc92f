//! Escape-prefix detection on destination paths.
//!
//! A segment starting with the escape prefix (default `^`) is published
//! under its literal name, and the host is told to redirect the unmarked
//! name there. `^.well-known/x` produces `/.well-known /^.well-known`.

use crate::models::{RedirectKind, RedirectMapping};
use redirkit_types::DocPath;
use std::collections::BTreeMap;

/// Find the prefix redirect for one destination path.
///
/// Only the outer-most marked segment counts: the mapping covers the path
/// up to and including that segment, and markers deeper in the path are
/// left alone.
///
/// ```
/// use redirkit_core::prefix::match_prefix;
/// use redirkit_types::DocPath;
///
/// let path = DocPath::parse("a/b/^.c/d/^.e").unwrap();
/// let mapping = match_prefix(&path, "^").unwrap();
/// assert_eq!(mapping.rule_line(), "/a/b/.c /a/b/^.c");
/// ```
pub fn match_prefix(destination: &DocPath, prefix: &str) -> Option<RedirectMapping> {
    if prefix.is_empty() {
        return None;
    }

    let segments = destination.segments();
    let depth = segments.iter().position(|s| s.starts_with(prefix))?;

    let matched = &segments[..=depth];
    let stripped = &matched[depth][prefix.len()..];
    if stripped.is_empty() {
        tracing::warn!(
            "Segment '{}' in {} is only the escape prefix; no redirect generated",
            matched[depth],
            destination
        );
        return None;
    }

    let mut source_segments = matched[..depth].to_vec();
    source_segments.push(stripped.to_string());

    let target = DocPath::from_segments(matched.to_vec()).ok()?;
    let source = DocPath::from_segments(source_segments).ok()?;
    RedirectMapping::new(source, target, RedirectKind::Prefix)
}

/// Collapse prefix mappings to one per target, sorted by target.
///
/// Every document under the same marked segment produces the same mapping,
/// so the first one seen is kept.
pub fn collect_prefix_redirects<I>(mappings: I) -> Vec<RedirectMapping>
where
    I: IntoIterator<Item = RedirectMapping>,
{
    let mut by_target: BTreeMap<DocPath, RedirectMapping> = BTreeMap::new();
    for mapping in mappings {
        by_target.entry(mapping.target.clone()).or_insert(mapping);
    }
    by_target.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(raw: &str, prefix: &str) -> Option<String> {
        match_prefix(&DocPath::parse(raw).unwrap(), prefix).map(|m| m.rule_line())
    }

    #[test]
    fn test_top_level_folder() {
        assert_eq!(matched("^.a/c", "^").as_deref(), Some("/.a /^.a"));
    }

    #[test]
    fn test_file_segments_match() {
        assert_eq!(matched("^.a", "^").as_deref(), Some("/.a /^.a"));
        assert_eq!(matched("fizz/^.a", "^").as_deref(), Some("/fizz/.a /fizz/^.a"));
    }

    #[test]
    fn test_nested_folder_keeps_parents() {
        assert_eq!(
            matched("a/b/^.c/d/e/f", "^").as_deref(),
            Some("/a/b/.c /a/b/^.c")
        );
    }

    #[test]
    fn test_outer_marker_wins() {
        assert_eq!(
            matched("a/b/^.c/d/^.e", "^").as_deref(),
            Some("/a/b/.c /a/b/^.c")
        );
    }

    #[test]
    fn test_alternate_prefix() {
        assert_eq!(matched("foo.a/c", "foo").as_deref(), Some("/.a /foo.a"));
        assert_eq!(matched("^.a/c", "foo"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(matched("d/e", "^"), None);
        assert_eq!(matched("a^/b", "^"), None);
        assert_eq!(matched("^.a", ""), None);
    }

    #[test]
    fn test_bare_prefix_segment() {
        assert_eq!(matched("a/^/b", "^"), None);
    }

    #[test]
    fn test_collect_dedupes_and_sorts() {
        let found = ["x/^.b/1", "a/^.c/d/e/f", "a/^.c/d/g", "x/^.b/2"]
            .iter()
            .filter_map(|raw| match_prefix(&DocPath::parse(raw).unwrap(), "^"));
        let lines: Vec<String> = collect_prefix_redirects(found)
            .iter()
            .map(RedirectMapping::rule_line)
            .collect();
        assert_eq!(lines, vec!["/a/.c /a/^.c", "/x/.b /x/^.b"]);
    }
}
