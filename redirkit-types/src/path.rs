//! Root-relative, extension-free site paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bytes escaped inside one URL path segment, quotes included
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'/');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path '{0}' escapes the site root")]
    ParentSegment(String),
}

/// A site path split into segments.
///
/// Ordering compares segment by segment, so `a/b` sorts before `a-b`
/// and `a/b/c` sorts right after `a/b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocPath(Vec<String>);

impl DocPath {
    /// Parse a slash-separated path.
    ///
    /// Leading/trailing slashes, empty segments and `.` are dropped and
    /// backslashes count as separators. `..` is rejected.
    ///
    /// ```
    /// use redirkit_types::DocPath;
    ///
    /// let path = DocPath::parse("/x//y/").unwrap();
    /// assert_eq!(path.to_string(), "/x/y");
    /// assert_eq!(path.as_relative(), "x/y");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments = raw
            .trim()
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();
        Self::from_segments(segments).map_err(|err| match err {
            PathError::ParentSegment(_) => PathError::ParentSegment(raw.to_string()),
            other => other,
        })
    }

    pub fn from_segments(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || *s == "." || *s == ".." || s.contains(['/', '\\']))
        {
            return Err(PathError::ParentSegment(bad.clone()));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path without a leading slash, e.g. `a/b/c`
    pub fn as_relative(&self) -> String {
        self.0.join("/")
    }

    /// Percent-encoded form for use in a URL, e.g. `/it%27s/a%23b`.
    ///
    /// ```
    /// use redirkit_types::DocPath;
    ///
    /// let path = DocPath::parse("notes/q?x").unwrap();
    /// assert_eq!(path.to_url_path(), "/notes/q%3Fx");
    /// ```
    pub fn to_url_path(&self) -> String {
        self.0
            .iter()
            .map(|segment| format!("/{}", utf8_percent_encode(segment, SEGMENT)))
            .collect()
    }

    /// Relative file path with the given extension appended, e.g. `x/y.html`
    pub fn with_extension(&self, extension: &str) -> String {
        format!("{}.{}", self.as_relative(), extension.trim_start_matches('.'))
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for DocPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocPath> for String {
    fn from(path: DocPath) -> Self {
        path.as_relative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_separators() {
        let path = DocPath::parse(" \\a\\b/./c/ ").unwrap();
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(path.to_string(), "/a/b/c");
    }

    #[test]
    fn test_parse_rejects_empty_and_parent() {
        assert_eq!(DocPath::parse(""), Err(PathError::Empty));
        assert_eq!(DocPath::parse("///"), Err(PathError::Empty));
        assert_eq!(
            DocPath::parse("a/../b"),
            Err(PathError::ParentSegment("a/../b".to_string()))
        );
    }

    #[test]
    fn test_segment_ordering() {
        let mut paths = vec![
            DocPath::parse("a-b").unwrap(),
            DocPath::parse("a/b/c").unwrap(),
            DocPath::parse("a/b").unwrap(),
        ];
        paths.sort();
        let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["/a/b", "/a/b/c", "/a-b"]);
    }

    #[test]
    fn test_url_path_encodes_segments() {
        let path = DocPath::parse("it's/a#b/100% done").unwrap();
        assert_eq!(path.to_url_path(), "/it%27s/a%23b/100%25%20done");
        assert_eq!(DocPath::parse("^.c/café").unwrap().to_url_path(), "/^.c/caf%C3%A9");
        assert_eq!(DocPath::parse("a/b-c_d.e").unwrap().to_url_path(), "/a/b-c_d.e");
    }

    #[test]
    fn test_with_extension() {
        let path = DocPath::parse("x/y").unwrap();
        assert_eq!(path.with_extension("html"), "x/y.html");
        assert_eq!(path.with_extension(".htm"), "x/y.htm");
    }
}
