//! Redirect model structs: mappings, the collected set, and output artifacts.

use redirkit_types::DocPath;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a redirect was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectKind {
    /// Declared through redirect-from metadata
    Automatic,
    /// Derived from an escape-prefixed path segment
    Prefix,
}

impl RedirectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectKind::Automatic => "automatic",
            RedirectKind::Prefix => "prefix",
        }
    }
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single redirect from `source` to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedirectMapping {
    pub source: DocPath,
    pub target: DocPath,
    pub kind: RedirectKind,
}

impl RedirectMapping {
    /// Build a mapping, or None when it would redirect a path to itself
    pub fn new(source: DocPath, target: DocPath, kind: RedirectKind) -> Option<Self> {
        if source == target {
            None
        } else {
            Some(Self {
                source,
                target,
                kind,
            })
        }
    }

    /// Rules-file line: `/source /target`
    pub fn rule_line(&self) -> String {
        format!("{} {}", self.source, self.target)
    }
}

/// Every redirect gathered across a build, deduplicated and sorted.
///
/// `prefix` is ordered by target and `automatic` by source; both orders
/// are fixed so repeated builds produce identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectSet {
    pub prefix: Vec<RedirectMapping>,
    pub automatic: Vec<RedirectMapping>,
}

impl RedirectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.automatic.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefix.len() + self.automatic.len()
    }

    /// Prefix mappings first, then automatic ones
    pub fn iter(&self) -> impl Iterator<Item = &RedirectMapping> {
        self.prefix.iter().chain(self.automatic.iter())
    }
}

/// Kind of generated output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Meta-refresh HTML page
    ClientRedirect,
    /// Server-side rules file
    RulesFile,
}

/// A generated file, handed back to the caller to write out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Output-relative path using `/` separators, e.g. `x/y.html`
    pub destination: String,
    pub content: String,
    pub kind: ArtifactKind,
}

/// A user-authored rules file found at the input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRules {
    /// Input-relative path, reused as the artifact destination
    pub path: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> DocPath {
        DocPath::parse(raw).unwrap()
    }

    #[test]
    fn test_self_redirect_is_rejected() {
        assert!(RedirectMapping::new(path("a/b"), path("/a/b/"), RedirectKind::Automatic).is_none());
    }

    #[test]
    fn test_rule_line() {
        let mapping =
            RedirectMapping::new(path("x/y"), path("a/b/c"), RedirectKind::Automatic).unwrap();
        assert_eq!(mapping.rule_line(), "/x/y /a/b/c");
    }

    #[test]
    fn test_set_iterates_prefix_first() {
        let set = RedirectSet {
            prefix: vec![RedirectMapping::new(path(".a"), path("^.a"), RedirectKind::Prefix).unwrap()],
            automatic: vec![
                RedirectMapping::new(path("x"), path("y"), RedirectKind::Automatic).unwrap(),
            ],
        };
        let kinds: Vec<RedirectKind> = set.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![RedirectKind::Prefix, RedirectKind::Automatic]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
