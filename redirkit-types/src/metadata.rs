//! Typed metadata bag with case-insensitive keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("metadata key '{key}' must be a string or a list of strings, found {found}")]
    UnexpectedShape { key: String, found: &'static str },
}

/// A single metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<MetaValue>),
    Table(BTreeMap<String, MetaValue>),
}

impl MetaValue {
    pub fn kind(&self) -> &'static str {
        match self {
            MetaValue::Null => "null",
            MetaValue::Bool(_) => "bool",
            MetaValue::Number(_) => "number",
            MetaValue::Text(_) => "string",
            MetaValue::List(_) => "list",
            MetaValue::Table(_) => "table",
        }
    }

    /// Scalar text form. Numbers count since `2019` is a perfectly good path.
    /// Numbers read from frontmatter arrive as `Text` holding their source
    /// spelling, so only hand-built values reach the `Number` arm.
    fn as_scalar_string(&self) -> Option<String> {
        match self {
            MetaValue::Text(s) => Some(s.clone()),
            MetaValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(values: Vec<T>) -> Self {
        MetaValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => f.write_str("null"),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::Number(n) => write!(f, "{}", n),
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            MetaValue::Table(_) => f.write_str("{..}"),
        }
    }
}

/// Metadata bag attached to a document.
///
/// Keys are case-insensitive: `RedirectFrom` and `redirectfrom` name the
/// same entry. When a key is inserted twice the later value wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, MetaValue>", into = "BTreeMap<String, MetaValue>")]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<MetaValue>) {
        self.entries.insert(key.to_lowercase(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(&key.to_lowercase())
    }

    /// Look up the first key present out of several aliases.
    ///
    /// The matched key is borrowed from `keys`, not from the bag.
    pub fn get_any<'k>(&self, keys: &[&'k str]) -> Option<(&'k str, &MetaValue)> {
        keys.iter()
            .find_map(|key| self.get(key).map(|value| (*key, value)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a value as an ordered list of strings.
    ///
    /// A single string yields a one-element list. Absent and null values
    /// yield `Ok(None)`. Booleans, tables and lists holding anything other
    /// than strings are rejected rather than coerced.
    ///
    /// ```
    /// use redirkit_types::Metadata;
    ///
    /// let meta = Metadata::new()
    ///     .with("RedirectFrom", vec!["old/a", "old/b"])
    ///     .with("Draft", true);
    /// assert_eq!(
    ///     meta.get_strings("redirectfrom").unwrap(),
    ///     Some(vec!["old/a".to_string(), "old/b".to_string()])
    /// );
    /// assert!(meta.get_strings("draft").is_err());
    /// ```
    pub fn get_strings(&self, key: &str) -> Result<Option<Vec<String>>, MetadataError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let shape_error = |found: &'static str| MetadataError::UnexpectedShape {
            key: key.to_string(),
            found,
        };

        match value {
            MetaValue::Null => Ok(None),
            MetaValue::List(items) => items
                .iter()
                .map(|item| item.as_scalar_string().ok_or_else(|| shape_error(item.kind())))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => other
                .as_scalar_string()
                .map(|s| Some(vec![s]))
                .ok_or_else(|| shape_error(other.kind())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, MetaValue>> for Metadata {
    fn from(map: BTreeMap<String, MetaValue>) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in map {
            metadata.insert(&key, value);
        }
        metadata
    }
}

impl From<Metadata> for BTreeMap<String, MetaValue> {
    fn from(metadata: Metadata) -> Self {
        metadata.entries
    }
}

impl<K: AsRef<str>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key.as_ref(), value);
        }
        metadata
    }
}
