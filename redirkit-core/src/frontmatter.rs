//! Frontmatter parsing from content files.

use redirkit_types::{MetaValue, Metadata};
use regex::Regex;
use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor,
};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Frontmatter must be a mapping of keys to values")]
    NotAMapping,
}

static DELIMITED_REGEX: OnceLock<Regex> = OnceLock::new();
static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

/// `---` on its own line, then YAML, then a closing `---` line
fn delimited_regex() -> &'static Regex {
    DELIMITED_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")
            .expect("frontmatter regex is valid")
    })
}

/// YAML header closed by a `---` line, with no opening delimiter
fn header_regex() -> &'static Regex {
    HEADER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")
            .expect("frontmatter regex is valid")
    })
}

/// Parse frontmatter from file content
///
/// Returns a tuple of (metadata, body). Two layouts are recognized:
///
/// - a block fenced by `---` lines at the very top of the file
/// - a bare YAML header terminated by a single `---` line
///
/// The bare form only counts when the header is a YAML mapping, so a
/// markdown setext heading (`Title` underlined by `---`) stays body text.
/// Without frontmatter the metadata is empty and the body is the whole file.
///
/// # Example
///
/// ```
/// use redirkit_core::frontmatter::parse_frontmatter;
///
/// let content = "RedirectFrom: x/y\n---\nFoo";
///
/// let (meta, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(meta.get_strings("redirectfrom").unwrap(), Some(vec!["x/y".to_string()]));
/// assert_eq!(body, "Foo");
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Metadata, String), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if let Some(captures) = delimited_regex().captures(content) {
        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        let metadata = parse_mapping(yaml)?.unwrap_or_default();
        return Ok((metadata, body.to_string()));
    }

    if let Some(captures) = header_regex().captures(content) {
        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        if let Ok(Some(metadata)) = parse_mapping(yaml) {
            return Ok((metadata, body.to_string()));
        }
    }

    Ok((Metadata::new(), content.to_string()))
}

/// Parse a YAML block into metadata. An empty block yields `None`.
///
/// The block is read twice: once for its shape, then again with that shape
/// as a guide so numeric scalars keep their source text (`2019.10` stays
/// `2019.10` instead of becoming the float `2019.1`).
fn parse_mapping(yaml: &str) -> Result<Option<Metadata>, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(yaml)?;
    match value {
        Value::Mapping(_) => {
            let reader = serde_yaml::Deserializer::from_str(yaml);
            match ShapedValue(&value).deserialize(reader)? {
                MetaValue::Table(entries) => Ok(Some(Metadata::from(entries))),
                _ => Err(FrontmatterError::NotAMapping),
            }
        }
        Value::Null => Ok(None),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Re-reads a YAML node whose shape is already known
struct ShapedValue<'a>(&'a Value);

impl<'de> DeserializeSeed<'de> for ShapedValue<'_> {
    type Value = MetaValue;

    fn deserialize<D>(self, deserializer: D) -> Result<MetaValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.0 {
            Value::Number(_) => String::deserialize(deserializer).map(MetaValue::Text),
            Value::Sequence(items) => deserializer.deserialize_seq(ShapedSeq(items)),
            Value::Mapping(entries) => deserializer.deserialize_map(ShapedMap(entries)),
            other => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(to_meta_value(other))
            }
        }
    }
}

struct ShapedSeq<'a>(&'a [Value]);

impl<'de> Visitor<'de> for ShapedSeq<'_> {
    type Value = MetaValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<MetaValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(ShapedValue(shape))? {
                Some(item) => items.push(item),
                None => return Err(de::Error::invalid_length(items.len(), &self)),
            }
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(MetaValue::List(items))
    }
}

struct ShapedMap<'a>(&'a Mapping);

impl<'de> Visitor<'de> for ShapedMap<'_> {
    type Value = MetaValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML mapping")
    }

    fn visit_map<A>(self, mut map: A) -> Result<MetaValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        for (key, shape) in self.0 {
            if map.next_key::<IgnoredAny>()?.is_none() {
                return Err(de::Error::invalid_length(entries.len(), &self));
            }
            let value = map.next_value_seed(ShapedValue(shape))?;
            if let Some(key) = key_text(key) {
                entries.insert(key, value);
            }
        }
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(MetaValue::Table(entries))
    }
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_meta_value(value: &Value) -> MetaValue {
    match value {
        Value::Null => MetaValue::Null,
        Value::Bool(b) => MetaValue::Bool(*b),
        Value::Number(n) => MetaValue::Text(n.to_string()),
        Value::String(s) => MetaValue::Text(s.clone()),
        Value::Sequence(items) => MetaValue::List(items.iter().map(to_meta_value).collect()),
        Value::Mapping(entries) => MetaValue::Table(
            entries
                .iter()
                .filter_map(|(k, v)| key_text(k).map(|k| (k, to_meta_value(v))))
                .collect(),
        ),
        Value::Tagged(tagged) => to_meta_value(&tagged.value),
    }
}
