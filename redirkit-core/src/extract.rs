//! Redirect-from metadata extraction.

use crate::models::{RedirectKind, RedirectMapping};
use redirkit_types::{DocPath, Document};

/// Metadata keys holding redirect-from paths, in lookup order
pub const REDIRECT_FROM_KEYS: &[&str] = &["RedirectFrom", "redirect_from", "redirect-from"];

/// Read the redirect-from entries of one document.
///
/// Returns one automatic mapping per usable entry, in declaration order,
/// pointing at the document's destination. Documents without a destination
/// yield nothing. A malformed value drops the whole document's entries; a
/// single bad path only drops that entry.
pub fn extract_redirect_from(document: &Document) -> Vec<RedirectMapping> {
    let Some(destination) = &document.destination else {
        return Vec::new();
    };
    let Some((key, _)) = document.metadata.get_any(REDIRECT_FROM_KEYS) else {
        return Vec::new();
    };

    let entries = match document.metadata.get_strings(key) {
        Ok(Some(entries)) => entries,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!("Skipping redirects for {}: {}", document.id, err);
            return Vec::new();
        }
    };

    let mut mappings: Vec<RedirectMapping> = Vec::with_capacity(entries.len());
    for entry in entries {
        let source = match DocPath::parse(&entry) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(
                    "Ignoring redirect-from '{}' on {}: {}",
                    entry,
                    document.id,
                    err
                );
                continue;
            }
        };

        if mappings.iter().any(|m| m.source == source) {
            continue;
        }

        match RedirectMapping::new(source, destination.clone(), RedirectKind::Automatic) {
            Some(mapping) => mappings.push(mapping),
            None => tracing::warn!(
                "Ignoring redirect-from '{}' on {}: it is the document's own path",
                entry,
                document.id
            ),
        }
    }

    mappings
}

#[cfg(test)]
mod tests {
    use super::*;
    use redirkit_types::{MetaValue, Metadata};

    fn doc(destination: &str, metadata: Metadata) -> Document {
        Document::new(format!("{}.md", destination), DocPath::parse(destination).ok())
            .with_metadata(metadata)
    }

    fn sources(mappings: &[RedirectMapping]) -> Vec<String> {
        mappings.iter().map(|m| m.source.to_string()).collect()
    }

    #[test]
    fn test_single_entry() {
        let document = doc("a/b/c", Metadata::new().with("RedirectFrom", "x/y"));
        let mappings = extract_redirect_from(&document);
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].rule_line(), "/x/y /a/b/c");
        assert_eq!(mappings[0].kind, RedirectKind::Automatic);
    }

    #[test]
    fn test_list_keeps_order_and_drops_duplicates() {
        let document = doc(
            "target",
            Metadata::new().with("redirect_from", vec!["/z/", "a", "z"]),
        );
        assert_eq!(sources(&extract_redirect_from(&document)), vec!["/z", "/a"]);
    }

    #[test]
    fn test_without_destination() {
        let document = Document::new("draft.md", None)
            .with_metadata(Metadata::new().with("RedirectFrom", "x/y"));
        assert!(extract_redirect_from(&document).is_empty());
    }

    #[test]
    fn test_malformed_value_is_skipped() {
        let mut metadata = Metadata::new();
        metadata.insert("RedirectFrom", MetaValue::Bool(true));
        assert!(extract_redirect_from(&doc("a", metadata)).is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped_individually() {
        let document = doc(
            "a/b",
            Metadata::new().with("RedirectFrom", vec!["", "../escape", "a/b", "ok"]),
        );
        assert_eq!(sources(&extract_redirect_from(&document)), vec!["/ok"]);
    }
}
