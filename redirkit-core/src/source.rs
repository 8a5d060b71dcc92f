//! Input discovery - turns the input directory into documents and picks up
//! an existing rules file.

use crate::{config::Config, frontmatter::parse_frontmatter, models::ExistingRules};
use redirkit_types::{DocPath, Document, Metadata};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Discover all documents in the input directory.
///
/// Files are visited in name order so builds are reproducible. A file whose
/// frontmatter fails to parse is still published; it just has no metadata.
pub fn discover_documents(config: &Config) -> Result<Vec<Document>, SourceError> {
    let input_dir = config.input_dir();
    let output_dir = config.output_dir();
    let ignore_patterns = compile_ignore_patterns(&config.ignore_patterns);
    let mut documents = Vec::new();

    // Generated pages from an earlier build must not become documents
    let walker = WalkDir::new(&input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.path() != output_dir);

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| config.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
        if !has_extension {
            continue;
        }

        let rel = path.strip_prefix(&input_dir).unwrap_or(path);
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if should_ignore(&rel_str, &ignore_patterns) {
            tracing::debug!("Ignoring {} due to ignore_patterns", rel_str);
            continue;
        }

        documents.push(load_document(path, rel)?);
    }

    tracing::info!("Found {} documents in {:?}", documents.len(), input_dir);
    Ok(documents)
}

/// Load a single document. `rel` is its path relative to the input root.
pub fn load_document(path: &Path, rel: &Path) -> Result<Document, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let id = rel.to_string_lossy().replace('\\', "/");
    let metadata = match parse_frontmatter(&content) {
        Ok((metadata, _body)) => metadata,
        Err(err) => {
            tracing::error!("Failed to parse frontmatter in {}: {}", id, err);
            Metadata::new()
        }
    };

    let destination = destination_for(rel);
    if destination.is_none() {
        tracing::warn!("{} has no usable destination path", id);
    }

    Ok(Document::new(id, destination).with_metadata(metadata))
}

/// Destination path for an input-relative file: its path without extension
pub fn destination_for(rel: &Path) -> Option<DocPath> {
    let stem = rel.with_extension("");
    let segments = stem
        .components()
        .map(|c| match c {
            Component::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect::<Option<Vec<String>>>()?;
    DocPath::from_segments(segments).ok()
}

/// Read the existing rules file at the input root, if there is one.
///
/// A missing file is fine. Any other read failure is an error: the user
/// wrote that file and silently dropping it would lose their rules.
pub fn read_existing_rules(config: &Config) -> Result<Option<ExistingRules>, SourceError> {
    let name = &config.redirects.rules_file;
    let path = config.input_dir().join(name);

    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!("Using existing rules file {:?}", path);
            Ok(Some(ExistingRules {
                path: name.clone(),
                content,
            }))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SourceError::Io { path, source }),
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_destination_strips_extension() {
        let dest = destination_for(Path::new("a/b/c.md")).unwrap();
        assert_eq!(dest.to_string(), "/a/b/c");
        let dest = destination_for(Path::new("^.a.md")).unwrap();
        assert_eq!(dest.to_string(), "/^.a");
    }

    #[test]
    fn test_discover_documents() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("content");
        write(&input, "a/b/c.md", "RedirectFrom: x/y\n---\nFoo");
        write(&input, "d/e.md", "Bar");
        write(&input, "drafts/skip.md", "Skipped");
        write(&input, "style.css", "body {}");
        write(&input, "_redirects", "/old /new");

        let mut config = Config::new(&input, dir.path().join("public"));
        config.ignore_patterns = vec!["^drafts/".to_string()];

        let docs = discover_documents(&config).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a/b/c.md", "d/e.md"]);
        assert_eq!(
            docs[0].metadata.get_strings("RedirectFrom").unwrap(),
            Some(vec!["x/y".to_string()])
        );
        assert!(docs[1].metadata.is_empty());
    }

    #[test]
    fn test_skips_output_inside_input() {
        let dir = tempdir().unwrap();
        write(dir.path(), "page.md", "RedirectFrom: old\n---\nBody");
        write(dir.path(), "public/old.html", "<!doctype html>");

        let config = Config::new(dir.path(), dir.path().join("public"));
        let docs = discover_documents(&config).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["page.md"]);
    }

    #[test]
    fn test_bad_frontmatter_keeps_document() {
        let dir = tempdir().unwrap();
        write(dir.path(), "^.a/c.md", "---\nkey: [unclosed\n---\nBody");

        let config = Config::new(dir.path(), dir.path().join("out"));
        let docs = discover_documents(&config).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].metadata.is_empty());
        assert_eq!(docs[0].destination.as_ref().unwrap().to_string(), "/^.a/c");
    }

    #[test]
    fn test_read_existing_rules() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path(), dir.path().join("out"));
        assert_eq!(read_existing_rules(&config).unwrap(), None);

        write(dir.path(), "_redirects", "foobar");
        let existing = read_existing_rules(&config).unwrap().unwrap();
        assert_eq!(existing.path, "_redirects");
        assert_eq!(existing.content, "foobar");
    }

    #[test]
    fn test_unreadable_rules_file_is_an_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be cannot be read as text
        fs::create_dir_all(dir.path().join("_redirects")).unwrap();
        let config = Config::new(dir.path(), dir.path().join("out"));
        assert!(matches!(
            read_existing_rules(&config),
            Err(SourceError::Io { .. })
        ));
    }
}
