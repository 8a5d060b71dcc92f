//! List the redirects a build would generate.

use anyhow::{Context, Result};
use redirkit_core::{discover_documents, scan, Config, RedirectMapping};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct RedirectEntry {
    kind: &'static str,
    source: String,
    target: String,
}

impl From<&RedirectMapping> for RedirectEntry {
    fn from(mapping: &RedirectMapping) -> Self {
        Self {
            kind: mapping.kind.as_str(),
            source: mapping.source.to_string(),
            target: mapping.target.to_string(),
        }
    }
}

/// Print every redirect: prefix redirects first, then redirect-from ones
pub fn list_redirects(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let documents = discover_documents(&config).context("Failed to discover documents")?;
    let redirects = scan(&documents, &config.redirects).context("Failed to collect redirects")?;

    let entries: Vec<RedirectEntry> = redirects.iter().map(RedirectEntry::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No redirects");
    } else {
        for entry in &entries {
            println!("{:<9} {} {}", entry.kind, entry.source, entry.target);
        }
    }

    Ok(())
}
