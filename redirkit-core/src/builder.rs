//! Redirect scanning - runs per-document extraction in parallel, then
//! reduces the results into a single [`RedirectSet`].

use crate::{
    config::RedirectConfig,
    extract::extract_redirect_from,
    models::{RedirectMapping, RedirectSet},
    prefix::{collect_prefix_redirects, match_prefix},
};
use rayon::prelude::*;
use redirkit_types::{DocId, DocPath, Document};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    #[error("Redirect from '{path}' is claimed by both {first} and {second}")]
    Conflict {
        path: DocPath,
        first: DocId,
        second: DocId,
    },
}

/// Everything one document contributes
#[derive(Debug)]
struct DocumentScan<'a> {
    id: &'a DocId,
    automatic: Vec<RedirectMapping>,
    prefix: Option<RedirectMapping>,
}

/// Scan every document and collect the redirects the build needs.
///
/// Documents are processed in parallel. The reduce step waits for all of
/// them and walks the results in input order, so the first document to
/// claim a redirect-from path is the one named first in a conflict.
///
/// Work is skipped for outputs the configuration turns off: no metadata is
/// read when neither redirect pages nor the rules file are enabled, and no
/// prefix matching happens without an active escape prefix.
pub fn scan(documents: &[Document], config: &RedirectConfig) -> Result<RedirectSet, RedirectError> {
    let wants_automatic = config.wants_automatic();
    let prefix = config.active_prefix();

    let scans: Vec<DocumentScan<'_>> = documents
        .par_iter()
        .map(|document| scan_document(document, wants_automatic, prefix))
        .collect();

    let set = reduce(scans)?;
    tracing::info!(
        "Found {} redirect-from and {} prefix redirects across {} documents",
        set.automatic.len(),
        set.prefix.len(),
        documents.len()
    );
    Ok(set)
}

fn scan_document<'a>(
    document: &'a Document,
    wants_automatic: bool,
    prefix: Option<&str>,
) -> DocumentScan<'a> {
    let automatic = if wants_automatic {
        extract_redirect_from(document)
    } else {
        Vec::new()
    };

    let prefix = match (prefix, &document.destination) {
        (Some(prefix), Some(destination)) => match_prefix(destination, prefix),
        _ => None,
    };

    if !automatic.is_empty() || prefix.is_some() {
        tracing::debug!(
            "{}: {} redirect-from, prefix {}",
            document.id,
            automatic.len(),
            prefix.as_ref().map_or("none", |_| "matched")
        );
    }

    DocumentScan {
        id: &document.id,
        automatic,
        prefix,
    }
}

fn reduce(scans: Vec<DocumentScan<'_>>) -> Result<RedirectSet, RedirectError> {
    let mut automatic: BTreeMap<DocPath, (&DocId, RedirectMapping)> = BTreeMap::new();
    let mut prefix = Vec::new();

    for scan in scans {
        for mapping in scan.automatic {
            if let Some((owner, _)) = automatic.get(&mapping.source) {
                return Err(RedirectError::Conflict {
                    path: mapping.source,
                    first: (*owner).clone(),
                    second: scan.id.clone(),
                });
            }
            automatic.insert(mapping.source.clone(), (scan.id, mapping));
        }
        prefix.extend(scan.prefix);
    }

    Ok(RedirectSet {
        prefix: collect_prefix_redirects(prefix),
        automatic: automatic.into_values().map(|(_, mapping)| mapping).collect(),
    })
}
