//! Meta-refresh redirect pages.

use crate::templates::RedirectTemplate;
use askama::Template;
use redirkit_core::{Artifact, ArtifactKind, RedirectConfig, RedirectMapping};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render redirect page: {0}")]
    Template(#[from] askama::Error),

    #[error("Redirect pages for {first} and {second} would both be written to {destination}")]
    DuplicateDestination {
        destination: String,
        first: String,
        second: String,
    },
}

/// Render one meta-refresh page per mapping.
///
/// Pages land at `<source>.<page_extension>` and point at
/// `<base_url><target>`, with the target percent-encoded. Returns nothing
/// when meta-refresh redirects are turned off.
///
/// Two mappings that would share an output path are an error. Mappings from
/// [`redirkit_core::scan`] never collide since it rejects repeated sources;
/// the check covers callers that assemble mappings themselves.
pub fn emit_client_redirects(
    mappings: &[RedirectMapping],
    config: &RedirectConfig,
    base_url: &str,
) -> Result<Vec<Artifact>, RenderError> {
    if !config.meta_refresh {
        return Ok(Vec::new());
    }

    let base = base_url.trim_end_matches('/');
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut artifacts = Vec::with_capacity(mappings.len());

    for mapping in mappings {
        let destination = mapping.source.with_extension(&config.page_extension);
        let source = mapping.source.to_string();
        if let Some(first) = claimed.insert(destination.clone(), source.clone()) {
            return Err(RenderError::DuplicateDestination {
                destination,
                first,
                second: source,
            });
        }

        let url = format!("{}{}", base, mapping.target.to_url_path());
        let content = RedirectTemplate { url: &url }.render()?;
        tracing::debug!("Redirect page {} -> {}", destination, url);

        artifacts.push(Artifact {
            destination,
            content,
            kind: ArtifactKind::ClientRedirect,
        });
    }

    tracing::info!("Rendered {} redirect page(s)", artifacts.len());
    Ok(artifacts)
}
