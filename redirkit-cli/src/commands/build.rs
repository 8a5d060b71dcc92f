//! Build command implementation.

use anyhow::{Context, Result};
use redirkit_core::{
    build_rules, discover_documents, read_existing_rules, scan, Artifact, Config, RedirectSet,
};
use redirkit_render::emit_client_redirects;
use std::fs;
use std::path::Path;

/// Everything a build produces, before anything touches the output directory
pub struct BuildOutput {
    pub redirects: RedirectSet,
    pub artifacts: Vec<Artifact>,
}

/// Generate redirects from the configured input and write them out
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let output = generate(&config)?;
    let output_dir = config.output_dir();
    write_artifacts(&output_dir, &output.artifacts)?;

    tracing::info!(
        "✓ Wrote {} artifact(s) for {} redirect(s) to {:?}",
        output.artifacts.len(),
        output.redirects.len(),
        output_dir
    );
    Ok(())
}

/// Run discovery, scanning and rendering without writing anything.
///
/// Any failure aborts the whole build, so a conflicting or unreadable input
/// never leaves half the artifacts on disk.
pub fn generate(config: &Config) -> Result<BuildOutput> {
    let redirect_config = &config.redirects;

    let documents = discover_documents(config).context("Failed to discover documents")?;
    let existing = if redirect_config.netlify {
        read_existing_rules(config).context("Failed to read existing rules file")?
    } else {
        None
    };

    let redirects = scan(&documents, redirect_config).context("Failed to collect redirects")?;

    let mut artifacts = emit_client_redirects(
        &redirects.automatic,
        redirect_config,
        &config.normalized_base_url(),
    )
    .context("Failed to render redirect pages")?;

    if let Some(rules) = build_rules(&redirects, existing.as_ref(), redirect_config) {
        artifacts.push(rules);
    } else if redirect_config.netlify {
        tracing::info!("No redirects to write; skipping rules file");
    }

    Ok(BuildOutput {
        redirects,
        artifacts,
    })
}

fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<()> {
    fs::create_dir_all(output_dir).context("Failed to create output directory")?;

    for artifact in artifacts {
        let path = output_dir.join(&artifact.destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&path, &artifact.content)
            .with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Wrote {:?}", path);
    }

    Ok(())
}
