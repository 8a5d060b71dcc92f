//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../redirkit.yml.example");

/// Initialize a new redirkit project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ redirkit initialized in {:?}", root);
    println!("  - Edit redirkit.yml to choose which redirects to generate");
    println!("  - Add `RedirectFrom:` frontmatter to documents in content/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("redirkit.yml");
    if config_path.exists() {
        println!("redirkit.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let content = root.join("content");
    fs::create_dir_all(&content).with_context(|| format!("Failed to create {:?}", content))?;

    let sample = content.join("welcome.md");
    if !sample.exists() {
        fs::write(&sample, SAMPLE_DOCUMENT)
            .with_context(|| format!("Failed to write {:?}", sample))?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

const SAMPLE_DOCUMENT: &str = r#"---
title: Welcome
RedirectFrom:
  - hello
  - posts/welcome
---

# Welcome

`redirkit build` writes `hello.html` and `posts/welcome.html`, both
redirecting here.
"#;
