//! Server-side rules file assembly.
//!
//! The file is built from up to three sections, separated by one blank
//! line: the user's existing rules, then prefix redirects, then redirect-from
//! redirects. Each generated section opens with a comment header. Tests
//! compare the output byte for byte, so the headers and separators here are
//! part of the format.

use crate::config::RedirectConfig;
use crate::models::{Artifact, ArtifactKind, ExistingRules, RedirectMapping, RedirectSet};

/// Output path used when there is no existing rules file
pub const DEFAULT_RULES_FILE: &str = "_redirects";

pub const PREFIX_HEADER: &str = "# Prefix redirects generated by redirkit";
pub const AUTOMATIC_HEADER: &str = "# Automatic redirects generated by redirkit";

/// A generated section: header comment plus one line per redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesSection {
    pub header: &'static str,
    pub lines: Vec<String>,
}

impl RulesSection {
    fn from_mappings(header: &'static str, mappings: &[RedirectMapping]) -> Option<Self> {
        if mappings.is_empty() {
            return None;
        }
        Some(Self {
            header,
            lines: mappings.iter().map(RedirectMapping::rule_line).collect(),
        })
    }

    fn render(&self) -> String {
        let mut out = String::from(self.header);
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// The rules file before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesArtifact {
    pub existing: Option<String>,
    pub sections: Vec<RulesSection>,
}

impl RulesArtifact {
    /// Assemble the sections. Returns None when there is nothing at all to
    /// write: no existing file and no redirects.
    pub fn assemble(
        set: &RedirectSet,
        existing: Option<&str>,
        include_prefix: bool,
    ) -> Option<Self> {
        let mut sections = Vec::new();
        if include_prefix {
            sections.extend(RulesSection::from_mappings(PREFIX_HEADER, &set.prefix));
        }
        sections.extend(RulesSection::from_mappings(AUTOMATIC_HEADER, &set.automatic));

        if existing.is_none() && sections.is_empty() {
            return None;
        }

        Some(Self {
            existing: existing.map(str::to_string),
            sections,
        })
    }

    /// Render the final text.
    ///
    /// Existing content loses trailing whitespace but is otherwise kept
    /// verbatim; an existing file that is blank contributes no section.
    pub fn render(&self) -> String {
        let existing = self
            .existing
            .as_deref()
            .map(str::trim_end)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        existing
            .into_iter()
            .chain(self.sections.iter().map(RulesSection::render))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Build the rules-file artifact.
///
/// Returns None when the rules file is disabled or there is nothing to put
/// in it. The artifact lands at the existing file's path when one was
/// supplied, otherwise at the configured rules file name.
pub fn build_rules(
    set: &RedirectSet,
    existing: Option<&ExistingRules>,
    config: &RedirectConfig,
) -> Option<Artifact> {
    if !config.netlify {
        return None;
    }

    let rules = RulesArtifact::assemble(
        set,
        existing.map(|e| e.content.as_str()),
        config.active_prefix().is_some(),
    )?;

    let destination = existing
        .map(|e| e.path.clone())
        .unwrap_or_else(|| config.rules_file.clone());

    tracing::info!(
        "Rules file {}: {} generated section(s){}",
        destination,
        rules.sections.len(),
        if rules.existing.is_some() {
            " merged with existing rules"
        } else {
            ""
        }
    );

    Some(Artifact {
        destination,
        content: rules.render(),
        kind: ArtifactKind::RulesFile,
    })
}
