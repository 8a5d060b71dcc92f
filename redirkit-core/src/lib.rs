//! # redirkit-core
//!
//! Core library for the redirkit redirect generator.
//!
//! Given the documents a static site build will publish, this crate works
//! out which legacy URLs must redirect to them and assembles the server-side
//! rules file. The pieces compose as plain functions:
//!
//! - [`scan`] runs metadata extraction and prefix matching over every
//!   document in parallel, then reduces the results into a [`RedirectSet`]
//! - [`build_rules`] merges the set with any user-authored rules file
//! - [`source`] turns an input directory into [`Document`]s

pub mod builder;
pub mod config;
pub mod extract;
pub mod frontmatter;
pub mod models;
pub mod prefix;
pub mod rules;
pub mod source;

pub use builder::{scan, RedirectError};
pub use config::{Config, ConfigError, RedirectConfig};
pub use models::{Artifact, ArtifactKind, ExistingRules, RedirectKind, RedirectMapping, RedirectSet};
pub use rules::{build_rules, RulesArtifact};
pub use source::{discover_documents, read_existing_rules, SourceError};

pub use redirkit_types::{DocId, DocPath, Document, MetaValue, Metadata};
