//! Shared types for redirkit
//!
//! This crate provides the document model consumed by the redirect
//! generator: document identifiers, destination paths and metadata bags.

pub mod metadata;
pub mod path;

pub use metadata::{MetaValue, Metadata, MetadataError};
pub use path::{DocPath, PathError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document identifier (usually the input-relative source file path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(pub String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A content document as supplied by the build pipeline.
///
/// The redirect generator only reads documents; it never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,

    /// Published location, root-relative and extension-free.
    /// Documents without one are not published and get no redirects.
    #[serde(default)]
    pub destination: Option<DocPath>,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(id: impl Into<String>, destination: Option<DocPath>) -> Self {
        Self {
            id: DocId::new(id),
            destination,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}
