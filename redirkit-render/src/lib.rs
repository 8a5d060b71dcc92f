//! # redirkit-render
//!
//! Client-side redirect pages for redirkit.
//!
//! This crate renders meta-refresh HTML pages using Askama, one per
//! redirect-from entry.

pub mod client;
pub mod templates;

pub use client::{emit_client_redirects, RenderError};
pub use templates::RedirectTemplate;
