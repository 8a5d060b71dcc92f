//! CLI command implementations.

pub mod build;
pub mod init;
pub mod list;

pub use build::build_site;
pub use init::init_project;
pub use list::list_redirects;
