//! Askama template definitions.

use askama::Template;

/// Meta-refresh page written at a redirect-from location
#[derive(Template)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate<'a> {
    /// Root-relative URL of the real page, base URL included
    pub url: &'a str,
}
