//! CSRF token handling
//!
//! The server renders the token into every page as
//! `<meta name="csrf-token" content="...">`; mutating requests echo it back
//! in the [`CSRF_HEADER`] header.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Request header carrying the token
pub const CSRF_HEADER: &str = "X-CSRFToken";

static CSRF_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+name\s*=\s*["']csrf-token["']\s+content\s*=\s*["']([^"']*)["']"#)
        .expect("valid csrf meta regex")
});

#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the token from a rendered page
    ///
    /// Returns `None` when the page has no csrf meta tag or its content is
    /// empty.
    pub fn from_meta(html: &str) -> Option<Self> {
        CSRF_META
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(***)")
    }
}
