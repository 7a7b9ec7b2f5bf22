//! Paths that bypass locale routing entirely.

use regex::Regex;

/// Decides whether a request path is exempt from locale routing.
///
/// Implemented for plain closures so tests and embedders can supply their
/// own rules.
pub trait ExemptPathMatcher: Send + Sync {
    fn is_exempt(&self, path: &str) -> bool;
}

impl<F> ExemptPathMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_exempt(&self, path: &str) -> bool {
        self(path)
    }
}

/// Static files, API routes and framework-internal paths.
#[derive(Debug, Clone)]
pub struct FrameworkExemptPaths {
    static_file: Regex,
    api_marker: String,
    internal_prefix: String,
}

/// Anything with a dot in it is served as a file (`/favicon.ico`,
/// `/images/cover.png`, `/manifest.json`).
pub const STATIC_FILE_PATTERN: &str = r"\.(.*)$";
pub const API_MARKER: &str = "/api/";
pub const INTERNAL_PREFIX: &str = "/_next";

impl FrameworkExemptPaths {
    pub fn new(
        static_file_pattern: &str,
        api_marker: &str,
        internal_prefix: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            static_file: Regex::new(static_file_pattern)?,
            api_marker: api_marker.to_string(),
            internal_prefix: internal_prefix.to_string(),
        })
    }

    pub fn is_static_file(&self, path: &str) -> bool {
        self.static_file.is_match(path)
    }

    pub fn is_api(&self, path: &str) -> bool {
        path.contains(&self.api_marker)
    }

    pub fn is_internal(&self, path: &str) -> bool {
        path.starts_with(&self.internal_prefix)
    }
}

impl Default for FrameworkExemptPaths {
    fn default() -> Self {
        Self {
            static_file: Regex::new(STATIC_FILE_PATTERN).expect("static file pattern is valid"),
            api_marker: API_MARKER.to_string(),
            internal_prefix: INTERNAL_PREFIX.to_string(),
        }
    }
}

impl ExemptPathMatcher for FrameworkExemptPaths {
    fn is_exempt(&self, path: &str) -> bool {
        self.is_static_file(path) || self.is_api(path) || self.is_internal(path)
    }
}
