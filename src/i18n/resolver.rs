//! Locale resolution for inbound request paths.
//!
//! Every page request is classified exactly once:
//!
//! 1. Exempt paths (static files, API routes, framework internals) pass
//!    through without a locale.
//! 2. Paths whose first segment is a supported locale proceed with it.
//! 3. Everything else is redirected to the same path under the locale
//!    preferred by the Accept-Language header, or the default locale.

use std::fmt;
use std::sync::Arc;

use crate::i18n::{
    preferred_locale, ExemptPathMatcher, FrameworkExemptPaths, Locale, LocaleSet, MatchKind,
    RequestPath,
};

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Continue handling the request. `locale` is the prefix found in the
    /// path, or `None` for exempt paths.
    Proceed { locale: Option<Locale> },

    /// Send the client to `location` instead.
    Redirect {
        location: String,
        locale: Locale,
        matched: MatchKind,
    },
}

impl LocaleDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, LocaleDecision::Redirect { .. })
    }

    /// Redirect target, if this decision is a redirect.
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            LocaleDecision::Redirect { location, .. } => Some(location),
            LocaleDecision::Proceed { .. } => None,
        }
    }

    /// Locale the request will be served in, if one was decided.
    pub fn locale(&self) -> Option<&Locale> {
        match self {
            LocaleDecision::Proceed { locale } => locale.as_ref(),
            LocaleDecision::Redirect { locale, .. } => Some(locale),
        }
    }
}

/// Resolves the locale for request paths against a fixed locale set.
#[derive(Clone)]
pub struct LocaleResolver {
    locales: Arc<LocaleSet>,
    exempt: Arc<dyn ExemptPathMatcher>,
}

impl LocaleResolver {
    pub fn new(locales: Arc<LocaleSet>, exempt: impl ExemptPathMatcher + 'static) -> Self {
        Self {
            locales,
            exempt: Arc::new(exempt),
        }
    }

    /// Resolver using the framework's static/API/internal path rules.
    pub fn with_framework_defaults(locales: Arc<LocaleSet>) -> Self {
        Self::new(locales, FrameworkExemptPaths::default())
    }

    pub fn locales(&self) -> &Arc<LocaleSet> {
        &self.locales
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt.is_exempt(path)
    }

    /// Decide whether `path` proceeds or is redirected.
    pub fn resolve(&self, path: &str, accept_language: Option<&str>) -> LocaleDecision {
        if self.exempt.is_exempt(path) {
            return LocaleDecision::Proceed { locale: None };
        }

        let request_path = RequestPath::parse(path);
        if let Some(locale) = request_path.locale(&self.locales) {
            return LocaleDecision::Proceed {
                locale: Some(locale),
            };
        }

        let preference = preferred_locale(accept_language, &self.locales);
        LocaleDecision::Redirect {
            location: request_path.prefixed(preference.locale.code()),
            locale: preference.locale,
            matched: preference.kind,
        }
    }
}

impl fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("locales", &self.locales)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolver() -> LocaleResolver {
        LocaleResolver::with_framework_defaults(LocaleSet::standard())
    }

    fn assert_proceeds_with(decision: &LocaleDecision, code: &str) {
        match decision {
            LocaleDecision::Proceed { locale: Some(locale) } => assert_eq!(locale.code(), code),
            other => panic!("expected to proceed with {}, got {:?}", code, other),
        }
    }

    // ==================== Already Localized Tests ====================

    #[test]
    fn test_localized_path_proceeds_regardless_of_header() {
        let resolver = resolver();

        for header in [None, Some("es"), Some("fr,de"), Some("es-MX,en;q=0.5")] {
            let decision = resolver.resolve("/en/cart", header);
            assert_proceeds_with(&decision, "en");
        }
    }

    #[test]
    fn test_bare_locale_path_proceeds() {
        let resolver = resolver();

        assert_proceeds_with(&resolver.resolve("/es", None), "es");
        assert_proceeds_with(&resolver.resolve("/en", Some("es")), "en");
    }

    // ==================== Redirect Tests ====================

    #[test]
    fn test_root_without_header_redirects_to_default() {
        let decision = resolver().resolve("/", None);
        assert_eq!(decision.redirect_to(), Some("/en"));
    }

    #[test]
    fn test_spanish_region_header_redirects_catalog() {
        let decision = resolver().resolve("/catalog", Some("es-MX,en;q=0.5"));

        assert_eq!(
            decision,
            LocaleDecision::Redirect {
                location: "/es/catalog".to_string(),
                locale: LocaleSet::standard().locale("es").unwrap(),
                matched: MatchKind::PrimarySubtag,
            }
        );
    }

    #[test]
    fn test_substring_prefix_redirects() {
        let decision = resolver().resolve("/endpointXYZ", None);
        assert_eq!(decision.redirect_to(), Some("/en/endpointXYZ"));
    }

    #[test]
    fn test_unsupported_header_redirects_to_default() {
        let decision = resolver().resolve("/cart", Some("fr,de"));

        assert_eq!(decision.redirect_to(), Some("/en/cart"));
        assert_eq!(decision.locale().map(Locale::code), Some("en"));
    }

    #[test]
    fn test_first_listed_locale_wins() {
        let decision = resolver().resolve("/books/7", Some("es,en"));
        assert_eq!(decision.redirect_to(), Some("/es/books/7"));
    }

    #[test]
    fn test_relative_path_gets_separator() {
        let decision = resolver().resolve("catalog", None);
        assert_eq!(decision.redirect_to(), Some("/en/catalog"));
    }

    // ==================== Exempt Path Tests ====================

    #[test]
    fn test_exempt_paths_pass_through_without_locale() {
        let resolver = resolver();

        for path in ["/favicon.ico", "/api/health", "/_next/static/app.js", "/en/api/books"] {
            assert_eq!(
                resolver.resolve(path, Some("es")),
                LocaleDecision::Proceed { locale: None },
                "path {} should pass through",
                path
            );
        }
    }

    #[test]
    fn test_custom_exempt_matcher() {
        let resolver = LocaleResolver::new(LocaleSet::standard(), |path: &str| path == "/health");

        assert_eq!(
            resolver.resolve("/health", None),
            LocaleDecision::Proceed { locale: None }
        );
        // The default rules are replaced, so dotted paths are pages now.
        assert!(resolver.resolve("/favicon.ico", None).is_redirect());
    }

    // ==================== Alternate Locale Set Tests ====================

    #[test]
    fn test_alternate_locale_set() {
        let locales = Arc::new(LocaleSet::from_codes(&["fr", "de"], "fr").unwrap());
        let resolver = LocaleResolver::with_framework_defaults(locales);

        assert_proceeds_with(&resolver.resolve("/de/warenkorb", None), "de");
        assert_eq!(
            resolver.resolve("/en/cart", Some("de-AT")).redirect_to(),
            Some("/de/en/cart")
        );
        assert_eq!(resolver.resolve("/", None).redirect_to(), Some("/fr"));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_localized_paths_never_redirect(
            code in "(en|es)",
            rest in "(/[a-z0-9-]{1,10}){0,4}",
            header in proptest::option::of("[a-zA-Z,;=. -]{0,24}"),
        ) {
            let path = format!("/{}{}", code, rest);
            prop_assume!(!path.contains("/api/"));
            let decision = resolver().resolve(&path, header.as_deref());
            prop_assert_eq!(decision.locale().map(Locale::code), Some(code.as_str()));
            prop_assert!(!decision.is_redirect());
        }

        #[test]
        fn prop_unlocalized_paths_without_header_redirect_to_default(
            path in "(/[a-z][a-z0-9-]{2,10}){1,4}",
        ) {
            prop_assume!(!path.contains("/api/"));
            let decision = resolver().resolve(&path, None);
            let expected = format!("/en{}", path);
            prop_assert_eq!(decision.redirect_to(), Some(expected.as_str()));
        }
    }
}
