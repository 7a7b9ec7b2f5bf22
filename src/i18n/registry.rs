//! Locale registry: the ordered set of locales the storefront is served in.
//!
//! A `LocaleSet` is immutable once built. The resolver and the dictionary
//! loader both receive the same set at construction, so tests can build
//! alternate sets without touching process-wide state. The storefront's own
//! set (`en` default, `es`) is available through [`LocaleSet::standard`].

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::i18n::Locale;

/// Metadata for one supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Lower-case locale code as it appears in URLs (e.g., "en", "es")
    pub code: String,

    /// English name of the language (e.g., "English", "Spanish")
    pub name: String,

    /// Native name of the language (e.g., "English", "Español")
    pub native_name: String,
}

impl LocaleConfig {
    pub fn new(code: &str, name: &str, native_name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            native_name: native_name.to_string(),
        }
    }
}

/// Reasons a locale set cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleSetError {
    #[error("locale set must contain at least one locale")]
    Empty,

    #[error("invalid locale code '{0}': expected lower-case ASCII letters, digits or '-'")]
    InvalidCode(String),

    #[error("locale '{0}' is listed more than once")]
    Duplicate(String),

    #[error("default locale '{0}' is not in the locale set")]
    UnknownDefault(String),
}

/// Ordered, immutable set of supported locales with exactly one default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

static STANDARD: OnceLock<Arc<LocaleSet>> = OnceLock::new();

impl LocaleSet {
    /// Build a locale set, validating codes and the default.
    ///
    /// Order is preserved: it is the order used when scanning for a
    /// locale prefix and when listing language switcher links.
    pub fn new(locales: Vec<LocaleConfig>, default_code: &str) -> Result<Self, LocaleSetError> {
        if locales.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        for (index, locale) in locales.iter().enumerate() {
            if !is_valid_code(&locale.code) {
                return Err(LocaleSetError::InvalidCode(locale.code.clone()));
            }
            if locales[..index].iter().any(|other| other.code == locale.code) {
                return Err(LocaleSetError::Duplicate(locale.code.clone()));
            }
        }

        let default_index = locales
            .iter()
            .position(|locale| locale.code == default_code)
            .ok_or_else(|| LocaleSetError::UnknownDefault(default_code.to_string()))?;

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Build a locale set from bare codes; names fall back to the code.
    pub fn from_codes(codes: &[&str], default_code: &str) -> Result<Self, LocaleSetError> {
        let locales = codes
            .iter()
            .map(|code| LocaleConfig::new(code, code, code))
            .collect();
        Self::new(locales, default_code)
    }

    /// The storefront's locale set: English (default) and Spanish.
    pub fn standard() -> Arc<LocaleSet> {
        Arc::clone(STANDARD.get_or_init(|| {
            Arc::new(LocaleSet {
                locales: vec![
                    LocaleConfig::new("en", "English", "English"),
                    LocaleConfig::new("es", "Spanish", "Español"),
                ],
                default_index: 0,
            })
        }))
    }

    /// Look up a locale by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Validated `Locale` handle for a supported code.
    pub fn locale(&self, code: &str) -> Option<Locale> {
        self.get_by_code(code).map(Locale::from_config)
    }

    pub fn default_config(&self) -> &LocaleConfig {
        &self.locales[self.default_index]
    }

    /// The default locale, used whenever nothing better matches.
    pub fn default_locale(&self) -> Locale {
        Locale::from_config(self.default_config())
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default_config().code == code
    }

    /// All locales in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, LocaleConfig> {
        self.locales.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|locale| locale.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Locale codes are compared against lower-cased header tags and embedded in
/// URL paths, so they must be lower-case and free of separators.
fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && !code.starts_with('-')
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Standard Set Tests ====================

    #[test]
    fn test_standard_returns_shared_instance() {
        let set1 = LocaleSet::standard();
        let set2 = LocaleSet::standard();

        assert!(Arc::ptr_eq(&set1, &set2));
    }

    #[test]
    fn test_standard_contains_english_and_spanish_in_order() {
        let set = LocaleSet::standard();
        let codes: Vec<_> = set.codes().collect();

        assert_eq!(codes, vec!["en", "es"]);
    }

    #[test]
    fn test_standard_default_is_english() {
        let set = LocaleSet::standard();

        assert_eq!(set.default_config().code, "en");
        assert_eq!(set.default_locale().code(), "en");
        assert!(set.is_default("en"));
        assert!(!set.is_default("es"));
    }

    #[test]
    fn test_get_by_code_spanish() {
        let set = LocaleSet::standard();
        let config = set.get_by_code("es").expect("Spanish should be supported");

        assert_eq!(config.name, "Spanish");
        assert_eq!(config.native_name, "Español");
    }

    #[test]
    fn test_get_by_code_is_case_sensitive() {
        let set = LocaleSet::standard();

        assert!(set.get_by_code("ES").is_none());
        assert!(set.get_by_code("fr").is_none());
        assert!(set.get_by_code("").is_none());
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_rejects_empty_set() {
        let result = LocaleSet::new(Vec::new(), "en");
        assert_eq!(result, Err(LocaleSetError::Empty));
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        let result = LocaleSet::from_codes(&["en", "es"], "fr");
        assert_eq!(result, Err(LocaleSetError::UnknownDefault("fr".to_string())));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = LocaleSet::from_codes(&["en", "es", "en"], "en");
        assert_eq!(result, Err(LocaleSetError::Duplicate("en".to_string())));
    }

    #[test]
    fn test_new_rejects_invalid_codes() {
        for code in ["", "EN", "e/n", "en us", "-en"] {
            let result = LocaleSet::from_codes(&[code], code);
            assert_eq!(
                result,
                Err(LocaleSetError::InvalidCode(code.to_string())),
                "code {:?} should be rejected",
                code
            );
        }
    }

    #[test]
    fn test_new_accepts_region_codes() {
        let set = LocaleSet::from_codes(&["pt-br", "pt"], "pt").expect("valid set");

        assert_eq!(set.len(), 2);
        assert_eq!(set.default_locale().code(), "pt");
        assert!(set.contains("pt-br"));
    }

    #[test]
    fn test_alternate_default_position() {
        let set = LocaleSet::from_codes(&["fr", "de", "it"], "de").expect("valid set");

        assert_eq!(set.default_config().code, "de");
        assert_eq!(set.codes().collect::<Vec<_>>(), vec!["fr", "de", "it"]);
    }

    #[test]
    fn test_error_messages_name_the_code() {
        let error = LocaleSetError::UnknownDefault("fr".to_string());
        assert!(error.to_string().contains("'fr'"));
    }
}
