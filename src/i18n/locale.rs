//! Locale type: a locale code that has been validated against a `LocaleSet`.

use std::fmt;

use serde::Serialize;

use crate::i18n::LocaleConfig;

/// A supported locale.
///
/// Only obtainable from a [`LocaleSet`](crate::i18n::LocaleSet), so holding a
/// `Locale` means the code was supported by the set it came from. Handlers
/// find it in the request extensions once the routing middleware accepted
/// the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale {
    code: String,
}

impl Locale {
    pub(crate) fn from_config(config: &LocaleConfig) -> Self {
        Self {
            code: config.code.clone(),
        }
    }

    /// The locale code (e.g., "en", "es").
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.code == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.code == *other
    }
}
