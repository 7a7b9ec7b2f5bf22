//! Translation dictionaries, one per supported locale.
//!
//! Dictionaries are static reference data embedded in the binary. They are
//! parsed once when the loader is built; a supported locale without usable
//! data is a startup error. After that, [`DictionaryLoader::load`] cannot
//! fail: any locale it does not know gets the default locale's table.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::i18n::LocaleSet;

/// Dictionaries shipped with the storefront, keyed by locale code.
pub const EMBEDDED_DICTIONARIES: &[(&str, &str)] = &[
    ("en", include_str!("../../dictionaries/en.json")),
    ("es", include_str!("../../dictionaries/es.json")),
];

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("no dictionary data for supported locale '{locale}'")]
    Missing { locale: String },

    #[error("dictionary for locale '{locale}' is not valid JSON")]
    Malformed {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary for locale '{locale}' must be a JSON object at the top level")]
    NotAnObject { locale: String },
}

/// A nested string lookup table.
///
/// Leaves are strings; inner nodes are further tables. Keys are addressed
/// with dots: `"checkoutForm.placeOrder"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: Map<String, Value>,
}

impl Dictionary {
    /// Parse a dictionary from JSON text.
    pub fn from_json(locale: &str, raw: &str) -> Result<Self, DictionaryError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|source| DictionaryError::Malformed {
                locale: locale.to_string(),
                source,
            })?;

        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(DictionaryError::NotAnObject {
                locale: locale.to_string(),
            }),
        }
    }

    /// Look up a string by dotted key. Returns `None` for missing keys and
    /// for keys that name a table rather than a string.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    /// Look up a nested table by dotted key.
    pub fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        self.value(key).and_then(Value::as_object)
    }

    /// Look up a string and substitute `{name}` placeholders.
    ///
    /// Placeholders without a matching argument are left in place.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        let template = self.lookup(key)?;
        let mut text = template.to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        Some(text)
    }

    /// Dotted keys of every string leaf, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.entries, "", &mut keys);
        keys.sort();
        keys
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    fn value(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.entries.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

fn collect_keys(table: &Map<String, Value>, prefix: &str, keys: &mut Vec<String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => collect_keys(inner, &path, keys),
            _ => keys.push(path),
        }
    }
}

/// Maps locale codes to their dictionaries.
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    locales: Arc<LocaleSet>,
    tables: HashMap<String, Arc<Dictionary>>,
    default: Arc<Dictionary>,
}

impl DictionaryLoader {
    /// Loader over the dictionaries embedded in the binary.
    pub fn embedded(locales: Arc<LocaleSet>) -> Result<Self, DictionaryError> {
        Self::from_sources(locales, EMBEDDED_DICTIONARIES.iter().copied())
    }

    /// Loader over `(locale, json)` sources.
    ///
    /// Every locale in the set must have a source that parses to a JSON
    /// object. Sources for locales outside the set are ignored.
    pub fn from_sources<'a>(
        locales: Arc<LocaleSet>,
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, DictionaryError> {
        let sources: HashMap<&str, &str> = sources.into_iter().collect();
        let mut tables = HashMap::with_capacity(locales.len());

        for code in locales.codes() {
            let raw = sources.get(code).ok_or_else(|| DictionaryError::Missing {
                locale: code.to_string(),
            })?;
            let dictionary = Dictionary::from_json(code, raw)?;
            debug!(
                "Loaded dictionary for '{}' ({} keys)",
                code,
                dictionary.keys().len()
            );
            tables.insert(code.to_string(), Arc::new(dictionary));
        }

        for code in sources.keys().filter(|code| !locales.contains(code)) {
            debug!("Ignoring dictionary for unsupported locale '{}'", code);
        }

        let default_code = &locales.default_config().code;
        let default = tables
            .get(default_code)
            .cloned()
            .ok_or_else(|| DictionaryError::Missing {
                locale: default_code.clone(),
            })?;

        info!("Loaded {} dictionaries", tables.len());

        Ok(Self {
            locales,
            tables,
            default,
        })
    }

    /// Dictionary for `locale`, or the default locale's dictionary when
    /// `locale` is empty, unknown or not supported.
    pub fn load(&self, locale: &str) -> Arc<Dictionary> {
        match self.tables.get(locale) {
            Some(dictionary) => Arc::clone(dictionary),
            None => {
                debug!("No dictionary for '{}', using default", locale);
                Arc::clone(&self.default)
            }
        }
    }

    pub fn default_dictionary(&self) -> Arc<Dictionary> {
        Arc::clone(&self.default)
    }

    pub fn locales(&self) -> &Arc<LocaleSet> {
        &self.locales
    }
}
