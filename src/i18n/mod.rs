//! Internationalization (i18n) module for locale routing.
//!
//! Everything that decides which language a request is served in lives here.
//!
//! # Architecture
//!
//! - `registry`: The ordered set of supported locales and the default
//! - `locale`: Validated `Locale` handle
//! - `accept_language`: Accept-Language header matching
//! - `path`: Request path tokenizer (locale prefix detection and rewriting)
//! - `exempt`: Paths that skip locale routing
//! - `resolver`: Per-request locale decision (proceed or redirect)
//! - `dictionary`: Translation tables per locale
//! - `validator`: Dictionary consistency checks
//! - `metrics`: Routing counters
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_storefront::i18n::{DictionaryLoader, LocaleResolver, LocaleSet};
//!
//! let locales = LocaleSet::standard();
//! let resolver = LocaleResolver::with_framework_defaults(locales.clone());
//! let dictionaries = DictionaryLoader::embedded(locales)?;
//!
//! let decision = resolver.resolve("/catalog", Some("es-MX,en;q=0.5"));
//! assert_eq!(decision.redirect_to(), Some("/es/catalog"));
//!
//! let spanish = dictionaries.load("es");
//! assert_eq!(spanish.lookup("header.cart"), Some("Carrito"));
//! ```

mod accept_language;
mod dictionary;
mod exempt;
mod locale;
mod metrics;
mod path;
mod registry;
mod resolver;
mod validator;

pub use accept_language::{language_tags, preferred_locale, LocalePreference, MatchKind};
pub use dictionary::{Dictionary, DictionaryError, DictionaryLoader, EMBEDDED_DICTIONARIES};
pub use exempt::{ExemptPathMatcher, FrameworkExemptPaths};
pub use locale::Locale;
pub use metrics::{MetricsReport, RoutingMetrics};
pub use path::RequestPath;
pub use registry::{LocaleConfig, LocaleSet, LocaleSetError};
pub use resolver::{LocaleDecision, LocaleResolver};
pub use validator::{DictionaryValidator, ValidationReport};
