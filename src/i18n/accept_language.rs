//! Accept-Language matching against a locale set.
//!
//! Entries are considered in the order they appear in the header. Quality
//! weights (`;q=...`) are stripped and ignored: `fr;q=0.1,es;q=0.9` prefers
//! whichever supported tag is mentioned first, not the one with the higher
//! weight. Existing clients rely on first-mention ordering.

use crate::i18n::{Locale, LocaleSet};

/// How the preferred locale was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// A header entry equalled a supported code (`es`).
    Exact,
    /// A region-qualified entry matched on its primary subtag (`es-MX` -> `es`).
    PrimarySubtag,
    /// Nothing in the header matched, or there was no header.
    Default,
}

/// The locale picked for a request without a locale prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePreference {
    pub locale: Locale,
    pub kind: MatchKind,
}

/// Pick the preferred supported locale from an Accept-Language header.
///
/// Never fails: an absent, empty or entirely unsupported header yields the
/// set's default locale.
pub fn preferred_locale(header: Option<&str>, locales: &LocaleSet) -> LocalePreference {
    for tag in language_tags(header.unwrap_or_default()) {
        if let Some(locale) = locales.locale(&tag) {
            return LocalePreference {
                locale,
                kind: MatchKind::Exact,
            };
        }

        if let Some(locale) = primary_subtag(&tag).and_then(|primary| locales.locale(primary)) {
            return LocalePreference {
                locale,
                kind: MatchKind::PrimarySubtag,
            };
        }
    }

    LocalePreference {
        locale: locales.default_locale(),
        kind: MatchKind::Default,
    }
}

/// Normalized language tags in header order.
///
/// Each comma-separated entry loses its `;` parameters and surrounding
/// whitespace and is lower-cased. Entries that end up empty (stray commas,
/// a bare `;q=0.5`) are dropped.
pub fn language_tags(header: &str) -> impl Iterator<Item = String> + '_ {
    header
        .split(',')
        .map(|entry| entry.split(';').next().unwrap_or_default().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
}

fn primary_subtag(tag: &str) -> Option<&str> {
    let (primary, _region) = tag.split_once('-')?;
    (!primary.is_empty()).then_some(primary)
}
