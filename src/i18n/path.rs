//! Request path tokenizer for locale prefixes.
//!
//! Paths are split into `/`-separated segments once, inspected or rewritten
//! at the segment level, and joined back. The first segment of an absolute
//! path is the only place a locale can appear.

use crate::i18n::{Locale, LocaleSet};

/// A request path split into segments.
///
/// `"/"` and `""` have no segments. A trailing slash shows up as a final
/// empty segment, so `/en/` is `["en", ""]` and rejoins unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath<'a> {
    absolute: bool,
    segments: Vec<&'a str>,
}

impl<'a> RequestPath<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (absolute, rest) = match raw.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let segments = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };

        Self { absolute, segments }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// The first segment, if the path is absolute and has one.
    pub fn leading_segment(&self) -> Option<&'a str> {
        if self.absolute {
            self.segments.first().copied()
        } else {
            None
        }
    }

    /// The supported locale this path is already prefixed with.
    ///
    /// Only a whole segment counts: `/en` and `/en/cart` carry `en`, while
    /// `/endpoint` and `/` carry nothing.
    pub fn locale(&self, locales: &LocaleSet) -> Option<Locale> {
        self.leading_segment().and_then(|segment| locales.locale(segment))
    }

    /// Segments after the locale prefix, or all segments if there is none.
    pub fn without_locale(&self, locales: &LocaleSet) -> &[&'a str] {
        match self.locale(locales) {
            Some(_) => &self.segments[1..],
            None => &self.segments,
        }
    }

    /// This path with `locale` inserted as the first segment.
    ///
    /// `/` becomes `/{locale}`, `/catalog` and `catalog` both become
    /// `/{locale}/catalog`.
    pub fn prefixed(&self, locale: &str) -> String {
        join(std::iter::once(locale).chain(self.segments.iter().copied()))
    }

    /// This path moved to `locale`: an existing locale prefix is replaced,
    /// otherwise `locale` is inserted in front.
    pub fn localized_for(&self, locale: &str, locales: &LocaleSet) -> String {
        join(std::iter::once(locale).chain(self.without_locale(locales).iter().copied()))
    }
}

fn join<'s>(segments: impl Iterator<Item = &'s str>) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}
