//! Locale routing metrics.
//!
//! Counts how requests were routed: passed through, served under an existing
//! locale prefix, or redirected (and why). One instance lives in the
//! application state and is shared by all requests.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::i18n::{LocaleDecision, MatchKind};

#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Exempt requests (static files, API, internals)
    passthroughs: AtomicUsize,

    /// Requests that already carried a locale prefix
    localized: AtomicUsize,

    /// Redirects where the header named a supported locale exactly
    redirects_exact: AtomicUsize,

    /// Redirects matched on a primary subtag (e.g. es-MX)
    redirects_primary_subtag: AtomicUsize,

    /// Redirects that fell back to the default locale
    redirects_default: AtomicUsize,

    /// Redirects issued by the admin route guard
    admin_redirects: AtomicUsize,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one locale resolution.
    pub fn record_decision(&self, decision: &LocaleDecision) {
        let counter = match decision {
            LocaleDecision::Proceed { locale: None } => &self.passthroughs,
            LocaleDecision::Proceed { locale: Some(_) } => &self.localized,
            LocaleDecision::Redirect { matched, .. } => match matched {
                MatchKind::Exact => &self.redirects_exact,
                MatchKind::PrimarySubtag => &self.redirects_primary_subtag,
                MatchKind::Default => &self.redirects_default,
            },
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a redirect issued by the admin route guard.
    pub fn record_admin_redirect(&self) {
        self.admin_redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn passthroughs(&self) -> usize {
        self.passthroughs.load(Ordering::Relaxed)
    }

    pub fn localized(&self) -> usize {
        self.localized.load(Ordering::Relaxed)
    }

    /// Total locale redirects, whatever matched.
    pub fn locale_redirects(&self) -> usize {
        self.redirects_exact.load(Ordering::Relaxed)
            + self.redirects_primary_subtag.load(Ordering::Relaxed)
            + self.redirects_default.load(Ordering::Relaxed)
    }

    pub fn admin_redirects(&self) -> usize {
        self.admin_redirects.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let redirects_exact = self.redirects_exact.load(Ordering::Relaxed);
        let redirects_primary_subtag = self.redirects_primary_subtag.load(Ordering::Relaxed);
        let redirects_default = self.redirects_default.load(Ordering::Relaxed);
        let locale_redirects = redirects_exact + redirects_primary_subtag + redirects_default;

        let header_match_rate = if locale_redirects > 0 {
            ((redirects_exact + redirects_primary_subtag) as f64 / locale_redirects as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            passthroughs: self.passthroughs(),
            localized: self.localized(),
            locale_redirects,
            redirects_exact,
            redirects_primary_subtag,
            redirects_default,
            header_match_rate,
            admin_redirects: self.admin_redirects(),
        }
    }
}

/// Snapshot of the routing counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub passthroughs: usize,
    pub localized: usize,
    pub locale_redirects: usize,
    pub redirects_exact: usize,
    pub redirects_primary_subtag: usize,
    pub redirects_default: usize,

    /// Share of locale redirects decided by the Accept-Language header, as a
    /// percentage (0-100)
    pub header_match_rate: f64,

    pub admin_redirects: usize,
}
