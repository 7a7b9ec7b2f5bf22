//! Dictionary consistency checks.
//!
//! Every translated dictionary is compared against the default locale's
//! dictionary so that missing strings and broken placeholders show up in the
//! startup log instead of as blank UI.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::i18n::{Dictionary, DictionaryLoader};

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys missing from the translation
    pub errors: Vec<String>,

    /// Extra keys and placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for dictionary consistency.
pub struct DictionaryValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare `translation` against the `reference` dictionary.
    ///
    /// - A reference key missing from the translation is an error.
    /// - A translation key absent from the reference is a warning.
    /// - A shared key whose `{placeholder}` names differ is a warning.
    pub fn validate(reference: &Dictionary, translation: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys: BTreeSet<String> = reference.keys().into_iter().collect();
        let translation_keys: BTreeSet<String> = translation.keys().into_iter().collect();

        for key in reference_keys.difference(&translation_keys) {
            report.errors.push(format!("Missing key: {}", key));
        }

        for key in translation_keys.difference(&reference_keys) {
            report.warnings.push(format!("Unexpected key: {}", key));
        }

        for key in reference_keys.intersection(&translation_keys) {
            let (Some(original), Some(translated)) = (reference.lookup(key), translation.lookup(key))
            else {
                continue;
            };

            let orig_placeholders = Self::extract_placeholders(original);
            let trans_placeholders = Self::extract_placeholders(translated);
            if orig_placeholders != trans_placeholders {
                report.warnings.push(format!(
                    "Placeholder mismatch in {}: reference has {:?}, translation has {:?}",
                    key, orig_placeholders, trans_placeholders
                ));
            }
        }

        report
    }

    /// Validate every non-default dictionary of a loader against the default.
    ///
    /// Results are logged and returned in locale-set order.
    pub fn validate_loader(loader: &DictionaryLoader) -> Vec<(String, ValidationReport)> {
        let reference = loader.default_dictionary();
        let locales = loader.locales();

        locales
            .codes()
            .filter(|code| !locales.is_default(code))
            .map(|code| {
                let report = Self::validate(&reference, &loader.load(code));
                log_report(code, &report);
                (code.to_string(), report)
            })
            .collect()
    }

    /// Extract all `{name}` placeholders from text
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

fn log_report(code: &str, report: &ValidationReport) {
    if report.is_clean() {
        info!("✓ Dictionary '{}' matches the default dictionary", code);
        return;
    }
    for error in &report.errors {
        warn!("Dictionary '{}': {}", code, error);
    }
    for warning in &report.warnings {
        warn!("Dictionary '{}': {}", code, warning);
    }
}
