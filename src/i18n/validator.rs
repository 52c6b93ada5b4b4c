//! Translation-table consistency checks.
//!
//! Run once after loading, the validator reports keys that exist in one
//! locale but not another and `{{placeholder}}` sets that differ between
//! locales for the same key. Findings are logged by the caller; nothing
//! here is fatal, since missing keys degrade to fallback at lookup time.

use crate::i18n::{Locale, Translations};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation findings for the loaded tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Conditions that leave whole locales unusable
    pub errors: Vec<String>,

    /// Per-key inconsistencies; lookups still work via fallback
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for loaded translation tables.
pub struct TranslationValidator;

// Placeholder pattern, cached for reuse across keys
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Compare every non-default locale's table against the default one.
    ///
    /// An empty default table is an error: it means raw keys are the final
    /// fallback for the whole site. Key-set differences and placeholder
    /// mismatches are warnings.
    pub fn validate(translations: &Translations) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default = Locale::default_locale();
        let default_keys = Self::leaf_keys(translations.table(default));

        if default_keys.is_empty() {
            report.errors.push(format!(
                "Default locale '{}' has no translations; lookups will return raw keys",
                default.code()
            ));
        }

        for locale in Locale::all() {
            if locale == default {
                continue;
            }

            let keys = Self::leaf_keys(translations.table(locale));

            let missing: Vec<_> = default_keys.difference(&keys).cloned().collect();
            if !missing.is_empty() {
                report.warnings.push(format!(
                    "Locale '{}' is missing {} key(s): {}",
                    locale.code(),
                    missing.len(),
                    missing.join(", ")
                ));
            }

            let extra: Vec<_> = keys.difference(&default_keys).cloned().collect();
            if !extra.is_empty() {
                report.warnings.push(format!(
                    "Locale '{}' has {} key(s) absent from '{}': {}",
                    locale.code(),
                    extra.len(),
                    default.code(),
                    extra.join(", ")
                ));
            }

            for key in default_keys.intersection(&keys) {
                let default_params =
                    Self::placeholders(leaf_value(translations.table(default), key));
                let locale_params = Self::placeholders(leaf_value(translations.table(locale), key));
                if default_params != locale_params {
                    report.warnings.push(format!(
                        "Placeholder mismatch for '{}': '{}' has {:?}, '{}' has {:?}",
                        key,
                        default.code(),
                        default_params,
                        locale.code(),
                        locale_params
                    ));
                }
            }
        }

        report
    }

    /// All dot-separated paths that resolve to string leaves.
    fn leaf_keys(table: &Value) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        Self::collect_leaf_keys(table, String::new(), &mut keys);
        keys
    }

    fn collect_leaf_keys(value: &Value, prefix: String, keys: &mut BTreeSet<String>) {
        match value {
            Value::Object(map) => {
                for (name, child) in map {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{}.{}", prefix, name)
                    };
                    Self::collect_leaf_keys(child, path, keys);
                }
            }
            Value::String(_) => {
                if !prefix.is_empty() {
                    keys.insert(prefix);
                }
            }
            // Non-string leaves are invisible to lookup; skip them
            _ => {}
        }
    }

    /// Extract the set of `{{name}}` placeholders in a string.
    fn placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Resolve a known-good leaf path to its string value.
fn leaf_value<'a>(table: &'a Value, key: &str) -> &'a str {
    let mut current = table;
    for part in key.split('.') {
        match current.get(part) {
            Some(child) => current = child,
            None => return "",
        }
    }
    current.as_str().unwrap_or("")
}
