//! Locale type: validated language/region tag.
//!
//! A `Locale` can only be constructed for tags present in the registry, so
//! every value of this type is guaranteed to be a supported locale.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};

/// A validated locale.
///
/// Cheap to copy; carries only the static tag and resolves metadata through
/// the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Locale tag as it appears in URLs (e.g., "en", "zh")
    code: &'static str,
}

impl Locale {
    /// English, the default locale.
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Simplified Chinese.
    pub const CHINESE: Locale = Locale { code: "zh" };

    /// Create a `Locale` from a tag string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the tag names a supported locale
    /// * `Err` for unknown tags (including empty and case-mismatched ones)
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            // Use the static str from the registry
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unsupported locale tag: '{}'", code),
        }
    }

    /// The default locale: the one that never appears as a URL segment.
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// All supported locales in declared order (default first).
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    /// The locale tag as used in URLs and translation file names.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the tag is not in the registry, which cannot happen for a
    /// properly constructed `Locale`.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale tag should always be registered")
    }

    /// IETF language tag for SEO alternate-link metadata.
    pub fn hreflang(&self) -> &'static str {
        self.config().hreflang
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name shown in the language switcher.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}
