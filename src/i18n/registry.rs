//! Locale registry: single source of truth for all supported locales.
//!
//! The registry holds the ordered list of locales the site is built for,
//! with the default locale first. It uses a singleton pattern with
//! `OnceLock` to ensure thread-safe initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Locale tag used in URLs and translation files (e.g., "en", "zh")
    pub code: &'static str,

    /// IETF language tag emitted in SEO alternate-link metadata.
    /// May differ from the URL tag (e.g., "zh" -> "zh-CN").
    pub hreflang: &'static str,

    /// English name of the language (e.g., "English", "Chinese")
    pub name: &'static str,

    /// Native name shown in the language switcher (e.g., "中文")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one should be true).
    /// The default locale never appears as a URL segment.
    pub is_default: bool,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter. The declared
/// order matters: alternate links are emitted in this order, default first.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: site_locales(),
        })
    }

    /// Look up a locale configuration by its URL tag.
    ///
    /// Matching is exact and case-sensitive: `"ZH"` is not a supported tag.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All supported locales in declared order (default first).
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if no default locale is declared or if more than one is
    /// (this indicates a configuration error, caught at first access).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale declared in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales declared in registry"),
        }
    }

    /// Check if a tag names a supported locale.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// The locales this site is built for.
///
/// Order is the declared order used for alternate links: default first.
fn site_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            hreflang: "en",
            name: "English",
            native_name: "English",
            is_default: true,
        },
        LocaleConfig {
            code: "zh",
            hreflang: "zh-CN",
            name: "Chinese",
            native_name: "中文",
            is_default: false,
        },
    ]
}
