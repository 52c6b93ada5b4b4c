//! Locale preference persistence and switching.
//!
//! The stored preference is written on explicit language switch and read
//! opportunistically afterwards. It is informational only: the site never
//! redirects on a mismatch between the stored preference and the locale of
//! the page being viewed. That is deliberate policy, not a missing feature.

use crate::i18n::routes::{is_valid_locale, language_variant_url};
use crate::i18n::Locale;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Well-known key the chosen locale is stored under.
pub const PREFERRED_LOCALE_KEY: &str = "preferred-language";

/// Best-effort client-scoped storage for the locale preference.
///
/// Storage can be unavailable (disabled cookies, quota, private mode).
/// Implementations swallow such failures: `set` is fire-and-forget and
/// `get` answers `None`, so a broken store never blocks navigation.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(values) => values.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

/// Stateless switch service.
///
/// Constructed by the host and handed by reference to whatever binds user
/// actions; it owns no state beyond the store it writes through.
pub struct LocaleSwitcher<'a> {
    store: &'a dyn PreferenceStore,
}

impl<'a> LocaleSwitcher<'a> {
    pub fn new(store: &'a dyn PreferenceStore) -> Self {
        Self { store }
    }

    /// Switch the current page to another locale.
    ///
    /// Returns the path to navigate to, or `None` when the tag is not a
    /// supported locale; the operation is rejected rather than producing a
    /// malformed URL. The preference write is best-effort.
    pub fn switch(&self, current_path: &str, target_tag: &str) -> Option<String> {
        if !is_valid_locale(target_tag) {
            warn!(
                "Rejected language switch to unsupported tag '{}'",
                target_tag
            );
            return None;
        }

        // Valid by the membership check above
        let target = Locale::from_code(target_tag).ok()?;
        self.store.set(PREFERRED_LOCALE_KEY, target.code());
        Some(language_variant_url(current_path, target))
    }

    /// Read the stored preference, if any.
    ///
    /// A stored tag that is no longer supported is ignored.
    pub fn preferred(&self) -> Option<Locale> {
        let tag = self.store.get(PREFERRED_LOCALE_KEY)?;
        match Locale::from_code(&tag) {
            Ok(locale) => Some(locale),
            Err(_) => {
                debug!("Ignoring stored preference with unsupported tag '{}'", tag);
                None
            }
        }
    }
}
