//! Translation lookup over per-locale nested JSON tables.
//!
//! Tables are loaded once at startup and read-only afterwards; the loaded
//! `Translations` value is passed to consumers instead of living in a
//! mutable global. Missing keys are a normal runtime condition: lookup
//! falls back to the default locale's table, then to the key itself, and
//! never fails.

use crate::i18n::{Locale, LookupMetrics};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Failure to load one locale's translation table.
///
/// Never fatal: the affected locale degrades to default-locale fallback.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("failed to read translation file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse translation file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("translation file {path} is not a JSON object")]
    NotAnObject { path: String },
}

/// Read-only translation tables for all supported locales.
pub struct Translations {
    tables: HashMap<Locale, Value>,
}

impl Translations {
    /// Load one table per registered locale from `<dir>/<tag>.json`.
    ///
    /// A read or parse failure is logged and leaves that locale's table
    /// empty, which degrades its lookups to the default-locale fallback.
    /// Loading itself never fails.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut tables = HashMap::new();

        for locale in Locale::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            let table = match load_table(&path) {
                Ok(table) => {
                    info!(
                        "Loaded translations for '{}' from {}",
                        locale.code(),
                        path.display()
                    );
                    table
                }
                Err(error) => {
                    warn!(
                        "Translations for '{}' unavailable, lookups will fall back: {:#}",
                        locale.code(),
                        anyhow::Error::new(error)
                    );
                    empty_table()
                }
            };
            tables.insert(locale, table);
        }

        Self { tables }
    }

    /// Build from in-memory tables. Locales without an entry get an empty
    /// table.
    pub fn from_tables(tables: HashMap<Locale, Value>) -> Self {
        let mut full = tables;
        for locale in Locale::all() {
            full.entry(locale).or_insert_with(empty_table);
        }
        Self { tables: full }
    }

    /// Empty tables for every locale; every lookup returns the raw key.
    pub fn empty() -> Self {
        Self::from_tables(HashMap::new())
    }

    /// Resolve a dot-separated key for a locale.
    ///
    /// Falls back to the default locale's table when the locale's own walk
    /// fails, then to the key itself. Only the raw-key outcome is logged.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        let metrics = LookupMetrics::global();

        if let Some(text) = self.lookup(locale, key) {
            metrics.record_hit();
            return text.to_string();
        }

        let default = Locale::default_locale();
        if locale != default {
            if let Some(text) = self.lookup(default, key) {
                metrics.record_default_fallback();
                return text.to_string();
            }
        }

        metrics.record_key_fallback();
        warn!(
            "Missing translation for key '{}' in locale '{}'",
            key,
            locale.code()
        );
        key.to_string()
    }

    /// Like [`translate`](Self::translate), substituting `{{name}}` tokens
    /// from `params`. Unmatched tokens are left as-is; extra params are
    /// ignored.
    pub fn translate_with_params(
        &self,
        locale: Locale,
        key: &str,
        params: &[(&str, &str)],
    ) -> String {
        let mut text = self.translate(locale, key);
        for (name, value) in params {
            let token = format!("{{{{{}}}}}", name);
            if text.contains(&token) {
                text = text.replace(&token, value);
            }
        }
        text
    }

    /// The raw table for a locale. Used by the consistency validator.
    pub fn table(&self, locale: Locale) -> &Value {
        // Every registered locale has an entry by construction
        self.tables
            .get(&locale)
            .expect("Registered locale should always have a table")
    }

    /// Walk the dot-separated key through one locale's table. A missing
    /// part or a non-string value reached at the end is "not found".
    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut current = self.tables.get(&locale)?;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        current.as_str()
    }
}

fn load_table(path: &Path) -> Result<Value, TableLoadError> {
    let display = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| TableLoadError::Io {
        path: display.clone(),
        source,
    })?;

    let table: Value = serde_json::from_str(&raw).map_err(|source| TableLoadError::Parse {
        path: display.clone(),
        source,
    })?;

    if !table.is_object() {
        return Err(TableLoadError::NotAnObject { path: display });
    }

    Ok(table)
}

fn empty_table() -> Value {
    Value::Object(serde_json::Map::new())
}
