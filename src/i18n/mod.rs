//! Internationalization (i18n) for the bilingual conference site.
//!
//! Everything locale-related lives here: the supported-locale registry,
//! locale-aware path routing, translation lookup with fallback, and the
//! language-switch preference handling.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for supported locales and metadata
//! - `locale`: validated `Locale` type backed by the registry
//! - `routes`: pure path <-> locale transformations (prefixing, stripping,
//!   SEO alternate links)
//! - `translations`: per-locale nested JSON tables with deterministic
//!   fallback
//! - `validator`: post-load consistency checks across locales
//! - `metrics`: lookup observability counters
//! - `preference`: stored-preference handling and the switch service
//!
//! # Example
//!
//! ```rust,ignore
//! use conference_site::i18n::{routes, Locale, Translations};
//!
//! let translations = Translations::load("locales");
//! let locale = routes::locale_from_path("/zh/speakers");
//! let label = translations.translate(locale, "nav.speakers");
//! let links = routes::alternate_links("/zh/speakers", "https://example.org");
//! ```

mod locale;
mod metrics;
mod preference;
mod registry;
pub mod routes;
mod translations;
mod validator;

pub use locale::Locale;
pub use metrics::{LookupMetrics, LookupReport};
pub use preference::{
    LocaleSwitcher, MemoryPreferenceStore, PreferenceStore, PREFERRED_LOCALE_KEY,
};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use routes::AlternateLink;
pub use translations::{TableLoadError, Translations};
pub use validator::{TranslationValidator, ValidationReport};
