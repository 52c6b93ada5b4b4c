//! Locale-aware path routing.
//!
//! All path <-> locale transformations live here, as pure total functions:
//! no state, no I/O, and no input makes them fail. Malformed or empty paths
//! normalize to the site root instead of producing errors.
//!
//! URL scheme invariant: the default locale never appears as a URL segment,
//! every non-default locale always appears as the leading segment.

use crate::i18n::{Locale, LocaleRegistry};
use serde::Serialize;

/// One language variant of a page, for `<link rel="alternate">` metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    /// Locale tag (e.g., "zh")
    pub locale: &'static str,

    /// Absolute URL of this variant (site origin + localized path)
    pub href: String,

    /// IETF language tag for the `hreflang` attribute (e.g., "zh-CN")
    pub hreflang: &'static str,
}

/// Determine the locale a path addresses.
///
/// The first non-empty segment decides: a supported tag selects that
/// locale, anything else (including an empty path) means the default.
/// Splitting ignores empty segments, so doubled slashes are harmless.
pub fn locale_from_path(path: &str) -> Locale {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .and_then(|segment| Locale::from_code(segment).ok())
        .unwrap_or_else(Locale::default_locale)
}

/// Check whether a tag names a supported locale.
///
/// Exact, case-sensitive membership: empty and unknown tags are false.
pub fn is_valid_locale(tag: &str) -> bool {
    LocaleRegistry::get().is_supported(tag)
}

/// Build the localized form of a clean (locale-free) path.
///
/// The input is normalized first: empty becomes `/`, a relative path gains
/// a leading slash. The default locale leaves the normalized path
/// unchanged. A non-default locale is prefixed as a leading segment; the
/// root keeps its trailing slash (`/` -> `/zh/`, not `/zh`).
pub fn localized_path(path: &str, target: Locale) -> String {
    let normalized = normalize(path);

    if target.is_default() {
        return normalized;
    }

    if normalized == "/" {
        format!("/{}/", target.code())
    } else {
        format!("/{}{}", target.code(), normalized)
    }
}

/// Compute the equivalent path under another locale.
///
/// Strips the current locale's leading segment when the path carries one
/// (a redundant default-locale prefix like `/en/speakers` is also
/// normalized away), then localizes the remainder for the target. The
/// operation is idempotent for the locale already active on the path, and
/// switching twice equals switching once to the final target.
pub fn language_variant_url(current_path: &str, target: Locale) -> String {
    let current = locale_from_path(current_path);
    let clean = strip_locale_prefix(current_path, current);
    localized_path(&clean, target)
}

/// Alternate-language links for the current page, in declared locale order
/// (default first). Hrefs are absolute: site origin + localized path.
pub fn alternate_links(current_path: &str, site_origin: &str) -> Vec<AlternateLink> {
    let current = locale_from_path(current_path);
    let clean = strip_locale_prefix(current_path, current);

    Locale::all()
        .into_iter()
        .map(|locale| AlternateLink {
            locale: locale.code(),
            href: format!("{}{}", site_origin, localized_path(&clean, locale)),
            hreflang: locale.hreflang(),
        })
        .collect()
}

/// Remove a locale's leading segment from a path, leaving `/` if nothing
/// remains. Paths that do not carry the segment come back normalized but
/// otherwise untouched; interior doubled slashes are not repaired.
pub fn strip_locale_prefix(path: &str, locale: Locale) -> String {
    let trimmed = path.trim_start_matches('/');
    match trimmed.strip_prefix(locale.code()) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => normalize(path),
    }
}

/// Normalize any input to a `/`-rooted path. Empty means root.
fn normalize(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== locale_from_path Tests ====================

    #[test]
    fn test_locale_from_path_chinese() {
        assert_eq!(locale_from_path("/zh/speakers"), Locale::CHINESE);
        assert_eq!(locale_from_path("/zh"), Locale::CHINESE);
        assert_eq!(locale_from_path("/zh/"), Locale::CHINESE);
    }

    #[test]
    fn test_locale_from_path_default() {
        assert_eq!(locale_from_path("/speakers"), Locale::ENGLISH);
        assert_eq!(locale_from_path("/"), Locale::ENGLISH);
        assert_eq!(locale_from_path(""), Locale::ENGLISH);
    }

    #[test]
    fn test_locale_from_path_redundant_default_prefix() {
        assert_eq!(locale_from_path("/en/speakers"), Locale::ENGLISH);
    }

    #[test]
    fn test_locale_from_path_lookalike_segment() {
        // "zhx" and "zh-CN" are not supported tags
        assert_eq!(locale_from_path("/zhx/speakers"), Locale::ENGLISH);
        assert_eq!(locale_from_path("/zh-CN/speakers"), Locale::ENGLISH);
    }

    #[test]
    fn test_locale_from_path_doubled_slashes() {
        assert_eq!(locale_from_path("//zh/speakers"), Locale::CHINESE);
        assert_eq!(locale_from_path("//"), Locale::ENGLISH);
    }

    #[test]
    fn test_locale_from_path_relative_input() {
        assert_eq!(locale_from_path("zh/speakers"), Locale::CHINESE);
        assert_eq!(locale_from_path("speakers"), Locale::ENGLISH);
    }

    // ==================== is_valid_locale Tests ====================

    #[test]
    fn test_is_valid_locale_supported() {
        assert!(is_valid_locale("en"));
        assert!(is_valid_locale("zh"));
    }

    #[test]
    fn test_is_valid_locale_rejects_others() {
        assert!(!is_valid_locale(""));
        assert!(!is_valid_locale("fr"));
        assert!(!is_valid_locale("ZH"));
        assert!(!is_valid_locale("zh-CN"));
    }

    // ==================== localized_path Tests ====================

    #[test]
    fn test_localized_path_default_is_identity() {
        assert_eq!(localized_path("/speakers", Locale::ENGLISH), "/speakers");
        assert_eq!(localized_path("/", Locale::ENGLISH), "/");
        assert_eq!(localized_path("", Locale::ENGLISH), "/");
    }

    #[test]
    fn test_localized_path_chinese_prefix() {
        assert_eq!(localized_path("/speakers", Locale::CHINESE), "/zh/speakers");
        assert_eq!(
            localized_path("/speakers/alice", Locale::CHINESE),
            "/zh/speakers/alice"
        );
    }

    #[test]
    fn test_localized_path_root_keeps_trailing_slash() {
        assert_eq!(localized_path("/", Locale::CHINESE), "/zh/");
        assert_eq!(localized_path("", Locale::CHINESE), "/zh/");
    }

    #[test]
    fn test_localized_path_relative_input_gains_slash() {
        assert_eq!(localized_path("speakers", Locale::ENGLISH), "/speakers");
        assert_eq!(localized_path("speakers", Locale::CHINESE), "/zh/speakers");
    }

    #[test]
    fn test_localized_path_tolerates_doubled_slashes() {
        // Not repaired, but always a /-rooted string
        assert_eq!(
            localized_path("//speakers", Locale::CHINESE),
            "/zh//speakers"
        );
    }

    // ==================== language_variant_url Tests ====================

    #[test]
    fn test_variant_chinese_to_english() {
        assert_eq!(
            language_variant_url("/zh/speakers", Locale::ENGLISH),
            "/speakers"
        );
    }

    #[test]
    fn test_variant_english_to_chinese() {
        assert_eq!(
            language_variant_url("/speakers", Locale::CHINESE),
            "/zh/speakers"
        );
    }

    #[test]
    fn test_variant_root_paths() {
        assert_eq!(language_variant_url("/", Locale::CHINESE), "/zh/");
        assert_eq!(language_variant_url("/zh/", Locale::ENGLISH), "/");
        assert_eq!(language_variant_url("/zh", Locale::ENGLISH), "/");
        assert_eq!(language_variant_url("", Locale::CHINESE), "/zh/");
    }

    #[test]
    fn test_variant_is_idempotent() {
        let once = language_variant_url("/zh/speakers", Locale::CHINESE);
        assert_eq!(once, "/zh/speakers");
        assert_eq!(language_variant_url(&once, Locale::CHINESE), once);

        let once = language_variant_url("/speakers", Locale::ENGLISH);
        assert_eq!(once, "/speakers");
        assert_eq!(language_variant_url(&once, Locale::ENGLISH), once);
    }

    #[test]
    fn test_variant_is_history_independent() {
        let via_zh = language_variant_url(
            &language_variant_url("/speakers", Locale::CHINESE),
            Locale::ENGLISH,
        );
        assert_eq!(via_zh, language_variant_url("/speakers", Locale::ENGLISH));
    }

    #[test]
    fn test_variant_strips_redundant_default_prefix() {
        assert_eq!(
            language_variant_url("/en/speakers", Locale::CHINESE),
            "/zh/speakers"
        );
        assert_eq!(
            language_variant_url("/en/speakers", Locale::ENGLISH),
            "/speakers"
        );
    }

    #[test]
    fn test_variant_tolerates_doubled_slashes() {
        assert_eq!(
            language_variant_url("/zh//speakers", Locale::ENGLISH),
            "//speakers"
        );
        assert_eq!(locale_from_path("//speakers"), Locale::ENGLISH);
        assert_eq!(
            language_variant_url("//zh/speakers", Locale::ENGLISH),
            "/speakers"
        );
    }

    #[test]
    fn test_variant_deep_path() {
        assert_eq!(
            language_variant_url("/zh/workshops/rust-intro", Locale::ENGLISH),
            "/workshops/rust-intro"
        );
        assert_eq!(
            language_variant_url("/workshops/rust-intro", Locale::CHINESE),
            "/zh/workshops/rust-intro"
        );
    }

    // ==================== strip_locale_prefix Tests ====================

    #[test]
    fn test_strip_locale_prefix() {
        assert_eq!(strip_locale_prefix("/zh/speakers", Locale::CHINESE), "/speakers");
        assert_eq!(strip_locale_prefix("/zh", Locale::CHINESE), "/");
        assert_eq!(strip_locale_prefix("/zh/", Locale::CHINESE), "/");
    }

    #[test]
    fn test_strip_locale_prefix_absent() {
        assert_eq!(strip_locale_prefix("/speakers", Locale::CHINESE), "/speakers");
        assert_eq!(strip_locale_prefix("/", Locale::CHINESE), "/");
    }

    #[test]
    fn test_strip_locale_prefix_requires_segment_boundary() {
        // "/zhx" does not carry a "zh" segment
        assert_eq!(strip_locale_prefix("/zhx", Locale::CHINESE), "/zhx");
    }

    // ==================== alternate_links Tests ====================

    #[test]
    fn test_alternate_links_for_clean_path() {
        let links = alternate_links("/speakers", "https://example.org");

        assert_eq!(
            links,
            vec![
                AlternateLink {
                    locale: "en",
                    href: "https://example.org/speakers".to_string(),
                    hreflang: "en",
                },
                AlternateLink {
                    locale: "zh",
                    href: "https://example.org/zh/speakers".to_string(),
                    hreflang: "zh-CN",
                },
            ]
        );
    }

    #[test]
    fn test_alternate_links_strip_current_locale() {
        let links = alternate_links("/zh/speakers", "https://example.org");

        assert_eq!(links[0].href, "https://example.org/speakers");
        assert_eq!(links[1].href, "https://example.org/zh/speakers");
    }

    #[test]
    fn test_alternate_links_for_root() {
        let links = alternate_links("", "https://example.org");

        assert_eq!(links[0].href, "https://example.org/");
        assert_eq!(links[1].href, "https://example.org/zh/");
    }

    #[test]
    fn test_alternate_links_order_default_first() {
        let links = alternate_links("/zh/faq", "https://example.org");

        let locales: Vec<&str> = links.iter().map(|link| link.locale).collect();
        assert_eq!(locales, vec!["en", "zh"]);
    }

    #[test]
    fn test_alternate_link_serializes() {
        let links = alternate_links("/faq", "https://example.org");
        let json = serde_json::to_string(&links[1]).expect("serialize");

        assert!(json.contains("\"locale\":\"zh\""));
        assert!(json.contains("\"hreflang\":\"zh-CN\""));
        assert!(json.contains("/zh/faq"));
    }
}
