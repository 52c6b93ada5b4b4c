//! HTTP serving layer.
//!
//! Thin glue over the i18n core:
//! - locale middleware classifies every request path and attaches the
//!   resulting `Locale` to the request's extensions
//! - the switch endpoint persists the chosen locale (cookie) and redirects
//!   to the equivalent page under the target locale
//! - the alternate-links endpoint exposes SEO metadata to template
//!   collaborators
//! - the page handler renders a minimal localized shell around the core

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use tracing::debug;
use url::form_urlencoded;

use crate::config::Config;
use crate::i18n::{
    routes, AlternateLink, Locale, LocaleSwitcher, PreferenceStore, Translations,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translations: Arc<Translations>,
}

/// Build the axum router with all routes and middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/language/switch", get(switch_language))
        .route("/api/alternate-links", get(alternate_links_handler))
        .route("/", get(page))
        .route("/*path", get(page))
        .layer(middleware::from_fn(locale_middleware))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Classify the request path's locale and attach it for downstream
/// handlers. The stored preference is read for diagnostics only; a
/// mismatch never triggers a redirect.
async fn locale_middleware(mut req: Request, next: Next) -> Response {
    let locale = routes::locale_from_path(req.uri().path());

    let store = CookiePreferences::from_headers(req.headers());
    if let Some(preferred) = LocaleSwitcher::new(&store).preferred() {
        if preferred != locale {
            debug!(
                "Stored preference '{}' differs from page locale '{}'",
                preferred.code(),
                locale.code()
            );
        }
    }

    req.extensions_mut().insert(locale);
    next.run(req).await
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct SwitchParams {
    /// Target locale tag
    to: String,

    /// Path of the page being switched; defaults to the site root
    #[serde(default)]
    from: Option<String>,
}

/// Switch the language of a page: persist the preference and redirect to
/// the equivalent path under the target locale. An unsupported tag is
/// rejected with 400 instead of producing a malformed URL.
async fn switch_language(headers: HeaderMap, Query(params): Query<SwitchParams>) -> Response {
    let store = CookiePreferences::from_headers(&headers);
    let switcher = LocaleSwitcher::new(&store);
    let from = params.from.as_deref().unwrap_or("/");
    // A redirect target starting with "//" is a protocol-relative URL and
    // would send the browser to another host; collapse repeated leading
    // slashes so the Location header always stays site-relative.
    let from = format!("/{}", from.trim_start_matches('/'));

    let Some(location) = switcher.switch(&from, &params.to) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Unsupported locale: {}", params.to),
        )
            .into_response();
    };

    let location = HeaderValue::from_str(&location)
        .unwrap_or_else(|_| HeaderValue::from_static("/"));

    let mut response = (StatusCode::SEE_OTHER, "").into_response();
    response.headers_mut().insert(header::LOCATION, location);
    if let Some(cookie) = store.pending_set_cookie() {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

#[derive(Debug, Deserialize)]
struct AlternateParams {
    /// Current page path; defaults to the site root
    #[serde(default)]
    path: String,
}

/// Alternate-language link metadata for a page, one entry per supported
/// locale in declared order.
async fn alternate_links_handler(
    State(state): State<AppState>,
    Query(params): Query<AlternateParams>,
) -> Json<Vec<AlternateLink>> {
    Json(routes::alternate_links(&params.path, &state.config.site_origin))
}

/// Render the localized page shell for any site path.
async fn page(
    State(state): State<AppState>,
    Extension(locale): Extension<Locale>,
    uri: Uri,
) -> Html<String> {
    Html(render_shell(&state, locale, uri.path()))
}

/// Sections of the site, as (translation key, clean path) pairs.
const NAV_SECTIONS: &[(&str, &str)] = &[
    ("nav.home", "/"),
    ("nav.speakers", "/speakers"),
    ("nav.schedule", "/schedule"),
    ("nav.workshops", "/workshops"),
    ("nav.tickets", "/tickets"),
    ("nav.sponsors", "/sponsors"),
    ("nav.faq", "/faq"),
    ("nav.venue", "/venue"),
];

/// Minimal HTML shell: enough to carry the `<html lang>` attribute, the
/// alternate-link head entries, translated navigation, and the language
/// switcher anchors. Not a template engine.
fn render_shell(state: &AppState, locale: Locale, path: &str) -> String {
    let translations = &state.translations;

    let alternates: String = routes::alternate_links(path, &state.config.site_origin)
        .iter()
        .map(|link| {
            format!(
                "    <link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
                link.hreflang, link.href
            )
        })
        .collect();

    let nav: String = NAV_SECTIONS
        .iter()
        .map(|(key, clean)| {
            format!(
                "      <a href=\"{}\">{}</a>\n",
                routes::localized_path(clean, locale),
                translations.translate(locale, key)
            )
        })
        .collect();

    // The raw path goes into a query value; characters like '&' would
    // terminate the parameter early without encoding.
    let from_param: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    let switcher: String = Locale::all()
        .into_iter()
        .map(|target| {
            format!(
                "      <a data-language-switch=\"{code}\" \
                 href=\"/language/switch?to={code}&amp;from={from}\">{label}</a>\n",
                code = target.code(),
                from = from_param,
                label = target.native_name()
            )
        })
        .collect();

    let title = translations.translate(locale, "site.title");
    let tagline = translations.translate_with_params(
        locale,
        "site.tagline",
        &[("year", "2025"), ("city", "Hangzhou")],
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8" />
    <title>{title}</title>
{alternates}</head>
<body>
    <header>
      <h1>{title}</h1>
      <p>{tagline}</p>
    </header>
    <nav>
{nav}    </nav>
    <div class="language-dropdown">
{switcher}    </div>
</body>
</html>
"#,
        lang = locale.hreflang(),
        title = title,
        tagline = tagline,
        alternates = alternates,
        nav = nav,
        switcher = switcher,
    )
}

/// Cookie-backed preference store for one request.
///
/// Reads the incoming `Cookie` header; writes are collected so the handler
/// can emit a `Set-Cookie` header. Parse failures simply mean "no stored
/// preference".
pub struct CookiePreferences {
    incoming: HashMap<String, String>,
    pending: Mutex<Option<(String, String)>>,
}

impl CookiePreferences {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let incoming = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(parse_cookie_header)
            .unwrap_or_default();

        Self {
            incoming,
            pending: Mutex::new(None),
        }
    }

    /// `Set-Cookie` header value for a pending write, if any.
    pub fn pending_set_cookie(&self) -> Option<String> {
        let pending = self.pending.lock().ok()?;
        pending.as_ref().map(|(key, value)| {
            format!("{}={}; Path=/; Max-Age=31536000; SameSite=Lax", key, value)
        })
    }
}

impl PreferenceStore for CookiePreferences {
    fn get(&self, key: &str) -> Option<String> {
        if let Ok(pending) = self.pending.lock() {
            if let Some((pending_key, value)) = pending.as_ref() {
                if pending_key == key {
                    return Some(value.clone());
                }
            }
        }
        self.incoming.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some((key.to_string(), value.to_string()));
        }
    }
}

fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::PREFERRED_LOCALE_KEY;

    // ==================== Cookie Parsing Tests ====================

    #[test]
    fn test_parse_cookie_header_single() {
        let cookies = parse_cookie_header("preferred-language=zh");
        assert_eq!(cookies.get("preferred-language").map(String::as_str), Some("zh"));
    }

    #[test]
    fn test_parse_cookie_header_multiple() {
        let cookies = parse_cookie_header("a=1; preferred-language=en; b=2");
        assert_eq!(cookies.get(PREFERRED_LOCALE_KEY).map(String::as_str), Some("en"));
        assert_eq!(cookies.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_parse_cookie_header_malformed() {
        let cookies = parse_cookie_header("garbage; ;=;");
        assert!(cookies.get(PREFERRED_LOCALE_KEY).is_none());
    }

    // ==================== CookiePreferences Tests ====================

    #[test]
    fn test_cookie_preferences_reads_incoming() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("preferred-language=zh"),
        );

        let store = CookiePreferences::from_headers(&headers);
        assert_eq!(store.get(PREFERRED_LOCALE_KEY).as_deref(), Some("zh"));
        assert!(store.pending_set_cookie().is_none());
    }

    #[test]
    fn test_cookie_preferences_set_builds_set_cookie() {
        let store = CookiePreferences::from_headers(&HeaderMap::new());
        store.set(PREFERRED_LOCALE_KEY, "zh");

        let header = store.pending_set_cookie().expect("pending cookie");
        assert!(header.starts_with("preferred-language=zh"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Max-Age=31536000"));
    }

    #[test]
    fn test_cookie_preferences_pending_wins_over_incoming() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("preferred-language=en"),
        );

        let store = CookiePreferences::from_headers(&headers);
        store.set(PREFERRED_LOCALE_KEY, "zh");
        assert_eq!(store.get(PREFERRED_LOCALE_KEY).as_deref(), Some("zh"));
    }

    #[test]
    fn test_cookie_preferences_missing_header() {
        let store = CookiePreferences::from_headers(&HeaderMap::new());
        assert!(store.get(PREFERRED_LOCALE_KEY).is_none());
    }
}
