//! Identifier and URL helpers. Pure functions, no state.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::config::{DEFAULT_SEARCH_URL, START_PAGE_URL};

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons?domain=";

/// Fresh unique identifier.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Sentinel and `about:` pages never reach history or favorites.
pub fn is_internal_url(url: &str) -> bool {
    url.trim_start().to_ascii_lowercase().starts_with("about:")
}

fn scheme_regex() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").expect("scheme pattern is valid")
    })
}

/// Whether `input` already names a scheme (`https://`, `file://`, `about:`).
pub fn has_scheme(input: &str) -> bool {
    is_internal_url(input) || scheme_regex().is_match(input)
}

/// Turn address-bar text into a url using the default search engine.
pub fn normalize_url(input: &str) -> String {
    normalize_url_with(input, DEFAULT_SEARCH_URL)
}

/// Turn address-bar text into a url.
///
/// Text with a scheme passes through. Text containing whitespace or no dot
/// becomes a search query against `search_url`. Anything else is treated
/// as a bare host and gets `https://`.
pub fn normalize_url_with(input: &str, search_url: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return String::new();
    }

    let has_whitespace = input.chars().any(char::is_whitespace);
    if !has_whitespace && has_scheme(input) {
        return input.to_string();
    }

    if has_whitespace || !input.contains('.') {
        return format!("{}{}", search_url, urlencoding::encode(input));
    }

    format!("https://{}", input)
}

/// Host of `url`, lowercased, without credentials, port or a `www.` prefix.
pub fn extract_domain(url: &str) -> String {
    let rest = match url.find("://") {
        Some(pos) => &url[pos + 3..],
        None => url,
    };

    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let mut host = &rest[..host_end];

    if let Some(pos) = host.rfind('@') {
        host = &host[pos + 1..];
    }
    if host.starts_with('[') {
        // bracketed IPv6 literal; any port follows the `]`
        if let Some(end) = host.find(']') {
            host = &host[..=end];
        }
    } else if let Some(pos) = host.rfind(':') {
        host = &host[..pos];
    }

    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Favicon lookup url for `url`'s domain, or `None` for internal pages.
pub fn favicon_url(url: &str) -> Option<String> {
    if is_internal_url(url) {
        return None;
    }
    let domain = extract_domain(url);
    if domain.is_empty() {
        return None;
    }
    Some(format!("{}{}&sz=64", FAVICON_SERVICE, domain))
}

/// Placeholder title shown until the content layer reports the real one.
pub fn display_title(url: &str, search_url: &str) -> String {
    if url == START_PAGE_URL {
        return "Start Page".to_string();
    }
    if is_internal_url(url) {
        return url.to_string();
    }

    if let Some(query) = url.strip_prefix(search_url) {
        if let Ok(decoded) = urlencoding::decode(query) {
            return decoded.into_owned();
        }
    }

    let domain = extract_domain(url);
    if domain.is_empty() {
        url.to_string()
    } else {
        domain
    }
}
