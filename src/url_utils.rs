//! URL Utility Functions
//!
//! URL resolution and inspection helpers shared by the analyzers: resolving
//! `href`/`src` attributes the way a browser exposes `element.href`, reading
//! the document base URL, and small string utilities for path segments.

use dom_query::Document;
use url::{form_urlencoded, Url};

/// Resolve a raw attribute value against a base URL.
///
/// DOM equivalent: reading `element.href` / `element.src`
///
/// An empty or blank value resolves to the base itself, fragment dropped.
/// Returns `None` for values that cannot be resolved into an absolute URL.
#[must_use]
pub fn resolve(raw: &str, base: &Url) -> Option<Url> {
    base.join(raw.trim()).ok()
}

/// Resolve a raw attribute value, falling back to the raw text.
///
/// Browsers expose the unresolved attribute when resolution fails; this
/// mirrors that for fields that must always carry a string.
#[must_use]
pub fn resolve_or_raw(raw: &str, base: &Url) -> String {
    resolve(raw, base).map_or_else(|| raw.trim().to_string(), |url| url.to_string())
}

/// Compute the document base URL.
///
/// The first `<base href>` resolved against the location wins; otherwise
/// the location itself is the base.
#[must_use]
pub fn document_base_url(doc: &Document, location: &Url) -> Url {
    doc.select("base[href]")
        .nodes()
        .first()
        .and_then(|node| node.attr("href"))
        .and_then(|href| resolve(&href, location))
        .unwrap_or_else(|| location.clone())
}

/// Check whether a resolved URL points at the given host.
///
/// URLs without a host (`mailto:`, `tel:`, `javascript:`) never match.
#[must_use]
pub fn same_host(url: &Url, host: Option<&str>) -> bool {
    match (url.host_str(), host) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Length of the query string after form-urlencoded re-serialization.
///
/// DOM equivalent: `new URL(href).searchParams.toString().length`
#[must_use]
pub fn serialized_query_len(url: &Url) -> usize {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(url.query_pairs())
        .finish()
        .len()
}

/// Last `/`-separated segment of a URL-like string, query included.
///
/// DOM equivalent: `value.split('/').pop()`
///
/// # Examples
/// ```
/// use page_seo_audit::url_utils::last_path_segment;
///
/// assert_eq!(last_path_segment("https://example.com/img/photo.jpg"), "photo.jpg");
/// assert_eq!(last_path_segment("https://cdn.example.com/app.js?v=2"), "app.js?v=2");
/// assert_eq!(last_path_segment("https://example.com/"), "");
/// ```
#[must_use]
pub fn last_path_segment(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
