//! General page metadata: title, description, canonical, robots, meta tags
//! and the shape of the current URL.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Selection};
use crate::page::Page;
use crate::patterns::{PATH_SPECIAL_CHARS, PATH_UPPERCASE};
use crate::url_utils;
use crate::verdict::{self, Verdict};
use crate::Options;

/// Meta tags every page is expected to declare.
pub const IMPORTANT_META_TAGS: &[&str] = &["viewport", "robots", "description"];

/// Metadata section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralReport {
    /// Document title.
    pub meta_title: String,
    /// Title length in characters.
    pub meta_title_length: usize,
    /// Title length verdict.
    pub meta_title_status: Verdict,
    /// Meta description content, empty when absent.
    pub meta_description: String,
    /// Description length in characters.
    pub meta_description_length: usize,
    /// Description length verdict.
    pub meta_description_status: Verdict,
    /// Resolved canonical URL, empty when absent.
    pub canonical_url: String,
    /// Whether a canonical link element exists.
    pub has_canonical: bool,
    /// False when a robots meta tag contains `noindex`.
    pub indexable: bool,
    /// Not determined without fetching robots.txt; always false.
    pub robots_txt_blocked: bool,
    /// Every meta tag rendered as `key: content`.
    pub meta_tags: Vec<String>,
    /// Checklist tags that are missing, in checklist order.
    pub missing_important_meta_tags: Vec<String>,
    /// Analysis of the current URL.
    pub url_structure: UrlStructure,
}

/// SEO-friendliness analysis of a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStructure {
    /// URL path.
    pub path: String,
    /// Path is `/` or empty.
    pub is_root: bool,
    /// URL carries a non-empty query string.
    pub has_parameters: bool,
    /// No issues and not the root path.
    #[serde(rename = "isSEOFriendly")]
    pub is_seo_friendly: bool,
    /// Detected problems, in rule order.
    pub issues: Vec<String>,
}

/// Analyze general page metadata.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> GeneralReport {
    let doc = page.document();

    let meta_title = dom::document_title(doc);
    let meta_title_length = meta_title.chars().count();

    let meta_description = meta_content(doc.select(r#"meta[name="description"]"#)).unwrap_or_default();
    let meta_description_length = meta_description.chars().count();

    let canonical = doc.select(r#"link[rel="canonical"]"#);
    let has_canonical = canonical.exists();
    let canonical_url = dom::get_attribute(&canonical, "href")
        .and_then(|href| url_utils::resolve(&href, page.base_url()))
        .map(|url| url.to_string())
        .unwrap_or_default();

    let indexable = !doc.select(r#"meta[name="robots"]"#).iter().any(|meta| {
        dom::get_attribute(&meta, "content")
            .is_some_and(|content| content.to_ascii_lowercase().contains("noindex"))
    });

    let meta_tags = doc.select("meta").iter().map(|meta| describe_meta(&meta)).collect();

    let missing_important_meta_tags = IMPORTANT_META_TAGS
        .iter()
        .filter(|name| !doc.select(&format!(r#"meta[name="{name}"]"#)).exists())
        .map(|name| (*name).to_string())
        .collect();

    let report = GeneralReport {
        meta_title_status: verdict::evaluate_title_length(meta_title_length, options),
        meta_title,
        meta_title_length,
        meta_description_status: verdict::evaluate_description_length(meta_description_length, options),
        meta_description,
        meta_description_length,
        canonical_url,
        has_canonical,
        indexable,
        robots_txt_blocked: false,
        meta_tags,
        missing_important_meta_tags,
        url_structure: analyze_url_structure(page.location(), options),
    };

    log::debug!(
        "general: title {} chars, description {} chars, {} meta tags",
        report.meta_title_length,
        report.meta_description_length,
        report.meta_tags.len()
    );

    report
}

/// Analyze the SEO-friendliness of a URL.
#[must_use]
pub fn analyze_url_structure(url: &Url, options: &Options) -> UrlStructure {
    let path = url.path().to_string();
    let mut issues = Vec::new();

    if url_utils::serialized_query_len(url) > options.max_query_len {
        issues.push("Too many parameters in the URL".to_string());
    }
    if PATH_UPPERCASE.is_match(&path) {
        issues.push("The URL contains uppercase letters".to_string());
    }
    if path.contains('_') {
        issues.push("The URL contains underscores instead of hyphens".to_string());
    }
    if path.matches('/').count() > options.max_path_depth {
        issues.push("The URL has too many levels of depth".to_string());
    }
    if PATH_SPECIAL_CHARS.is_match(&path) {
        issues.push("The URL contains special characters".to_string());
    }

    UrlStructure {
        is_root: path == "/" || path.is_empty(),
        has_parameters: url.query().is_some_and(|q| !q.is_empty()),
        is_seo_friendly: issues.is_empty() && path.len() > 1,
        issues,
        path,
    }
}

fn meta_content(sel: Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(|node| node.attr("content"))
        .map(|content| content.to_string())
}

/// Render a meta tag as `key: content`.
///
/// The key is the first of `name`, `property`, `http-equiv`; a bare
/// `<meta charset>` renders as `charset: <value>`.
fn describe_meta(meta: &Selection) -> String {
    let key = ["name", "property", "http-equiv"]
        .iter()
        .find_map(|attr| dom::get_attribute(meta, attr));

    match key {
        Some(key) => format!("{key}: {}", dom::get_attribute(meta, "content").unwrap_or_default()),
        None => match dom::get_attribute(meta, "charset") {
            Some(charset) => format!("charset: {charset}"),
            None => format!(": {}", dom::get_attribute(meta, "content").unwrap_or_default()),
        },
    }
}
