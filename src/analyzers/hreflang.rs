//! Hreflang annotations and their consistency checks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::Page;
use crate::patterns::HREFLANG_CODE;
use crate::selector;
use crate::url_utils;
use crate::Options;

/// Sentinel code for the fallback variant.
pub const X_DEFAULT: &str = "x-default";

/// One alternate-language link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HreflangEntry {
    /// Raw `hreflang` value.
    pub language_code: String,
    /// Resolved `href`.
    pub href: String,
    /// Locator for highlighting.
    pub selector: String,
}

/// Hreflang section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HreflangReport {
    /// Annotations in document order.
    pub tags: Vec<HreflangEntry>,
    /// Validation issues, see [`validate`].
    pub issues: Vec<String>,
    /// At least one annotation exists.
    pub has_tags: bool,
    /// At least one issue was found.
    pub has_issues: bool,
}

/// Collect and validate the alternate-language links of a page.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> HreflangReport {
    let tags: Vec<HreflangEntry> = page
        .document()
        .select("link[hreflang]")
        .iter()
        .filter(|link| dom::has_token(link, "rel", "alternate"))
        .map(|link| HreflangEntry {
            language_code: dom::get_attribute(&link, "hreflang").unwrap_or_default(),
            href: dom::get_attribute(&link, "href")
                .map(|href| url_utils::resolve_or_raw(&href, page.base_url()))
                .unwrap_or_default(),
            selector: selector::synthesize_with_limit(&link, options.selector_text_len),
        })
        .collect();

    let issues = validate(&tags, page.language().as_deref());

    log::debug!("hreflang: {} tags, {} issues", tags.len(), issues.len());

    HreflangReport {
        has_tags: !tags.is_empty(),
        has_issues: !issues.is_empty(),
        tags,
        issues,
    }
}

/// Validate a set of hreflang annotations.
///
/// Issues, in order:
/// 1. per tag, in tag order: a repeated code, then a malformed code
///    (tags with an empty code are skipped);
/// 2. no `x-default`;
/// 3. more than one `x-default`;
/// 4. when `document_language` is set, no tag for its primary subtag.
#[must_use]
pub fn validate(tags: &[HreflangEntry], document_language: Option<&str>) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for code in tags.iter().map(|t| t.language_code.as_str()).filter(|c| !c.is_empty()) {
        if !seen.insert(code) {
            issues.push(format!("Duplicate language code: {code}"));
        }
        if code != X_DEFAULT && !HREFLANG_CODE.is_match(code) {
            issues.push(format!("Invalid language code format: {code}"));
        }
    }

    match tags.iter().filter(|t| t.language_code == X_DEFAULT).count() {
        0 => issues.push("Missing x-default tag".to_string()),
        1 => {}
        _ => issues.push("Multiple x-default tags".to_string()),
    }

    if let Some(primary) = document_language.map(primary_subtag).filter(|p| !p.is_empty()) {
        let self_referenced = tags
            .iter()
            .any(|t| primary_subtag(&t.language_code).eq_ignore_ascii_case(primary));
        if !self_referenced {
            issues.push(format!(
                "Missing self-referencing hreflang tag for the current language ({primary})"
            ));
        }
    }

    issues
}

fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code).trim()
}
