//! Link inventory: internal/external partition and follow attributes.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Selection};
use crate::page::Page;
use crate::selector;
use crate::url_utils;
use crate::Options;

/// HTTP status of a link target.
///
/// Link targets are never fetched, so the status is always `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// Not determined.
    #[default]
    Unknown,
}

/// One retained anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Resolved absolute URL.
    pub url: String,
    /// Trimmed anchor text.
    pub text: String,
    /// `rel` contains `nofollow`.
    pub nofollow: bool,
    /// Redirects are not followed; always false.
    pub redirect: bool,
    /// Always `unknown`.
    pub status: LinkStatus,
    /// Locator for highlighting.
    pub selector: String,
}

/// Link section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    /// Links to the page's own host.
    pub internal: Vec<LinkEntry>,
    /// Links anywhere else (including host-less schemes like `mailto:`).
    pub external: Vec<LinkEntry>,
    /// Every anchor element, resolvable or not.
    pub total_count: usize,
    /// `internal.len()`.
    pub internal_count: usize,
    /// `external.len()`.
    pub external_count: usize,
    /// Anchors without `nofollow`.
    pub follow_count: usize,
    /// Anchors with `nofollow`.
    pub nofollow_count: usize,
}

/// Partition and count the anchors of a page.
///
/// Anchors whose `href` is missing or cannot be resolved into an absolute
/// URL are dropped from both partitions but still count towards
/// `total_count` and the follow/nofollow counts.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> LinkReport {
    let host = page.hostname();
    let mut report = LinkReport::default();

    for anchor in page.document().select("a").iter() {
        report.total_count += 1;

        let nofollow = dom::has_token(&anchor, "rel", "nofollow");
        if nofollow {
            report.nofollow_count += 1;
        } else {
            report.follow_count += 1;
        }

        let Some(url) = resolve_href(&anchor, page.base_url()) else {
            continue;
        };

        let entry = LinkEntry {
            url: url.to_string(),
            text: dom::trimmed_text(&anchor),
            nofollow,
            redirect: false,
            status: LinkStatus::Unknown,
            selector: selector::synthesize_with_limit(&anchor, options.selector_text_len),
        };

        if url_utils::same_host(&url, host) {
            report.internal.push(entry);
        } else {
            report.external.push(entry);
        }
    }

    report.internal_count = report.internal.len();
    report.external_count = report.external.len();

    log::debug!(
        "links: {} anchors, {} internal, {} external, {} dropped",
        report.total_count,
        report.internal_count,
        report.external_count,
        report.total_count - report.internal_count - report.external_count
    );

    report
}

fn resolve_href(anchor: &Selection, base: &Url) -> Option<Url> {
    dom::get_attribute(anchor, "href").and_then(|href| url_utils::resolve(&href, base))
}
