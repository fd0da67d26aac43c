//! # page-seo-audit
//!
//! On-page SEO auditing of a loaded HTML document.
//!
//! Given a page's DOM and location, the library produces a structured
//! [`PageReport`] of SEO signals (metadata, heading outline, links, hreflang,
//! images, structured data, content metrics, keywords, timing) together
//! with a composite score. Every report element carries a CSS-like selector
//! that the [`highlight`] responder can use to point at it on the page.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_seo_audit::audit_html;
//!
//! let html = r#"<html lang="en"><head><title>Garden tools for every season</title></head>
//! <body><h1>Garden tools</h1><p>Spades, rakes and shears.</p></body></html>"#;
//!
//! let report = audit_html(html, "https://example.com/garden-tools")?;
//! assert_eq!(report.general.meta_title, "Garden tools for every season");
//! assert!(report.headings.has_h1);
//! println!("Score: {} ({:?})", report.seo_score.score, report.seo_score.grade);
//! # Ok::<(), page_seo_audit::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Metadata**: title and description length verdicts, canonical, robots,
//!   meta tag inventory, URL structure
//! - **Structure**: heading hierarchy, short-heading frequencies, links, hreflang
//! - **Media and data**: image alt coverage, JSON-LD validation
//! - **Content**: word counts, readability, keywords, reading time
//! - **Highlighting** (`highlight` feature): overlay responder driven by
//!   host messages
//!
//! Extraction never fails on page content: malformed data is reported
//! inside the relevant section.

use std::panic::{self, AssertUnwindSafe};

mod error;
mod options;
mod patterns;
mod percentage;
mod report;
mod verdict;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Report section analyzers.
pub mod analyzers;

/// The read-only page handle.
pub mod page;

/// CSS-like locators for report entries.
pub mod selector;

/// URL resolution and inspection.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Composite SEO score.
pub mod scoring;

/// Overlay highlighting of report entries.
#[cfg(feature = "highlight")]
pub mod highlight;

/// Host message decoding and dispatch.
#[cfg(feature = "highlight")]
pub mod messaging;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use page::{NavigationTiming, Page, RenderedImage, ResourceTiming};
pub use percentage::Percentage;
pub use report::PageReport;
pub use scoring::{Grade, Penalty, SeoScore};
pub use verdict::{Status, Verdict};

/// Audits a page using default options.
///
/// # Example
///
/// ```rust
/// use page_seo_audit::{audit, Page};
///
/// let page = Page::parse("<html><body><a href=\"/about\">About</a></body></html>", "https://example.com/")?;
/// let report = audit(&page);
/// assert_eq!(report.links.internal_count, 1);
/// # Ok::<(), page_seo_audit::Error>(())
/// ```
#[must_use]
pub fn audit(page: &Page) -> PageReport {
    audit_with_options(page, &Options::default())
}

/// Audits a page with custom options.
///
/// Each analyzer runs in isolation: if one panics, its section falls back
/// to the default value, the failure is listed in
/// [`PageReport::warnings`] and the remaining sections are unaffected.
///
/// # Example
///
/// ```rust
/// use page_seo_audit::{audit_with_options, Options, Page};
///
/// let page = Page::parse("<html><body><p>one two three four</p></body></html>", "https://example.com/")?;
/// let options = Options {
///     words_per_minute: 2,
///     ..Options::default()
/// };
/// let report = audit_with_options(&page, &options);
/// assert_eq!(report.content_analysis.reading_time, 2);
/// # Ok::<(), page_seo_audit::Error>(())
/// ```
#[must_use]
pub fn audit_with_options(page: &Page, options: &Options) -> PageReport {
    let mut warnings = Vec::new();

    let mut report = PageReport {
        general: isolated("general", &mut warnings, || analyzers::general::analyze(page, options)),
        headings: isolated("headings", &mut warnings, || analyzers::headings::analyze(page, options)),
        links: isolated("links", &mut warnings, || analyzers::links::analyze(page, options)),
        hreflang: isolated("hreflang", &mut warnings, || analyzers::hreflang::analyze(page, options)),
        images: isolated("images", &mut warnings, || analyzers::images::analyze(page, options)),
        schema: isolated("schema", &mut warnings, || analyzers::schema::analyze(page, options)),
        content_analysis: isolated("contentAnalysis", &mut warnings, || {
            analyzers::content::analyze(page, options)
        }),
        performance: isolated("performance", &mut warnings, || {
            analyzers::performance::analyze(page, options)
        }),
        keyword_analysis: isolated("keywordAnalysis", &mut warnings, || {
            analyzers::keywords::analyze(page, options)
        }),
        seo_score: SeoScore::default(),
        warnings: Vec::new(),
    };

    report.seo_score = isolated("seoScore", &mut warnings, || scoring::score(&report));
    report.warnings = warnings;

    log::debug!(
        "audit of {}: score {} ({:?}), {} warnings",
        page.location(),
        report.seo_score.score,
        report.seo_score.grade,
        report.warnings.len()
    );

    report
}

/// Parses `html` loaded from `location` and audits it with default options.
///
/// # Errors
///
/// Returns [`Error::InvalidLocation`] when `location` is not an absolute URL.
pub fn audit_html(html: &str, location: &str) -> Result<PageReport> {
    Ok(audit(&Page::parse(html, location)?))
}

/// Audits raw HTML bytes with automatic encoding detection.
///
/// The charset is read from `<meta charset>` or an `http-equiv`
/// Content-Type declaration; undecodable bytes become U+FFFD.
///
/// # Example
///
/// ```rust
/// use page_seo_audit::audit_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9 guide</title></head></html>";
/// let report = audit_bytes(html, "https://example.com/")?;
/// assert_eq!(report.general.meta_title, "Café guide");
/// # Ok::<(), page_seo_audit::Error>(())
/// ```
pub fn audit_bytes(html: &[u8], location: &str) -> Result<PageReport> {
    Ok(audit(&Page::from_bytes(html, location)?))
}

/// Run one analyzer, substituting its default section if it panics.
fn isolated<T: Default>(section: &str, warnings: &mut Vec<String>, analyze: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(analyze)) {
        Ok(value) => value,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!("analyzer '{section}' failed, using empty section: {reason}");
            warnings.push(format!("{section}: {reason}"));
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isolated_recovers_from_panic() {
        let mut warnings = Vec::new();
        let value: Vec<u8> = isolated("images", &mut warnings, || panic!("boom"));

        assert!(value.is_empty());
        assert_eq!(warnings, vec!["images: boom"]);
    }

    #[test]
    fn test_isolated_passes_through() {
        let mut warnings = Vec::new();
        let value = isolated("links", &mut warnings, || 7usize);

        assert_eq!(value, 7);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_audit_html_rejects_bad_location() {
        assert!(matches!(
            audit_html("<html></html>", "not a url"),
            Err(Error::InvalidLocation { .. })
        ));
    }
}
