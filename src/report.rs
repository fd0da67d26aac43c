//! The aggregated page report.

use serde::{Deserialize, Serialize};

use crate::analyzers::{
    ContentReport, GeneralReport, HeadingReport, HreflangReport, ImageReport, KeywordReport,
    LinkReport, PerformanceReport, SchemaReport,
};
use crate::scoring::SeoScore;

/// Complete audit of one page.
///
/// Every section is always present. A page without a given feature yields
/// empty lists, zero counts or an explicit "unavailable" marker, so the
/// serialized shape never depends on page content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageReport {
    /// Title, description, canonical, robots, meta tags, URL structure.
    pub general: GeneralReport,
    /// Heading outline.
    pub headings: HeadingReport,
    /// Internal and external links.
    pub links: LinkReport,
    /// Alternate-language annotations.
    pub hreflang: HreflangReport,
    /// Image alt coverage and dimensions.
    pub images: ImageReport,
    /// JSON-LD structured data.
    pub schema: SchemaReport,
    /// Text metrics.
    pub content_analysis: ContentReport,
    /// Timing snapshot.
    pub performance: PerformanceReport,
    /// Keyword frequencies and placement.
    pub keyword_analysis: KeywordReport,
    /// Composite score.
    pub seo_score: SeoScore,
    /// Sections replaced by their default because the analyzer failed.
    pub warnings: Vec<String>,
}

impl PageReport {
    /// Serialize the report to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
