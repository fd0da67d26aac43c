//! Composite SEO score.
//!
//! The score starts at 100 and loses points per detected problem. Each
//! category has a fixed weight and, where problems can repeat, a cap so a
//! single noisy category cannot swamp the rest. The result is clamped to
//! `0..=100` and mapped to a letter grade.

use serde::{Deserialize, Serialize};

use crate::analyzers;
use crate::report::PageReport;
use crate::verdict::Status;

/// Letter grade for a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above.
    A,
    /// 80 to 89.
    B,
    /// 70 to 79.
    C,
    /// 60 to 69.
    D,
    /// Below 60.
    #[default]
    F,
}

impl Grade {
    /// Grade for a clamped score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::A,
            80..=89 => Self::B,
            70..=79 => Self::C,
            60..=69 => Self::D,
            _ => Self::F,
        }
    }
}

/// Points deducted for one problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    /// Report section the problem belongs to.
    pub category: String,
    /// Points deducted.
    pub points: u8,
    /// Human-readable reason.
    pub reason: String,
}

/// Score section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    /// Overall score, `0..=100`.
    pub score: u8,
    /// Letter grade.
    pub grade: Grade,
    /// Deductions in evaluation order.
    pub penalties: Vec<Penalty>,
}

/// Minimum word count before thin content is penalized.
pub const THIN_CONTENT_WORDS: usize = 300;

/// Collects penalties in evaluation order.
#[derive(Default)]
struct Ledger {
    penalties: Vec<Penalty>,
}

impl Ledger {
    fn deduct(&mut self, category: &str, points: u8, reason: impl Into<String>) {
        if points > 0 {
            self.penalties.push(Penalty {
                category: category.to_string(),
                points,
                reason: reason.into(),
            });
        }
    }

    /// Deduct `per_issue` points per issue, capped at `cap`.
    fn deduct_capped(&mut self, category: &str, issues: usize, per_issue: u8, cap: u8, reason: &str) {
        #[allow(clippy::cast_possible_truncation)]
        let points = issues.saturating_mul(usize::from(per_issue)).min(usize::from(cap)) as u8;
        self.deduct(category, points, format!("{reason} ({issues})"));
    }
}

/// Score the finished sections of a report.
///
/// The report's own `seo_score` field is ignored. Deterministic: the same
/// report always yields the same score and penalties.
///
/// # Examples
///
/// ```
/// use page_seo_audit::{audit_html, scoring};
///
/// let report = audit_html("<html><body></body></html>", "https://example.com/")?;
/// let score = scoring::score(&report);
/// assert_eq!(score, report.seo_score);
/// assert!(score.score < 60);
/// # Ok::<(), page_seo_audit::Error>(())
/// ```
#[must_use]
pub fn score(report: &PageReport) -> SeoScore {
    let mut ledger = Ledger::default();

    score_general(report, &mut ledger);
    score_headings(report, &mut ledger);
    score_images(report, &mut ledger);
    score_schema(report, &mut ledger);
    score_hreflang(report, &mut ledger);
    score_content(report, &mut ledger);

    let deducted: u32 = ledger.penalties.iter().map(|p| u32::from(p.points)).sum();
    #[allow(clippy::cast_possible_truncation)]
    let score = 100u32.saturating_sub(deducted) as u8;

    SeoScore {
        score,
        grade: Grade::from_score(score),
        penalties: ledger.penalties,
    }
}

fn status_points(status: Status, error: u8, warning: u8) -> u8 {
    match status {
        Status::Success => 0,
        Status::Warning => warning,
        Status::Error => error,
    }
}

fn score_general(report: &PageReport, ledger: &mut Ledger) {
    let general = &report.general;

    ledger.deduct(
        "general",
        status_points(general.meta_title_status.status, 15, 5),
        general.meta_title_status.message.clone(),
    );
    ledger.deduct(
        "general",
        status_points(general.meta_description_status.status, 10, 5),
        general.meta_description_status.message.clone(),
    );
    if !general.has_canonical {
        ledger.deduct("general", 5, "No canonical URL");
    }
    if !general.indexable {
        ledger.deduct("general", 20, "Page is not indexable (noindex)");
    }
    for tag in &general.missing_important_meta_tags {
        ledger.deduct("general", 3, format!("Missing meta tag: {tag}"));
    }
    ledger.deduct_capped(
        "general",
        general.url_structure.issues.len(),
        2,
        10,
        "URL structure issues",
    );
}

fn score_headings(report: &PageReport, ledger: &mut Ledger) {
    let headings = &report.headings;

    match headings.h1_count {
        0 => ledger.deduct("headings", 10, "Missing H1 heading"),
        1 => {}
        _ => ledger.deduct("headings", 5, "Multiple H1 headings"),
    }

    let skips = analyzers::headings::skipped_levels(&headings.structure);
    ledger.deduct_capped("headings", skips, 2, 10, "Skipped heading levels");
}

fn score_images(report: &PageReport, ledger: &mut Ledger) {
    let images = &report.images;
    if images.total_count == 0 {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let points = ((100.0 - images.alt_ratio.value()) / 10.0).round().clamp(0.0, 10.0) as u8;
    ledger.deduct(
        "images",
        points,
        format!("{} images without alt text", images.without_alt_count),
    );
}

fn score_schema(report: &PageReport, ledger: &mut Ledger) {
    let schema = &report.schema;

    if !schema.has_schema {
        ledger.deduct("schema", 5, "No structured data");
    }
    ledger.deduct_capped("schema", schema.errors.len(), 2, 10, "Structured data errors");
}

fn score_hreflang(report: &PageReport, ledger: &mut Ledger) {
    let hreflang = &report.hreflang;
    if hreflang.has_tags {
        ledger.deduct_capped("hreflang", hreflang.issues.len(), 2, 6, "Hreflang issues");
    }
}

fn score_content(report: &PageReport, ledger: &mut Ledger) {
    if report.content_analysis.word_count < THIN_CONTENT_WORDS {
        ledger.deduct(
            "content",
            10,
            format!("Thin content ({} words)", report.content_analysis.word_count),
        );
    }
    if report.links.internal_count == 0 {
        ledger.deduct("links", 5, "No internal links");
    }
}
