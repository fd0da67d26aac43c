//! Heading structure: the h1-h6 outline, hierarchy validation and
//! short-heading frequencies.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::Page;
use crate::selector;
use crate::Options;

/// One heading element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Upper-case tag name (`H1`..`H6`).
    pub tag: String,
    /// Trimmed text content.
    pub text: String,
    /// Length of `text` in characters.
    pub length: usize,
    /// Locator for highlighting.
    pub selector: String,
}

impl HeadingEntry {
    /// Heading level 1-6 parsed from the tag name.
    #[must_use]
    pub fn level(&self) -> u8 {
        heading_level(&self.tag)
    }
}

/// A phrase and how often it occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    /// The heading text, whitespace collapsed.
    pub text: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Frequency tables of short headings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRelevance {
    /// One-word headings.
    pub one_word: Vec<PhraseCount>,
    /// Two-word headings.
    pub two_words: Vec<PhraseCount>,
    /// Three-word headings.
    pub three_words: Vec<PhraseCount>,
    /// Four-word headings.
    pub four_words: Vec<PhraseCount>,
}

/// Heading section of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingReport {
    /// Every heading in document order.
    pub structure: Vec<HeadingEntry>,
    /// Exactly one H1 is present.
    #[serde(rename = "hasH1")]
    pub has_h1: bool,
    /// Number of H1 elements.
    #[serde(rename = "h1Count")]
    pub h1_count: usize,
    /// Outline problems, see [`find_hierarchy_issues`].
    pub hierarchy_issues: Vec<String>,
    /// Frequencies of one- to four-word headings.
    pub word_relevance: WordRelevance,
}

/// Analyze the heading outline of a page.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> HeadingReport {
    let structure: Vec<HeadingEntry> = page
        .document()
        .select("h1, h2, h3, h4, h5, h6")
        .iter()
        .map(|heading| {
            let text = dom::trimmed_text(&heading);
            HeadingEntry {
                tag: dom::tag_name(&heading).unwrap_or_default().to_ascii_uppercase(),
                length: text.chars().count(),
                text,
                selector: selector::synthesize_with_limit(&heading, options.selector_text_len),
            }
        })
        .collect();

    let h1_count = structure.iter().filter(|h| h.level() == 1).count();
    let hierarchy_issues = find_hierarchy_issues(&structure);
    let word_relevance = word_relevance(structure.iter().map(|h| h.text.as_str()));

    log::debug!(
        "headings: {} total, {} h1, {} hierarchy issues",
        structure.len(),
        h1_count,
        hierarchy_issues.len()
    );

    HeadingReport {
        has_h1: h1_count == 1,
        h1_count,
        hierarchy_issues,
        word_relevance,
        structure,
    }
}

/// Validate a heading outline.
///
/// Reports a missing or repeated H1 first, then every heading whose level
/// jumps more than one step deeper than the heading before it. The scan
/// starts at an implicit level 1, so an outline opening with an H3 is
/// reported as a skip from the document start. Going back up, or repeating
/// a level, is fine.
#[must_use]
pub fn find_hierarchy_issues(structure: &[HeadingEntry]) -> Vec<String> {
    let mut issues = Vec::new();

    match structure.iter().filter(|h| h.level() == 1).count() {
        0 => issues.push("Missing H1 heading on the page".to_string()),
        1 => {}
        _ => issues.push("Multiple H1 headings detected".to_string()),
    }

    for (previous, heading) in level_skips(structure) {
        issues.push(format!(
            "Skipped heading level: {} to {}",
            previous.map_or("document start", |p| p.tag.as_str()),
            heading.tag
        ));
    }

    issues
}

/// Number of headings that skip at least one level, counted the same way
/// [`find_hierarchy_issues`] reports them.
#[must_use]
pub fn skipped_levels(structure: &[HeadingEntry]) -> usize {
    level_skips(structure).count()
}

/// Pairs of (previous heading, skipping heading); the first heading is
/// compared against an implicit level 1.
fn level_skips(
    structure: &[HeadingEntry],
) -> impl Iterator<Item = (Option<&HeadingEntry>, &HeadingEntry)> + '_ {
    std::iter::once(None)
        .chain(structure.iter().map(Some))
        .zip(structure)
        .filter(|(previous, heading)| heading.level() > previous.map_or(1, HeadingEntry::level) + 1)
}

/// Bucket whole headings by their word count.
///
/// A heading of exactly N words (N in 1..=4) counts once in table N, with
/// its words joined by single spaces and case kept. Longer headings are
/// ignored. Each table is sorted by descending count; equal counts keep
/// first-encounter order.
#[must_use]
pub fn word_relevance<'a>(texts: impl IntoIterator<Item = &'a str>) -> WordRelevance {
    let mut tables: [IndexMap<String, usize>; 4] = Default::default();

    for text in texts {
        let words: Vec<&str> = text.split_whitespace().collect();
        if let Some(table) = words.len().checked_sub(1).and_then(|n| tables.get_mut(n)) {
            *table.entry(words.join(" ")).or_insert(0) += 1;
        }
    }

    let [one, two, three, four] = tables.map(frequency_table);
    WordRelevance {
        one_word: one,
        two_words: two,
        three_words: three,
        four_words: four,
    }
}

fn frequency_table(counts: IndexMap<String, usize>) -> Vec<PhraseCount> {
    let mut table: Vec<PhraseCount> = counts
        .into_iter()
        .map(|(text, count)| PhraseCount { text, count })
        .collect();
    // stable: ties stay in first-encounter order
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

fn heading_level(tag: &str) -> u8 {
    tag.get(1..)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}
