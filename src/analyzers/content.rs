//! Textual content metrics over the rendered text of the page.

use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::Page;
use crate::percentage::Percentage;
use crate::patterns::SENTENCE_BREAK;
use crate::Options;

const VIDEO_SELECTOR: &str = r#"video, iframe[src*="youtube"], iframe[src*="vimeo"]"#;

/// Counts of non-text content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualContent {
    /// `img` elements.
    pub images: usize,
    /// `video` elements and YouTube/Vimeo embeds.
    pub videos: usize,
    /// `table` elements.
    pub tables: usize,
    /// `ul` and `ol` elements.
    pub lists: usize,
}

/// Content section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    /// Whitespace-separated words in the visible text.
    pub word_count: usize,
    /// Characters in the visible text.
    pub character_count: usize,
    /// Mean words per sentence, rounded.
    pub average_sentence_length: usize,
    /// Visible text size over serialized document size, percent, one decimal.
    pub text_html_ratio: Percentage,
    /// `p` elements.
    pub paragraph_count: usize,
    /// More than `long_form_words` words.
    pub is_long_form: bool,
    /// Estimated reading time in whole minutes, rounded up.
    pub reading_time: usize,
    /// Non-text content counts.
    pub visual_content: VisualContent,
}

/// Measure the textual content of a page.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> ContentReport {
    let doc = page.document();
    let text = dom::visible_text(doc);

    let word_count = text.split_whitespace().count();
    let character_count = text.chars().count();
    let html_len = doc.html().chars().count();

    let report = ContentReport {
        word_count,
        character_count,
        average_sentence_length: average_sentence_length(&text),
        text_html_ratio: Percentage::of(character_count, html_len),
        paragraph_count: dom::count(doc, "p"),
        is_long_form: word_count > options.long_form_words,
        reading_time: reading_time(word_count, options.words_per_minute),
        visual_content: VisualContent {
            images: dom::count(doc, "img"),
            videos: dom::count(doc, VIDEO_SELECTOR),
            tables: dom::count(doc, "table"),
            lists: dom::count(doc, "ul, ol"),
        },
    };

    log::debug!(
        "content: {} words, {} chars, ratio {}%, {} min read",
        report.word_count,
        report.character_count,
        report.text_html_ratio,
        report.reading_time
    );

    report
}

/// Reading time in minutes, rounded up to the next whole minute.
///
/// ```
/// use page_seo_audit::analyzers::content::reading_time;
///
/// assert_eq!(reading_time(400, 200), 2);
/// assert_eq!(reading_time(401, 200), 3);
/// ```
#[must_use]
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    words.div_ceil(words_per_minute)
}

/// Mean number of words per sentence, rounded to the nearest integer.
///
/// Sentences are split on runs of `.`, `!` and `?`; blank segments are
/// ignored. Returns 0 when there is no sentence.
#[must_use]
pub fn average_sentence_length(text: &str) -> usize {
    let (sentences, words) = SENTENCE_BREAK
        .split(text)
        .filter(|sentence| !sentence.trim().is_empty())
        .fold((0usize, 0usize), |(sentences, words), sentence| {
            (sentences + 1, words + sentence.split_whitespace().count())
        });

    if sentences == 0 {
        return 0;
    }
    (words as f64 / sentences as f64).round() as usize
}
