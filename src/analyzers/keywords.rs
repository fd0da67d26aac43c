//! Keyword frequencies over the visible text and their placement in the
//! title, meta description and H1.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::Page;
use crate::patterns::KEYWORD_TOKEN;
use crate::Options;

/// English function words never reported as keywords.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its",
    "itself", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our", "ours",
    "out", "over", "own", "same", "she", "should", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "too", "under",
    "until", "very", "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself",
];

/// One reported keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    /// Lower-cased keyword.
    pub keyword: String,
    /// Occurrences in the visible text.
    pub count: usize,
    /// `count` as a percentage of all words, two decimals.
    pub density: f64,
    /// Appears as a word of the document title.
    pub in_title: bool,
    /// Appears as a word of the meta description.
    pub in_description: bool,
    /// Appears as a word of any H1.
    #[serde(rename = "inH1")]
    pub in_h1: bool,
}

/// Keyword section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReport {
    /// Every word token in the visible text, stop words included.
    pub total_words: usize,
    /// Most frequent keywords, descending by count.
    pub top_keywords: Vec<KeywordEntry>,
}

/// Rank the keywords of a page.
///
/// Ties keep first-encounter order.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> KeywordReport {
    let doc = page.document();
    let text = dom::visible_text(doc);

    let mut total_words = 0;
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for token in tokens(&text) {
        total_words += 1;
        if is_keyword(&token, options) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let title = word_set(&dom::document_title(doc));
    let description = word_set(
        &dom::get_attribute(&doc.select(r#"meta[name="description"]"#), "content").unwrap_or_default(),
    );
    let h1 = word_set(
        &doc.select("h1")
            .iter()
            .map(|h| dom::text_content(&h).to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_keywords: Vec<KeywordEntry> = ranked
        .into_iter()
        .take(options.keyword_limit)
        .map(|(keyword, count)| KeywordEntry {
            density: density(count, total_words),
            in_title: title.contains(&keyword),
            in_description: description.contains(&keyword),
            in_h1: h1.contains(&keyword),
            keyword,
            count,
        })
        .collect();

    log::debug!(
        "keywords: {} words, top keyword {:?}",
        total_words,
        top_keywords.first().map(|k| k.keyword.as_str())
    );

    KeywordReport {
        total_words,
        top_keywords,
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    KEYWORD_TOKEN.find_iter(text).map(|m| m.as_str().to_lowercase())
}

fn is_keyword(token: &str, options: &Options) -> bool {
    token.chars().count() >= options.min_keyword_len && !STOP_WORDS.contains(&token)
}

fn word_set(text: &str) -> HashSet<String> {
    tokens(text).collect()
}

fn density(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(html: &str) -> KeywordReport {
        let page = Page::parse(html, "https://example.com/").unwrap_or_else(|e| panic!("{e}"));
        analyze(&page, &Options::default())
    }

    #[test]
    fn test_ranking_and_ties() {
        let r = report(
            "<body><p>Rust is fast. Rust is safe. Cargo builds rust code and cargo tests it.</p></body>",
        );

        let keywords: Vec<_> = r.top_keywords.iter().map(|k| (k.keyword.as_str(), k.count)).collect();
        assert_eq!(
            keywords,
            vec![
                ("rust", 3),
                ("cargo", 2),
                ("fast", 1),
                ("safe", 1),
                ("builds", 1),
                ("code", 1),
                ("tests", 1),
            ]
        );
        assert_eq!(r.total_words, 14);
    }

    #[test]
    fn test_stop_words_and_short_tokens_skipped() {
        let r = report("<body><p>The cat and the dog are at it</p></body>");
        let keywords: Vec<_> = r.top_keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["cat", "dog"]);
        assert_eq!(r.total_words, 8);
    }

    #[test]
    fn test_density_two_decimals() {
        assert_eq!(density(1, 3), 33.33);
        assert_eq!(density(2, 3), 66.67);
        assert_eq!(density(0, 0), 0.0);
    }

    #[test]
    fn test_placement_flags() {
        let r = report(
            r#"<html><head><title>Garden Tools</title>
               <meta name="description" content="Buy tools for your garden."></head>
               <body><h1>Tools</h1><p>tools tools garden shovel</p></body></html>"#,
        );

        let tools = &r.top_keywords[0];
        assert_eq!(tools.keyword, "tools");
        assert_eq!(tools.count, 3);
        assert!(tools.in_title && tools.in_description && tools.in_h1);

        let garden = &r.top_keywords[1];
        assert!(garden.in_title && garden.in_description && !garden.in_h1);

        let shovel = &r.top_keywords[2];
        assert!(!shovel.in_title && !shovel.in_description && !shovel.in_h1);
    }

    #[test]
    fn test_limit() {
        let words: Vec<String> = (0..30).map(|i| format!("word{}", "x".repeat(i))).collect();
        let html = format!("<body><p>{}</p></body>", words.join(" "));
        assert_eq!(report(&html).top_keywords.len(), 10);
    }
}
