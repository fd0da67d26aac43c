//! Configuration options for page auditing.
//!
//! The `Options` struct holds every threshold the analyzers and the
//! highlight responder use. `Options::default()` reproduces the standard
//! audit rules.

use std::time::Duration;

/// Configuration options for page auditing.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use page_seo_audit::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     title_max_len: 70,
///     words_per_minute: 250,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Titles shorter than this (characters) are an error.
    ///
    /// Default: `10`
    pub title_min_len: usize,

    /// Titles longer than this (characters) are a warning.
    ///
    /// Default: `60`
    pub title_max_len: usize,

    /// Meta descriptions shorter than this (characters) are an error.
    ///
    /// Default: `50`
    pub description_min_len: usize,

    /// Meta descriptions longer than this (characters) are a warning.
    ///
    /// Default: `160`
    pub description_max_len: usize,

    /// Serialized query strings longer than this flag too many parameters.
    ///
    /// Default: `50`
    pub max_query_len: usize,

    /// Paths with more slashes than this are flagged as too deep.
    ///
    /// Default: `4`
    pub max_path_depth: usize,

    /// Word count above which content counts as long-form.
    ///
    /// Default: `700`
    pub long_form_words: usize,

    /// Reading speed used for the reading-time estimate.
    ///
    /// Default: `200`
    pub words_per_minute: usize,

    /// Images wider or taller than this (pixels) are counted as large.
    ///
    /// Default: `1000`
    pub large_image_px: u32,

    /// Images narrower or shorter than this (pixels) are counted as small.
    ///
    /// Default: `100`
    pub small_image_px: u32,

    /// Resources slower than this (milliseconds) are reported.
    ///
    /// Default: `300.0`
    pub slow_resource_ms: f64,

    /// Maximum number of slow resources reported.
    ///
    /// Default: `5`
    pub max_slow_resources: usize,

    /// Number of keywords kept in the keyword analysis.
    ///
    /// Default: `10`
    pub keyword_limit: usize,

    /// Minimum keyword length (characters).
    ///
    /// Default: `3`
    pub min_keyword_len: usize,

    /// Maximum number of anchor text characters used in a text-match selector.
    ///
    /// Default: `15`
    pub selector_text_len: usize,

    /// How long a highlight overlay stays before it is removed.
    ///
    /// Default: 3 seconds
    pub highlight_dwell: Duration,

    /// Element id of the highlight overlay.
    ///
    /// Default: `"seo-highlight-overlay"`
    pub overlay_id: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title_min_len: 10,
            title_max_len: 60,
            description_min_len: 50,
            description_max_len: 160,
            max_query_len: 50,
            max_path_depth: 4,
            long_form_words: 700,
            words_per_minute: 200,
            large_image_px: 1000,
            small_image_px: 100,
            slow_resource_ms: 300.0,
            max_slow_resources: 5,
            keyword_limit: 10,
            min_keyword_len: 3,
            selector_text_len: 15,
            highlight_dwell: Duration::from_secs(3),
            overlay_id: "seo-highlight-overlay".to_string(),
        }
    }
}
