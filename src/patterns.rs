//! Compiled regex patterns used by the analyzers.
//!
//! All patterns are compiled once on first use using `LazyLock`.
//! Patterns are organized by the report section that uses them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// URL Structure Patterns
// =============================================================================

/// Matches any ASCII upper-case letter in a path.
pub static PATH_UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("PATH_UPPERCASE regex"));

/// Matches any character outside the SEO-friendly path alphabet.
pub static PATH_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-/]").expect("PATH_SPECIAL_CHARS regex"));

// =============================================================================
// Hreflang Patterns
// =============================================================================

/// Matches `language` or `language-REGION` codes (`en`, `en-GB`).
pub static HREFLANG_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("HREFLANG_CODE regex"));

// =============================================================================
// Text Patterns
// =============================================================================

/// Sentence terminators; runs of them count as one break.
pub static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("SENTENCE_BREAK regex"));

/// Horizontal whitespace runs (newlines are kept as line breaks).
pub static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("INLINE_WHITESPACE regex"));

/// Alphabetic word tokens used for keyword counting.
pub static KEYWORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Alphabetic}+(?:['’]\p{Alphabetic}+)*").expect("KEYWORD_TOKEN regex"));

/// Inline styles that hide an element from rendering.
pub static DISPLAY_NONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("DISPLAY_NONE regex"));
