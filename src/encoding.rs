//! Character encoding detection for raw page bytes.
//!
//! Hosts that hand over the document as bytes (a saved response body, a
//! snapshot from a devtools protocol) get the same charset sniffing a browser
//! applies to `<meta>` declarations before the page is parsed.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading bytes scanned for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("META_CHARSET regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("HTTP_EQUIV_CHARSET regex")
});

/// Detect the declared character encoding of an HTML document.
///
/// Checks `<meta charset>` first, then the `http-equiv` form, and falls
/// back to UTF-8 when neither names a known label.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*META_CHARSET, &*HTTP_EQUIV_CHARSET]
        .iter()
        .filter_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors.
///
/// # Examples
///
/// ```
/// use page_seo_audit::encoding::decode_html;
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body>Caf\xE9</body></html>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    log::debug!("decoding page bytes as {}", encoding.name());

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
