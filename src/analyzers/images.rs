//! Image audit: alt text coverage, dimensions and loading behaviour.

use serde::{Deserialize, Serialize};

use crate::dom::{self, Selection};
use crate::page::{Page, RenderedImage};
use crate::percentage::Percentage;
use crate::selector;
use crate::url_utils;
use crate::Options;

/// Whether an image finished loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Fully loaded.
    #[default]
    Loaded,
    /// Still loading or deferred.
    Loading,
}

/// One image element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    /// Resolved image URL.
    pub src: String,
    /// Alt text; only set for images in the with-alt partition.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alt: Option<String>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Load completion state.
    pub load_state: LoadState,
    /// File sizes are never fetched; always `"unknown"`.
    pub file_size: String,
    /// Locator for highlighting.
    pub selector: String,
}

/// Image section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    /// Images with non-empty alt text.
    pub images_with_alt: Vec<ImageEntry>,
    /// Images with missing or blank alt text.
    pub images_without_alt: Vec<ImageEntry>,
    /// All image elements.
    pub total_count: usize,
    /// `images_with_alt.len()`.
    pub with_alt_count: usize,
    /// `images_without_alt.len()`.
    pub without_alt_count: usize,
    /// Percentage of images with alt text, one decimal; unmeasured with no images.
    pub alt_ratio: Percentage,
    /// Images wider or taller than `large_image_px`.
    pub large_images: usize,
    /// Images narrower or shorter than `small_image_px`.
    pub small_images: usize,
    /// Images with `loading="lazy"`.
    pub lazy_loaded: usize,
}

/// Audit the images of a page.
#[must_use]
pub fn analyze(page: &Page, options: &Options) -> ImageReport {
    let mut report = ImageReport::default();

    for img in page.document().select("img").iter() {
        let lazy = dom::get_attribute(&img, "loading").is_some_and(|l| l.eq_ignore_ascii_case("lazy"));
        let alt = dom::non_empty_attribute(&img, "alt");
        let entry = image_entry(page, &img, alt.is_some(), lazy, options);

        report.total_count += 1;
        if entry.width > options.large_image_px || entry.height > options.large_image_px {
            report.large_images += 1;
        }
        if entry.width < options.small_image_px || entry.height < options.small_image_px {
            report.small_images += 1;
        }
        if lazy {
            report.lazy_loaded += 1;
        }

        if alt.is_some() {
            report.images_with_alt.push(entry);
        } else {
            report.images_without_alt.push(entry);
        }
    }

    report.with_alt_count = report.images_with_alt.len();
    report.without_alt_count = report.images_without_alt.len();
    report.alt_ratio = Percentage::of(report.with_alt_count, report.total_count);

    log::debug!(
        "images: {} total, {} without alt, alt ratio {}%",
        report.total_count,
        report.without_alt_count,
        report.alt_ratio
    );

    report
}

fn image_entry(page: &Page, img: &Selection, keep_alt: bool, lazy: bool, options: &Options) -> ImageEntry {
    let src = dom::get_attribute(img, "src")
        .map(|src| url_utils::resolve_or_raw(&src, page.base_url()))
        .unwrap_or_default();

    let rendered = page.image_state(&src).copied().unwrap_or_else(|| RenderedImage {
        width: dimension(img, "width"),
        height: dimension(img, "height"),
        complete: !lazy,
    });

    ImageEntry {
        alt: if keep_alt { dom::get_attribute(img, "alt") } else { None },
        width: rendered.width,
        height: rendered.height,
        load_state: if rendered.complete { LoadState::Loaded } else { LoadState::Loading },
        file_size: "unknown".to_string(),
        selector: selector::synthesize_with_limit(img, options.selector_text_len),
        src,
    }
}

/// Parse the leading digits of a dimension attribute (`"300px"` → 300).
fn dimension(img: &Selection, name: &str) -> u32 {
    dom::get_attribute(img, name)
        .map(|value| {
            value
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}
