//! The read-only page handle every analyzer receives.
//!
//! A `Page` bundles what a content script would read from ambient browser
//! globals: the parsed document, the current location, navigation and
//! resource timing, and whatever rendered image state the host can supply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Document};
use crate::encoding;
use crate::error::{Error, Result};
use crate::url_utils;

/// Navigation timing timestamps in epoch milliseconds.
///
/// Field names follow the browser's `PerformanceTiming` interface. A value of
/// `0` means the event has not happened yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    /// Start of navigation.
    pub navigation_start: f64,
    /// First byte of the response received.
    pub response_start: f64,
    /// `DOMContentLoaded` handlers finished.
    pub dom_content_loaded_event_end: f64,
    /// `load` handlers finished.
    pub load_event_end: f64,
}

/// One resource timing entry, in retrieval order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTiming {
    /// Resource URL.
    pub name: String,
    /// What initiated the fetch (`script`, `img`, `css`, ...).
    pub initiator_type: String,
    /// Fetch duration in milliseconds.
    pub duration: f64,
}

/// Rendered state of an image as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedImage {
    /// Rendered width in CSS pixels.
    pub width: u32,
    /// Rendered height in CSS pixels.
    pub height: u32,
    /// Whether the image finished loading.
    pub complete: bool,
}

/// A loaded page ready for auditing.
///
/// # Example
///
/// ```rust
/// use page_seo_audit::Page;
///
/// let page = Page::parse(
///     "<html lang=\"en\"><head><title>Home</title></head><body></body></html>",
///     "https://example.com/",
/// )?;
/// assert_eq!(page.hostname(), Some("example.com"));
/// assert_eq!(page.language().as_deref(), Some("en"));
/// # Ok::<(), page_seo_audit::Error>(())
/// ```
pub struct Page {
    document: Document,
    location: Url,
    base_url: Url,
    timing: Option<NavigationTiming>,
    resources: Vec<ResourceTiming>,
    images: HashMap<String, RenderedImage>,
}

impl Page {
    /// Parse an HTML string loaded from `location`.
    pub fn parse(html: &str, location: &str) -> Result<Self> {
        let location = parse_location(location)?;
        Ok(Self::from_document(dom::parse(html), location))
    }

    /// Parse raw HTML bytes, honouring any `<meta>` charset declaration.
    pub fn from_bytes(html: &[u8], location: &str) -> Result<Self> {
        let location = parse_location(location)?;
        Ok(Self::from_document(dom::parse(&encoding::decode_html(html)), location))
    }

    /// Wrap an already parsed document.
    #[must_use]
    pub fn from_document(document: Document, location: Url) -> Self {
        let base_url = url_utils::document_base_url(&document, &location);
        Self {
            document,
            location,
            base_url,
            timing: None,
            resources: Vec::new(),
            images: HashMap::new(),
        }
    }

    /// Attach navigation timing.
    #[must_use]
    pub fn with_navigation_timing(mut self, timing: NavigationTiming) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Attach resource timing entries in retrieval order.
    #[must_use]
    pub fn with_resources(mut self, resources: Vec<ResourceTiming>) -> Self {
        self.resources = resources;
        self
    }

    /// Attach the rendered state of the image whose `src` resolves to `src`.
    #[must_use]
    pub fn with_image_state(mut self, src: &str, state: RenderedImage) -> Self {
        let key = url_utils::resolve_or_raw(src, &self.base_url);
        self.images.insert(key, state);
        self
    }

    /// The parsed document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The current location.
    #[must_use]
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Base URL used to resolve relative references.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Hostname of the current location.
    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.location.host_str()
    }

    /// Declared document language (`<html lang>`), if any.
    #[must_use]
    pub fn language(&self) -> Option<String> {
        self.document
            .select("html")
            .nodes()
            .first()
            .and_then(|html| html.attr("lang"))
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
    }

    /// Navigation timing, when the host supplied it.
    #[must_use]
    pub fn navigation_timing(&self) -> Option<&NavigationTiming> {
        self.timing.as_ref()
    }

    /// Resource timing entries in retrieval order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceTiming] {
        &self.resources
    }

    /// Host-supplied rendered state for a resolved image URL.
    #[must_use]
    pub fn image_state(&self, resolved_src: &str) -> Option<&RenderedImage> {
        self.images.get(resolved_src)
    }
}

fn parse_location(location: &str) -> Result<Url> {
    Url::parse(location.trim()).map_err(|e| Error::InvalidLocation {
        location: location.to_string(),
        reason: e.to_string(),
    })
}
