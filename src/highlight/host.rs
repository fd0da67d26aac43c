//! Host-side DOM operations the highlight responder needs, and an
//! implementation over a parsed [`Document`].

use serde::{Deserialize, Serialize};

use crate::dom::{self, Document, Selection};

/// Data attribute carrying the overlay generation.
pub const TOKEN_ATTRIBUTE: &str = "data-highlight-token";

/// A viewport-relative box in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Distance from the top of the viewport.
    pub top: f64,
    /// Distance from the left of the viewport.
    pub left: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

/// Scroll animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Immediate jump.
    Instant,
}

/// Vertical alignment of the scrolled-to element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    /// Element centered in the viewport.
    #[default]
    Center,
    /// Element aligned with the top edge.
    Start,
    /// Element aligned with the bottom edge.
    End,
    /// Minimal scroll to bring the element into view.
    Nearest,
}

/// Arguments of a scroll-into-view request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Animation.
    pub behavior: ScrollBehavior,
    /// Alignment.
    pub block: ScrollBlock,
}

/// The highlight box placed over an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Element id of the overlay.
    pub id: String,
    /// Generation that created the overlay.
    pub token: u64,
    /// Box to cover.
    pub rect: Rect,
}

impl Overlay {
    /// Inline style of the overlay: fixed over `rect`, translucent, above
    /// page content and transparent to pointer events.
    #[must_use]
    pub fn style(&self) -> String {
        let Rect { top, left, width, height } = self.rect;
        format!(
            "position: fixed; z-index: 10000; \
             top: {top}px; left: {left}px; width: {width}px; height: {height}px; \
             background-color: rgba(255, 107, 107, 0.3); outline: 3px solid #ff6b6b; \
             pointer-events: none; transition: all 0.3s ease;"
        )
    }

    /// Markup of the overlay element.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div id="{}" {TOKEN_ATTRIBUTE}="{}" style="{}"></div>"#,
            self.id,
            self.token,
            self.style()
        )
    }
}

/// The page operations the highlight responder performs.
pub trait PageHost {
    /// Viewport box of the first element matching `selector`; `None` when
    /// the selector is invalid or matches nothing.
    fn bounding_box(&self, selector: &str) -> Option<Rect>;

    /// Attach an overlay to the page. Returns whether it was inserted.
    fn insert_overlay(&mut self, overlay: &Overlay) -> bool;

    /// Remove the overlay with element id `id`.
    ///
    /// With a `token`, only an overlay of that generation is removed.
    /// Returns whether anything was removed; removing nothing is not an error.
    fn remove_overlay(&mut self, id: &str, token: Option<u64>) -> bool;

    /// Scroll the first element matching `selector` into view.
    fn scroll_into_view(&mut self, selector: &str, options: ScrollOptions);
}

/// Computes element boxes for a [`DocumentHost`].
pub trait Layout {
    /// Box of `element`, or `None` when it has none.
    fn bounding_box(&self, element: &Selection) -> Option<Rect>;
}

/// Layout read from `width` and `height` attributes, anchored at the
/// viewport origin.
///
/// Parsed documents carry no layout; this gives every matched element a
/// box so it can be highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeLayout;

impl Layout for AttributeLayout {
    fn bounding_box(&self, element: &Selection) -> Option<Rect> {
        let dimension = |name: &str| {
            dom::get_attribute(element, name)
                .and_then(|value| value.trim().trim_end_matches("px").parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        Some(Rect {
            top: 0.0,
            left: 0.0,
            width: dimension("width"),
            height: dimension("height"),
        })
    }
}

/// A [`PageHost`] over a parsed document.
///
/// Overlays are appended to `<body>`; scroll requests are recorded.
pub struct DocumentHost<L = AttributeLayout> {
    document: Document,
    layout: L,
    last_scroll: Option<(String, ScrollOptions)>,
}

impl DocumentHost<AttributeLayout> {
    /// Host over `document` with [`AttributeLayout`].
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self::with_layout(document, AttributeLayout)
    }
}

impl<L: Layout> DocumentHost<L> {
    /// Host over `document` with a custom layout.
    #[must_use]
    pub fn with_layout(document: Document, layout: L) -> Self {
        Self {
            document,
            layout,
            last_scroll: None,
        }
    }

    /// The hosted document, overlays included.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of elements with id `id`.
    #[must_use]
    pub fn overlay_count(&self, id: &str) -> usize {
        dom::count(&self.document, &format!("[id=\"{id}\"]"))
    }

    /// Generation of the current overlay with id `id`.
    #[must_use]
    pub fn overlay_token(&self, id: &str) -> Option<u64> {
        dom::try_query_selector(&self.document, &format!("[id=\"{id}\"]"))
            .and_then(|overlay| dom::get_attribute(&overlay, TOKEN_ATTRIBUTE))
            .and_then(|token| token.parse().ok())
    }

    /// Most recent scroll request.
    #[must_use]
    pub fn last_scroll(&self) -> Option<&(String, ScrollOptions)> {
        self.last_scroll.as_ref()
    }
}

impl<L: Layout> PageHost for DocumentHost<L> {
    fn bounding_box(&self, selector: &str) -> Option<Rect> {
        let element = dom::try_query_selector(&self.document, selector)?;
        self.layout.bounding_box(&element)
    }

    fn insert_overlay(&mut self, overlay: &Overlay) -> bool {
        let body = self.document.select("body");
        if !body.exists() {
            log::warn!("highlight: document has no body, overlay not inserted");
            return false;
        }
        dom::append_html(&body, &overlay.to_html());
        true
    }

    fn remove_overlay(&mut self, id: &str, token: Option<u64>) -> bool {
        let selector = match token {
            Some(token) => format!("[id=\"{id}\"][{TOKEN_ATTRIBUTE}=\"{token}\"]"),
            None => format!("[id=\"{id}\"]"),
        };
        let overlays = self.document.select(&selector);
        let removed = overlays.exists();
        if removed {
            dom::remove(&overlays);
        }
        removed
    }

    fn scroll_into_view(&mut self, selector: &str, options: ScrollOptions) {
        self.last_scroll = Some((selector.to_string(), options));
    }
}
