//! Best-effort CSS locators for report entries.
//!
//! Every entry in the report that the host UI may want to point at carries a
//! locator string built here. The host sends it back with a
//! `highlightElement` command and the highlight responder resolves it
//! against the live document. Locators are advisory: they are neither
//! guaranteed unique nor stable once the DOM changes.

use crate::dom::{self, NodeRef, Selection};
use crate::url_utils::last_path_segment;

/// Default number of anchor-text characters used in a text-match locator.
pub const DEFAULT_TEXT_LEN: usize = 15;

/// Synthesize a locator for the first node of a selection.
///
/// Returns an empty string for an empty selection.
#[must_use]
pub fn synthesize(sel: &Selection) -> String {
    synthesize_with_limit(sel, DEFAULT_TEXT_LEN)
}

/// Synthesize a locator, using at most `text_len` characters of anchor text.
#[must_use]
pub fn synthesize_with_limit(sel: &Selection, text_len: usize) -> String {
    sel.nodes()
        .first()
        .map(|node| synthesize_node(node, text_len))
        .unwrap_or_default()
}

/// Synthesize a locator for an element node.
///
/// Priority chain:
/// 1. `#id`
/// 2. `html` / `body`
/// 3. `img[alt="..."]`, else `img[src*="<file>"]`
/// 4. `a:contains("<text>")` for anchors with text
/// 5. `<parent locator> > tag:nth-child(n)`
///
/// Ancestors are walked iteratively, so nesting depth is bounded only by
/// memory.
#[must_use]
pub fn synthesize_node(node: &NodeRef, text_len: usize) -> String {
    let mut segments = Vec::new();
    let mut current = *node;

    loop {
        if let Some(anchor) = anchored_locator(&current, text_len) {
            segments.push(anchor);
            break;
        }

        let tag = dom::node_tag_name(&current).unwrap_or_default();
        match dom::parent_element(&current) {
            Some(parent) => {
                let index = dom::element_index(&parent, &current);
                segments.push(format!("{tag}:nth-child({index})"));
                current = parent;
            }
            None => {
                segments.push(tag);
                break;
            }
        }
    }

    segments.reverse();
    segments.join(" > ")
}

/// Rules 1 to 4: a locator that does not depend on the parent.
fn anchored_locator(node: &NodeRef, text_len: usize) -> Option<String> {
    let sel = Selection::from(*node);
    let tag = dom::node_tag_name(node).unwrap_or_default();

    if let Some(id) = dom::id(&sel).filter(|id| !id.is_empty()) {
        return Some(format!("#{id}"));
    }

    match tag.as_str() {
        "html" | "body" => Some(tag),
        "img" => {
            if let Some(alt) = dom::get_attribute(&sel, "alt").filter(|alt| !alt.is_empty()) {
                return Some(format!("img[alt=\"{}\"]", escape_attribute(&alt)));
            }
            dom::get_attribute(&sel, "src")
                .filter(|src| !src.is_empty())
                .map(|src| format!("img[src*=\"{}\"]", escape_attribute(last_path_segment(&src))))
        }
        "a" => {
            let text = dom::trimmed_text(&sel);
            if text.is_empty() {
                return None;
            }
            let prefix: String = text.chars().take(text_len).collect();
            Some(format!("a:contains(\"{}\")", escape_attribute(&prefix)))
        }
        _ => None,
    }
}

/// Escape a value for use inside a double-quoted CSS string.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}
