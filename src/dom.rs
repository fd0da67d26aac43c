//! DOM Operations Adapter
//!
//! Provides browser-DOM-style read operations on top of the `dom_query` crate.
//! Analyzers go through these helpers so that attribute, text and tree
//! access behave the same way everywhere in the report.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use crate::patterns::{DISPLAY_NONE, INLINE_WHITESPACE};

// === Attribute Operations ===

/// Get element ID attribute
///
/// DOM equivalent: `element.id`
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get any attribute value
///
/// DOM equivalent: `element.getAttribute("name")`
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a trimmed attribute value, treating empty values as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Check whether a space-separated token list attribute contains `token`.
///
/// DOM equivalent: `element.relList.contains(token)`
#[must_use]
pub fn has_token(sel: &Selection, name: &str, token: &str) -> bool {
    sel.attr(name).is_some_and(|value| {
        value
            .split_ascii_whitespace()
            .any(|t| t.eq_ignore_ascii_case(token))
    })
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
///
/// DOM equivalent: `element.localName`
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get tag name of a node (lowercase)
#[must_use]
pub fn node_tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// DOM equivalent: `node.textContent`
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get trimmed text content as an owned string.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Collapse all whitespace runs to single spaces and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Document title with whitespace collapsed.
///
/// DOM equivalent: `document.title`
#[must_use]
pub fn document_title(doc: &Document) -> String {
    doc.select("title")
        .nodes()
        .first()
        .map(|node| collapse_whitespace(&node.text()))
        .unwrap_or_default()
}

/// Elements whose content never renders.
const NON_RENDERED: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "iframe", "object", "svg",
];

/// Elements that start a new line of rendered text.
const LINE_BREAKING: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "td", "th", "tr", "ul",
];

/// Approximate rendered text of the document body.
///
/// DOM equivalent: `document.body.innerText`
///
/// Skips non-rendered elements, elements with the `hidden` attribute and
/// elements hidden by an inline `display: none`. Block-level elements
/// break lines; whitespace is collapsed within each line and blank lines
/// are dropped.
#[must_use]
pub fn visible_text(doc: &Document) -> String {
    let Some(body) = doc.select("body").nodes().first().copied() else {
        return String::new();
    };

    let mut raw = String::new();
    collect_visible_text(&body, &mut raw);

    INLINE_WHITESPACE
        .replace_all(&raw, " ")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

enum TextStep<'a> {
    Visit(NodeRef<'a>),
    Emit(char),
}

fn collect_visible_text(root: &NodeRef, out: &mut String) {
    let mut stack: Vec<TextStep> = root.children().into_iter().rev().map(TextStep::Visit).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            TextStep::Emit(c) => {
                out.push(c);
                continue;
            }
            TextStep::Visit(node) => node,
        };

        if node.is_text() {
            out.push_str(&node.text());
            continue;
        }
        if !node.is_element() {
            continue;
        }

        let tag = node_tag_name(&node).unwrap_or_default();
        if NON_RENDERED.contains(&tag.as_str()) || is_hidden(&node) {
            continue;
        }
        if LINE_BREAKING.contains(&tag.as_str()) {
            out.push('\n');
            stack.push(TextStep::Emit('\n'));
        } else if matches!(tag.as_str(), "img" | "input") {
            stack.push(TextStep::Emit(' '));
        }
        stack.extend(node.children().into_iter().rev().map(TextStep::Visit));
    }
}

fn is_hidden(node: &NodeRef) -> bool {
    node.has_attr("hidden")
        || node
            .attr("style")
            .is_some_and(|style| DISPLAY_NONE.is_match(&style))
}

// === Tree Navigation ===

/// Get the parent element of a node, if it has one.
///
/// DOM equivalent: `node.parentElement`
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Get direct element children
///
/// DOM equivalent: `element.children`
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// 1-based position of `node` among its parent's element children.
///
/// DOM equivalent: `Array.from(parent.children).indexOf(element) + 1`
#[must_use]
pub fn element_index(parent: &NodeRef, node: &NodeRef) -> usize {
    element_children(parent)
        .iter()
        .position(|child| child.id == node.id)
        .map_or(0, |i| i + 1)
}

// === Querying ===

/// Count elements matching a CSS selector.
#[inline]
#[must_use]
pub fn count(doc: &Document, selector: &str) -> usize {
    doc.select(selector).length()
}

/// Query a single element, returning `None` for unmatched or unparseable selectors.
///
/// DOM equivalent: `document.querySelector(selector)`
#[must_use]
pub fn try_query_selector<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.try_select(selector)
        .and_then(|sel| sel.nodes().first().copied())
        .map(Selection::from)
}

// === Tree Manipulation ===

/// Append HTML content
///
/// DOM equivalent: `element.insertAdjacentHTML("beforeend", html)`
#[inline]
pub fn append_html(sel: &Selection, html: &str) {
    sel.append_html(html);
}

/// Remove elements from tree
///
/// DOM equivalent: `element.remove()`
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(get_attribute(&div, "class"), Some("container".to_string()));
    }

    #[test]
    fn test_missing_attributes_return_none() {
        let doc = parse(r#"<div>no attributes</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), None);
        assert_eq!(get_attribute(&div, "data-test"), None);
    }

    #[test]
    fn test_non_empty_attribute() {
        let doc = parse(r#"<img alt="   "><img alt=" logo ">"#);
        let imgs: Vec<_> = doc.select("img").iter().collect();

        assert_eq!(non_empty_attribute(&imgs[0], "alt"), None);
        assert_eq!(non_empty_attribute(&imgs[1], "alt"), Some("logo".to_string()));
    }

    #[test]
    fn test_has_token() {
        let doc = parse(r#"<a rel="noopener NoFollow" href="/x">x</a><a rel="nofollowing">y</a>"#);
        let links: Vec<_> = doc.select("a").iter().collect();

        assert!(has_token(&links[0], "rel", "nofollow"));
        assert!(!has_token(&links[1], "rel", "nofollow"));
    }

    #[test]
    fn test_tag_name() {
        let doc = parse(r#"<article><section>content</section></article>"#);

        assert_eq!(tag_name(&doc.select("article")), Some("article".to_string()));
        assert_eq!(tag_name(&doc.select("section")), Some("section".to_string()));
        assert_eq!(tag_name(&doc.select("aside")), None);
    }

    #[test]
    fn test_document_title_collapses_whitespace() {
        let doc = parse("<html><head><title>  My \n  Page  </title></head></html>");
        assert_eq!(document_title(&doc), "My Page");

        let doc = parse("<html><body>untitled</body></html>");
        assert_eq!(document_title(&doc), "");
    }

    #[test]
    fn test_visible_text_skips_hidden_content() {
        let doc = parse(
            r#"<html><head><title>T</title></head><body>
                <p>First   paragraph.</p>
                <script>var x = 1;</script>
                <style>p { color: red; }</style>
                <div hidden>secret</div>
                <div style="display:none">also secret</div>
                <p>Second <b>bold</b> paragraph.</p>
            </body></html>"#,
        );

        assert_eq!(visible_text(&doc), "First paragraph.\nSecond bold paragraph.");
    }

    #[test]
    fn test_visible_text_breaks_blocks() {
        let doc = parse("<body><div>one</div><div>two</div><span>three</span></body>");
        assert_eq!(visible_text(&doc), "one\ntwo\nthree");
    }

    #[test]
    fn test_visible_text_deep_nesting() {
        let depth = 10_000;
        let html = format!(
            "<body>{}<span>deep</span> <img src=a.png>text{}<p>after</p></body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        assert_eq!(visible_text(&parse(&html)), "deep text\nafter");
    }

    #[test]
    fn test_element_index_skips_text_nodes() {
        let doc = parse(r#"<ul> <li>1</li> text <li id="second">2</li></ul>"#);
        let ul = doc.select("ul").nodes()[0];
        let li = doc.select("#second").nodes()[0];

        assert_eq!(element_children(&ul).len(), 2);
        assert_eq!(element_index(&ul, &li), 2);
    }

    #[test]
    fn test_try_query_selector() {
        let doc = parse(r#"<div><p class="a">1</p><p class="a">2</p></div>"#);

        let first = try_query_selector(&doc, "p.a");
        assert_eq!(first.map(|s| trimmed_text(&s)), Some("1".to_string()));
        assert!(try_query_selector(&doc, "p.missing").is_none());
        assert!(try_query_selector(&doc, "p[").is_none());
    }

    #[test]
    fn test_append_and_remove() {
        let doc = parse(r#"<html><body><p>text</p></body></html>"#);
        let body = doc.select("body");

        append_html(&body, r#"<div id="overlay"></div>"#);
        assert_eq!(count(&doc, "#overlay"), 1);

        remove(&doc.select("#overlay"));
        assert_eq!(count(&doc, "#overlay"), 0);
    }
}
