//! HTML to text extraction
//!
//! Produces the "text mode" view of a page: the body's visible text with
//! boilerplate elements dropped and whitespace collapsed.

use scraper::{ElementRef, Html, Selector};

/// Elements whose entire subtree is dropped
const BOILERPLATE_TAGS: [&str; 7] =
    ["script", "style", "noscript", "nav", "footer", "header", "template"];

/// Extract the readable text of an HTML document
#[must_use]
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    collect_text(root, &mut parts);
    compact_ws(&parts.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, out: &mut Vec<&'a str>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push(text);
        } else if let Some(child) = ElementRef::wrap(child)
            && !BOILERPLATE_TAGS.contains(&child.value().name())
        {
            collect_text(child, out);
        }
    }
}

fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
