//! Text signals: title, meta description, first heading, word count

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never counts as visible content
const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Returns the trimmed text of the first `<title>`, or an empty string
pub fn extract_title(document: &Html) -> String {
    first_match(document, "title")
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed `content` of the first `<meta name="description">`
pub fn extract_meta_description(document: &Html) -> String {
    first_match(document, r#"meta[name="description"]"#)
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Returns the whitespace-collapsed text of the first `<h1>`
pub fn extract_h1(document: &Html) -> String {
    first_match(document, "h1")
        .map(|h1| collapse_whitespace(h1.text()))
        .unwrap_or_default()
}

/// Counts the whitespace-separated tokens of a page's visible text
///
/// Text inside `<head>` and inside `script`, `style`, `noscript` and
/// `template` elements is excluded.
pub fn word_count(document: &Html) -> usize {
    let mut count = 0;
    let mut stack = vec![document.root_element()];

    while let Some(element) = stack.pop() {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => count += text.split_whitespace().count(),
                Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        stack.push(child_element);
                    }
                }
                _ => {}
            }
        }
    }

    count
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
