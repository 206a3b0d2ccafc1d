//! Title and body-text extraction from fetched HTML.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScraperError;
use crate::fetch::FetchedPage;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("valid h1 selector"));
static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").expect("valid h2 selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Elements whose text never renders.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    /// Visible text with every whitespace run collapsed to one space.
    pub body_text: String,
}

/// Derive a title and normalized body text from a fetched page.
///
/// The title is the first non-empty of `<title>`, the first `<h1>`, the first
/// `<h2>`, falling back to `"Update from {competitor_name}"`.
///
/// # Errors
///
/// Returns [`ScraperError::EmptyContent`] if the page has no visible text.
pub fn extract_page(
    page: &FetchedPage,
    competitor_name: &str,
) -> Result<ExtractedPage, ScraperError> {
    let document = Html::parse_document(&page.body);

    let body_text = visible_body_text(&document);
    if body_text.is_empty() {
        return Err(ScraperError::EmptyContent {
            url: page.url.clone(),
        });
    }

    let title = resolve_title(&document)
        .unwrap_or_else(|| format!("Update from {competitor_name}"));

    Ok(ExtractedPage { title, body_text })
}

fn resolve_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1, &*H2].into_iter().find_map(|selector| {
        document
            .select(selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .filter(|text| !text.is_empty())
    })
}

fn visible_body_text(document: &Html) -> String {
    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let parts: Vec<&str> = root
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some((node, &**text)),
            _ => None,
        })
        .filter(|(node, _)| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| HIDDEN_ELEMENTS.contains(&el.value().name()))
        })
        .map(|(_, text)| text)
        .collect();

    collapse_whitespace(&parts.join(" "))
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
