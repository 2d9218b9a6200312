// src/fetch/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to resolve relative hrefs against the page
// URL, so the link filter sees absolute addresses where possible.
//
// Note: scraper's `Html` is not Send, so it never leaves this module. We
// parse, collect the hrefs into a Vec and drop the DOM straight away.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::Document;

/// A fetched HTML page, reduced to its anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    links: Vec<String>,
}

impl HtmlDocument {
    /// Parses `html` that was served from `page_url`.
    pub fn parse(html: &str, page_url: &str) -> Self {
        Self {
            links: extract_hrefs(html, page_url),
        }
    }
}

impl Document for HtmlDocument {
    fn links(&self) -> Vec<String> {
        self.links.clone()
    }
}

// Extracts the href of every <a> tag in the page
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: the hrefs in document order. Relative hrefs are made absolute
// when the page URL parses; anything that will not resolve is passed
// through untouched and left to the link filter. Fragment-only anchors
// ("#top") point back at the same page and are skipped.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   page_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_hrefs(html: &str, page_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant selector, so parsing it cannot fail
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let base = Url::parse(page_url).ok();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .map(|href| resolve_href(base.as_ref(), href))
        .collect()
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page/"
//   href = "/docs"              -> "https://example.com/docs"
//   href = "../other"           -> "https://example.com/other"
//   href = "https://other.com"  -> "https://other.com/"
//   href = "http://[broken"     -> "http://[broken" (unchanged)
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    if let Ok(url) = Url::parse(href) {
        return url.to_string();
    }

    match base.map(|base| base.join(href)) {
        Some(Ok(url)) => url.to_string(),
        _ => href.to_string(),
    }
}
