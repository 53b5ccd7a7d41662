//! HTML parser for extracting links and the page title
//!
//! Only anchor elements are considered. Each surviving link is resolved to an
//! absolute URL and counted, so a link repeated in the nav and the footer
//! shows up once with an occurrence count of two.

use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Absolute link URL -> number of anchors pointing at it
    pub links: HashMap<String, u32>,
}

/// Parses HTML content and extracts anchor links and the title
///
/// # Link Extraction Rules
///
/// **Include:**
/// - Every `<a href="...">`, including `download` and `rel="nofollow"` anchors
///
/// **Exclude:**
/// - Empty and fragment-only hrefs (`#section`)
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Non-HTTP(S) URLs after resolution
///
/// Fragments are stripped after resolution, so `/about#team` and `/about`
/// count as the same link.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Example
///
/// ```
/// use sumi_sieve::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links.get("https://example.com/page"), Some(&1));
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts and counts all valid anchor links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> HashMap<String, u32> {
    let mut links = HashMap::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                *links.entry(absolute_url).or_insert(0) += 1;
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // Skip special schemes
    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
