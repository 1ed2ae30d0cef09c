//! HTML parser for page summaries and raw links
//!
//! This module extracts the three things the crawler needs from a page:
//! - The page title (from the first `<title>` tag)
//! - The meta description (`<meta name="description" content="...">`)
//! - The raw `href` of every `<a>` element, unresolved

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Trimmed text of the first `<title>` element, empty if absent
    pub title: String,

    /// Content of the description meta tag, empty if absent
    pub description: String,

    /// Raw link targets in document order
    pub links: Vec<String>,
}

/// Parses HTML content into a [`Document`]
///
/// Parsing never fails: malformed markup is recovered by html5ever the same
/// way a browser would, and missing elements yield empty fields.
///
/// # Example
///
/// ```
/// use breakpoint_crawler::crawler::parse_document;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let document = parse_document(html);
/// assert_eq!(document.title, "Test");
/// assert_eq!(document.links, vec!["/page".to_string()]);
/// ```
pub fn parse_document(html: &str) -> Document {
    let document = Html::parse_document(html);

    Document {
        title: extract_title(&document),
        description: extract_description(&document),
        links: extract_hrefs(&document),
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_description(document: &Html) -> String {
    let Ok(meta_selector) = Selector::parse(r#"meta[name="description"]"#) else {
        return String::new();
    };

    document
        .select(&meta_selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
        .unwrap_or_default()
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
