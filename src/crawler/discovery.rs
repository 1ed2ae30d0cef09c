//! Link discovery for fetched pages

use crate::crawler::parser::Document;
use crate::url::{is_valid_absolute_url, resolve_relative};

/// Turns a page's raw links into absolute candidate URLs
///
/// # Link Rules
///
/// - Empty (or whitespace-only) `href` values are ignored
/// - Site-relative links (`/path`) are resolved against `source_url`
/// - Every candidate, resolved or not, must be a valid absolute HTTP(S) URL
/// - Anything else (`page.html`, `#top`, `mailto:`...) is ignored
///
/// Visited filtering is left to [`Frontier::stage_discovered`], which owns the
/// visited set.
///
/// [`Frontier::stage_discovered`]: crate::crawler::Frontier::stage_discovered
pub fn discover_links(document: &Document, source_url: &str) -> Vec<String> {
    document
        .links
        .iter()
        .filter_map(|href| candidate_url(href, source_url))
        .collect()
}

fn candidate_url(href: &str, source_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let candidate = if href.starts_with('/') {
        resolve_relative(source_url, href)
    } else {
        href.to_string()
    };

    is_valid_absolute_url(&candidate).then_some(candidate)
}
