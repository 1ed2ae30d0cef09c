//! Output module for crawl results and reports
//!
//! This module handles:
//! - Serializing page summaries to JSON
//! - Recording and printing crawl statistics

pub mod stats;

pub use stats::{format_statistics, print_statistics, CrawlCounters, CrawlStatistics};

use crate::crawler::PageSummary;
use crate::Result;
use std::io::Write;

/// Serializes page summaries to a JSON array string
///
/// Each summary becomes an object with the keys `title`, `desc` and `url`,
/// in that order.
///
/// # Example
///
/// ```
/// use breakpoint_crawler::crawler::PageSummary;
/// use breakpoint_crawler::output::to_json;
///
/// let pages = vec![PageSummary::new("Index", "Index description", "http://localhost/")];
/// let json = to_json(&pages, false).unwrap();
/// assert_eq!(
///     json,
///     r#"[{"title":"Index","desc":"Index description","url":"http://localhost/"}]"#
/// );
/// ```
pub fn to_json(pages: &[PageSummary], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(pages)?
    } else {
        serde_json::to_string(pages)?
    };
    Ok(json)
}

/// Writes page summaries as JSON followed by a newline
pub fn write_json<W: Write>(writer: &mut W, pages: &[PageSummary], pretty: bool) -> Result<()> {
    let json = to_json(pages, pretty)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
