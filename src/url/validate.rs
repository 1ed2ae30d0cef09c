use once_cell::sync::Lazy;
use regex::Regex;

/// `http://` or `https://` followed by one or more non-whitespace characters
static ABSOLUTE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https|http)://+\S+$").expect("URL regex is hardcoded and valid"));

/// Returns true if the string is a well-formed absolute HTTP(S) URL
///
/// This is a syntactic check only. It does not parse the host or port, so
/// `http://localhost:0000` is accepted while `not-a-url` is not.
///
/// # Examples
///
/// ```
/// use breakpoint_crawler::url::is_valid_absolute_url;
///
/// assert!(is_valid_absolute_url("https://example.com/page"));
/// assert!(!is_valid_absolute_url("/relative/path"));
/// ```
pub fn is_valid_absolute_url(candidate: &str) -> bool {
    ABSOLUTE_URL_PATTERN.is_match(candidate)
}
