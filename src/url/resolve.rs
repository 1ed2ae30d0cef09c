use url::Url;

/// Resolves a relative link against a base URL
///
/// The base is parsed as an absolute URL and the link is joined onto it
/// following RFC 3986 reference resolution. If either side cannot be parsed
/// the relative input is returned unchanged; a malformed candidate then simply
/// fails validation or its availability probe later on.
///
/// # Arguments
///
/// * `base` - The URL of the page the link was found on
/// * `relative` - The raw link target, e.g. `/about/`
///
/// # Examples
///
/// ```
/// use breakpoint_crawler::url::resolve_relative;
///
/// assert_eq!(
///     resolve_relative("http://localhost/", "/test/"),
///     "http://localhost/test/"
/// );
/// ```
pub fn resolve_relative(base: &str, relative: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(relative)) {
        Ok(absolute) => absolute.to_string(),
        Err(e) => {
            tracing::trace!("Could not resolve {} against {}: {}", relative, base, e);
            relative.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_site_relative() {
        assert_eq!(
            resolve_relative("http://localhost/", "/test/"),
            "http://localhost/test/"
        );
    }

    #[test]
    fn test_resolve_replaces_base_path() {
        assert_eq!(
            resolve_relative("https://example.com/docs/intro.html", "/blog"),
            "https://example.com/blog"
        );
    }

    #[test]
    fn test_resolve_keeps_port() {
        assert_eq!(
            resolve_relative("http://127.0.0.1:8080/a/b", "/c"),
            "http://127.0.0.1:8080/c"
        );
    }

    #[test]
    fn test_resolve_with_query() {
        assert_eq!(
            resolve_relative("https://example.com/", "/search?q=rust"),
            "https://example.com/search?q=rust"
        );
    }

    #[test]
    fn test_malformed_base_returns_input() {
        assert_eq!(resolve_relative("not a url", "/page"), "/page");
    }

    #[test]
    fn test_empty_base_returns_input() {
        assert_eq!(resolve_relative("", "/page"), "/page");
    }
}
