//! Link handling for sidebar entries.
//!
//! Chapter paths are stored relative to the book root. A page nested `n`
//! directories deep receives a root-path prefix such as `../../`, which is
//! prepended to every relative path before the path is resolved against the
//! document URL.

use url::Url;

/// Normalize a document URL into the form sidebar hrefs are compared against.
///
/// Fragment and query are dropped; a directory URL maps to its index page.
pub fn current_page(location_href: &str) -> String {
    let page = location_href.split('#').next().unwrap_or_default();
    let page = page.split('?').next().unwrap_or_default();

    let mut page = page.to_string();
    if page.ends_with('/') {
        page.push_str("index.html");
    }
    page
}

/// Whether `href` must be corrected by the root-path prefix.
///
/// Fragment-only refs and protocol-qualified (`scheme://`) or
/// protocol-relative (`//host`) URLs are left alone.
pub fn is_relative_href(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('#') && !is_protocol_qualified(href)
}

// Mirrors `^(?:[a-z+]+:)?//`.
fn is_protocol_qualified(href: &str) -> bool {
    let scheme_len = href
        .bytes()
        .take_while(|b| b.is_ascii_lowercase() || *b == b'+')
        .count();

    let rest = match href[scheme_len..].strip_prefix(':') {
        Some(rest) if scheme_len > 0 => rest,
        _ => href,
    };

    rest.starts_with("//")
}

/// Prepend `path_to_root` when `href` is relative.
pub fn rewrite_href(path_to_root: &str, href: &str) -> String {
    if is_relative_href(href) {
        format!("{path_to_root}{href}")
    } else {
        href.to_string()
    }
}

/// Resolve `href` against the document URL, the way an anchor's `href`
/// property reports it: dot segments collapsed, path percent-encoded.
pub fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

/// Parse the document URL into its serialized (percent-encoded) form.
pub fn parse_location(location_href: &str) -> Option<Url> {
    Url::parse(location_href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page_strips_query_and_fragment() {
        assert_eq!(
            current_page("https://book.example/ec/usb.html?x=1#pins"),
            "https://book.example/ec/usb.html"
        );
        // Fragment is cut first, so a `?` inside it never matters.
        assert_eq!(
            current_page("https://book.example/a.html#q?z"),
            "https://book.example/a.html"
        );
    }

    #[test]
    fn test_current_page_directory_maps_to_index() {
        assert_eq!(
            current_page("https://book.example/"),
            "https://book.example/index.html"
        );
        assert_eq!(
            current_page("https://book.example/ec/?q#f"),
            "https://book.example/ec/index.html"
        );
    }

    #[test]
    fn test_is_relative_href() {
        assert!(is_relative_href("overview.html"));
        assert!(is_relative_href("ec/battery.html"));
        assert!(is_relative_href("../up.html"));

        assert!(!is_relative_href(""));
        assert!(!is_relative_href("#section"));
        assert!(!is_relative_href("https://example.com/x.html"));
        assert!(!is_relative_href("git+ssh://host/repo"));
        assert!(!is_relative_href("//cdn.example.com/x.js"));
    }

    #[test]
    fn test_rewrite_href() {
        assert_eq!(rewrite_href("../", "ec/usb.html"), "../ec/usb.html");
        assert_eq!(rewrite_href("", "overview.html"), "overview.html");
        assert_eq!(rewrite_href("../", "#top"), "#top");
        assert_eq!(
            rewrite_href("../", "https://example.com/"),
            "https://example.com/"
        );
    }

    fn base(s: &str) -> Url {
        parse_location(s).expect("test base should parse")
    }

    #[test]
    fn test_resolve_relative_against_nested_page() {
        let base = base("https://book.example/ec/usb.html");
        let r = |href: &str| resolve(&base, href).unwrap();
        assert_eq!(r("../overview.html"), "https://book.example/overview.html");
        assert_eq!(r("../ec/wifi.html"), "https://book.example/ec/wifi.html");
        assert_eq!(r("wifi.html"), "https://book.example/ec/wifi.html");
        assert_eq!(r("./wifi.html#pins"), "https://book.example/ec/wifi.html#pins");
    }

    #[test]
    fn test_resolve_ignores_base_query_and_fragment() {
        let base = base("https://book.example/ec/usb.html?x=1#f");
        assert_eq!(
            resolve(&base, "wifi.html").unwrap(),
            "https://book.example/ec/wifi.html"
        );
    }

    #[test]
    fn test_resolve_absolute_forms() {
        let base = base("https://book.example/docs/ec/usb.html");
        let r = |href: &str| resolve(&base, href).unwrap();
        assert_eq!(r("/root.html"), "https://book.example/root.html");
        assert_eq!(r("//cdn.example/x"), "https://cdn.example/x");
        assert_eq!(r("http://other/y"), "http://other/y");
        assert_eq!(r("#top"), "https://book.example/docs/ec/usb.html#top");
    }

    #[test]
    fn test_resolve_parent_above_root_is_clamped() {
        let base = base("https://book.example/a.html");
        assert_eq!(
            resolve(&base, "../../b.html").unwrap(),
            "https://book.example/b.html"
        );
    }

    #[test]
    fn test_resolve_file_urls() {
        let base = base("file:///home/u/book/ec/usb.html");
        assert_eq!(
            resolve(&base, "../overview.html").unwrap(),
            "file:///home/u/book/overview.html"
        );
    }

    #[test]
    fn test_resolve_host_without_path() {
        let base = base("https://book.example");
        assert_eq!(
            resolve(&base, "overview.html").unwrap(),
            "https://book.example/overview.html"
        );
    }

    #[test]
    fn test_resolve_percent_encodes_like_the_browser() {
        let base = base("https://book.example/ec/usb.html");
        assert_eq!(
            resolve(&base, "my page.html").unwrap(),
            "https://book.example/ec/my%20page.html"
        );
        assert_eq!(
            resolve(&base, "../über.html").unwrap(),
            "https://book.example/%C3%BCber.html"
        );
        // Already-encoded paths are left as they are.
        assert_eq!(
            resolve(&base, "my%20page.html").unwrap(),
            "https://book.example/ec/my%20page.html"
        );
    }

    #[test]
    fn test_parse_location_normalizes_unencoded_input() {
        assert_eq!(
            parse_location("https://book.example/my page.html").unwrap().as_str(),
            "https://book.example/my%20page.html"
        );
        assert!(parse_location("").is_none());
    }
}
