//! Href classification and relative-path resolution.
//!
//! In-document anchors carry hrefs in three flavors: external resources
//! (left to default handling), absolute internal paths, and paths relative
//! to the directory of the current document location.

/// Returns true if the href points at an external resource that should be
/// left to default handling (`http`/`https` schemes, `mailto:`, `tel:`).
///
/// Externality keys on the scheme, not a prefix: a bare document name such
/// as `http-caching` is internal.
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
}

/// Resolves a clicked href against the current document location.
///
/// - hrefs starting with `/` are absolute internal paths, returned as-is;
/// - hrefs starting with `.` are resolved against the directory of
///   `location` (the location minus its last path segment);
/// - anything else is internal and forwarded unresolved.
///
/// External hrefs are not meaningful here; callers classify with
/// [`is_external`] first.
pub fn resolve_href(location: &str, href: &str) -> String {
    if href.starts_with('/') || !href.starts_with('.') {
        return href.to_string();
    }
    resolve_relative(location, href)
}

/// Resolves a `.`/`..`-prefixed reference against the directory containing
/// `location`.
fn resolve_relative(location: &str, href: &str) -> String {
    // Base: the document's directory, i.e. the location without its last
    // segment. "/docs/guide/intro" -> ["docs", "guide"].
    let mut segments: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();
    segments.pop();

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }

    let mut resolved = String::with_capacity(location.len() + href.len());
    for segment in &segments {
        resolved.push('/');
        resolved.push_str(segment);
    }
    if resolved.is_empty() {
        resolved.push('/');
    }
    resolved
}
