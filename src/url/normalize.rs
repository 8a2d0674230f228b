//! URL and path normalization used as the cross-source join key.

use url::Url;

/// Split a raw URL into lowercased `(host, path)`.
///
/// Accepts both absolute URLs and bare paths; query strings and fragments
/// are discarded either way.
fn host_and_path(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if let Ok(parsed) = Url::parse(trimmed)
        && parsed.has_host()
    {
        let host = parsed.host_str().unwrap_or_default().to_lowercase();
        return (host, parsed.path().to_lowercase());
    }
    // Bare path or schemeless input: strip fragment and query by hand.
    let without_fragment = trimmed.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    (String::new(), without_query.to_lowercase())
}

/// Normalize a complete URL for exact matching.
///
/// Removes protocol, `www.` prefix, query params, fragments, and the
/// trailing slash. Idempotent: normalizing an already-normalized value is a
/// no-op, which is what makes it safe as a join key.
///
/// `https://www.example.com/page/?utm=123#section` → `example.com/page`
#[must_use]
pub fn normalize_full_url(url: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }
    let (host, path) = host_and_path(url);
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let path = path.trim_end_matches('/');
    format!("{host}{path}")
}

/// Extract and normalize just the path portion of a URL.
///
/// Keeps the leading slash, trims the trailing slash except for the root.
///
/// `https://example.com/blog/post-title/?page=2` → `/blog/post-title`
#[must_use]
pub fn normalize_path(url: &str) -> String {
    if url.trim().is_empty() {
        return "/".to_string();
    }
    let (_, path) = host_and_path(url);
    let mut path = if path.len() > 1 {
        path.trim_end_matches('/').to_string()
    } else {
        path
    };
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    if path == "/" || path.is_empty() {
        return "/".to_string();
    }
    path
}

/// Ordered non-empty path segments.
#[must_use]
pub fn path_parts(url: &str) -> Vec<String> {
    normalize_path(url)
        .split('/')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Top-level folder of a URL path, or empty for the root.
#[must_use]
pub fn folder_root(url: &str) -> String {
    path_parts(url).into_iter().next().unwrap_or_default()
}

/// Parent path (everything except the last segment); the root stays `/`.
#[must_use]
pub fn parent_path(url: &str) -> String {
    let parts = path_parts(url);
    if parts.len() <= 1 {
        return "/".to_string();
    }
    format!("/{}", parts[..parts.len() - 1].join("/"))
}

/// Last slug segment, or empty for the root.
#[must_use]
pub fn slug_last(url: &str) -> String {
    path_parts(url).into_iter().next_back().unwrap_or_default()
}

/// True when `parent_url` sits exactly one level above `child_url`.
#[must_use]
pub fn is_direct_parent(parent_url: &str, child_url: &str) -> bool {
    let parent_parts = path_parts(parent_url);
    let child_parts = path_parts(child_url);
    child_parts.len() == parent_parts.len() + 1 && child_parts[..parent_parts.len()] == parent_parts
}

/// True when the child slug names a distinct subtopic rather than merely
/// appending a modifier to the parent slug.
///
/// `/services/` → `/services/corporate-events/` is distinct;
/// `/services/event-planning/` → `/services/event-planning-services/` is not.
#[must_use]
pub fn has_distinct_subtopic(child_url: &str, parent_url: &str) -> bool {
    let parent_slug = slug_last(parent_url);
    let child_slug = slug_last(child_url);
    if parent_slug.is_empty() || child_slug.is_empty() {
        return false;
    }
    let child_tokens: std::collections::BTreeSet<&str> = child_slug.split('-').collect();
    let mut parent_tokens = parent_slug.split('-');
    // Child slug covering every parent token is just a variant.
    !parent_tokens.all(|token| child_tokens.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_strips_protocol_www_query_fragment() {
        assert_eq!(
            normalize_full_url("https://www.example.com/page/?utm=123#section"),
            "example.com/page"
        );
        assert_eq!(
            normalize_full_url("http://example.com/page/"),
            "example.com/page"
        );
        assert_eq!(normalize_full_url("https://example.com/"), "example.com");
    }

    #[test]
    fn full_url_is_idempotent() {
        for raw in [
            "https://www.example.com/page/?utm=123",
            "http://example.com/",
            "/bare/path/",
            "example.com/page",
        ] {
            let once = normalize_full_url(raw);
            assert_eq!(normalize_full_url(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn path_normalization() {
        assert_eq!(
            normalize_path("https://example.com/blog/post-title/"),
            "/blog/post-title"
        );
        assert_eq!(normalize_path("https://example.com/"), "/");
        assert_eq!(normalize_path("https://example.com/page/?query=test"), "/page");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/Upper/Case/"), "/upper/case");
    }

    #[test]
    fn path_parts_extraction() {
        assert_eq!(
            path_parts("/product-category/dance/jazz/"),
            vec!["product-category", "dance", "jazz"]
        );
        assert!(path_parts("/").is_empty());
        assert_eq!(path_parts("/single/"), vec!["single"]);
    }

    #[test]
    fn folder_root_extraction() {
        assert_eq!(folder_root("/blog/2024/post-title/"), "blog");
        assert_eq!(folder_root("/product-category/dance/"), "product-category");
        assert_eq!(folder_root("/"), "");
    }

    #[test]
    fn parent_path_extraction() {
        assert_eq!(parent_path("/shop/clothing/shirts/"), "/shop/clothing");
        assert_eq!(parent_path("/shop/"), "/");
        assert_eq!(parent_path("/"), "/");
    }

    #[test]
    fn slug_last_extraction() {
        assert_eq!(slug_last("/product-category/dance/jazz/"), "jazz");
        assert_eq!(slug_last("/single-page/"), "single-page");
        assert_eq!(slug_last("/"), "");
    }

    #[test]
    fn direct_parent_detection() {
        assert!(is_direct_parent("/services/", "/services/event-planning/"));
        assert!(!is_direct_parent(
            "/services/",
            "/services/event-planning/weddings/"
        ));
        assert!(!is_direct_parent("/services/event-planning/", "/services/"));
    }

    #[test]
    fn distinct_subtopic_detection() {
        assert!(has_distinct_subtopic(
            "/services/corporate-events/",
            "/services/"
        ));
        assert!(!has_distinct_subtopic(
            "/services/event-planning-services/",
            "/services/event-planning/"
        ));
    }
}
