// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current-page matching for navigation links.
//!
//! Paths are compared after normalization: query and fragment dropped,
//! trailing slash removed, ASCII lowercased, and the site root mapped to
//! `/index.html`. A link is current when the page path ends with the link path,
//! so `/en/about.html` highlights a link to `about.html`.

use alloc::format;
use alloc::string::String;

const INDEX_PAGE: &str = "/index.html";

/// Normalize a URL path for comparison.
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return String::from(INDEX_PAGE);
    }
    trimmed.to_ascii_lowercase()
}

/// Resolve an `href` to a site-root-relative path.
///
/// Returns `None` for hrefs that never point at a page: empty ones and
/// in-page fragments. Absolute URLs keep only their path; relative paths are
/// resolved against the site root.
pub fn link_path(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let path = match href.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => href,
    };
    if path.starts_with('/') {
        return Some(String::from(path));
    }

    let mut relative = path;
    loop {
        if let Some(rest) = relative.strip_prefix("./") {
            relative = rest;
        } else if let Some(rest) = relative.strip_prefix("../") {
            relative = rest;
        } else {
            break;
        }
    }
    Some(format!("/{relative}"))
}

/// True if a navigation link with `href` points at the page at `current_path`.
pub fn is_current_page(current_path: &str, href: &str) -> bool {
    let Some(link) = link_path(href) else {
        return false;
    };
    normalize_path(current_path).ends_with(normalize_path(&link).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(normalize_path("/"), "/index.html");
        assert_eq!(normalize_path(""), "/index.html");
        assert_eq!(normalize_path("/About/"), "/about");
        assert_eq!(normalize_path("/team.html?x=1#top"), "/team.html");
    }

    #[test]
    fn fragments_and_empty_hrefs_never_match() {
        assert!(!is_current_page("/", "#contact"));
        assert!(!is_current_page("/", ""));
        assert_eq!(link_path("  "), None);
    }

    #[test]
    fn relative_and_absolute_links_resolve_to_paths() {
        assert_eq!(link_path("about.html").as_deref(), Some("/about.html"));
        assert_eq!(link_path("./about.html").as_deref(), Some("/about.html"));
        assert_eq!(link_path("../x/y.html").as_deref(), Some("/x/y.html"));
        assert_eq!(
            link_path("https://example.com/Services.html").as_deref(),
            Some("/Services.html")
        );
        assert_eq!(link_path("https://example.com").as_deref(), Some("/"));
    }

    #[test]
    fn matching_is_suffix_based_and_case_insensitive() {
        assert!(is_current_page("/index.html", "/"));
        assert!(is_current_page("/", "index.html"));
        assert!(is_current_page("/en/About.html", "about.html"));
        assert!(is_current_page("/services.html", "https://example.com/services.html"));
        assert!(!is_current_page("/services.html", "/about.html"));
    }
}
