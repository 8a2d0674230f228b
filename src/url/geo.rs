//! Geographic slug handling and title-template extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::folders;
use crate::url::normalize::path_parts;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalize a geographic slug for comparison: lowercase, strip `-`, `_`,
/// and whitespace.
///
/// `new-york` → `newyork`; `san francisco` → `sanfrancisco`
#[must_use]
pub fn normalize_geo(slug: &str) -> String {
    slug.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .collect()
}

/// Extract the city slug from a location URL.
///
/// Pattern: `<location_folder>/<service?>/<city>` — the last segment is the
/// city whenever the folder root is in the location taxonomy.
#[must_use]
pub fn extract_geo_node(url: &str) -> Option<String> {
    let parts = path_parts(url);
    if parts.len() >= 2 && folders::is_location_folder(&parts[0]) {
        return parts.into_iter().next_back();
    }
    None
}

/// Extract the service keyword from a service or location URL.
///
/// Only service-nesting location roots qualify; under a bare `city`/`cities`
/// root the second segment is not a service.
///
/// `/service-area/event-planner/brooklyn/` → `event-planner`;
/// `/services/catering/` → `catering`
#[must_use]
pub fn extract_service_keyword(url: &str) -> Option<String> {
    let parts = path_parts(url);
    if parts.len() >= 3 && folders::is_service_location_folder(&parts[0]) {
        return Some(parts[1].clone());
    }
    if parts.len() >= 2 && folders::is_service_folder(&parts[0]) {
        return Some(parts[1].clone());
    }
    None
}

/// Reduce a page title to its boilerplate template by removing every
/// variant of the geographic node (hyphenated, spaced, underscored).
///
/// `"Event Planner in Brooklyn | CoCo Events"` with geo `brooklyn` →
/// `"event planner in | coco events"`
#[must_use]
pub fn extract_title_template(title: &str, geo_node: &str) -> String {
    if title.is_empty() {
        return String::new();
    }
    let mut template = title.to_lowercase();
    if !geo_node.is_empty() {
        let geo = geo_node.to_lowercase();
        for variant in [geo.clone(), geo.replace('-', " "), geo.replace('_', " ")] {
            template = template.replace(&variant, "");
        }
    }
    WHITESPACE.replace_all(&template, " ").trim().to_string()
}
