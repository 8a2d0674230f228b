//! Legacy-variant detection: obsolescence suffixes on the last URL segment.

use crate::url::normalize::{path_parts, slug_last};

/// Suffixes marking a page as an obsolete copy of another URL.
///
/// `-v2` is listed before `-2` so `page-v2` strips to `page` in one step.
const LEGACY_SUFFIXES: &[&str] = &[
    "-old",
    "-backup",
    "-copy",
    "-duplicate",
    "-final",
    "-temp",
    "-v2",
    "-v3",
    "-2",
    "-3",
];

/// True when the last slug segment carries a legacy suffix.
///
/// `/page-old/` → true; `/service-area/brooklyn/` → false.
#[must_use]
pub fn is_legacy_variant(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let slug = slug_last(url);
    LEGACY_SUFFIXES.iter().any(|suffix| slug.ends_with(suffix))
}

/// Remove legacy suffixes from a URL to find its canonical form.
///
/// Strips to a fixpoint so stacked suffixes collapse fully
/// (`/page-old-2/` → `/page`), which makes the function idempotent.
///
/// `/services/event-planning-old/` → `/services/event-planning`
#[must_use]
pub fn strip_legacy_suffix(url: &str) -> String {
    if url.is_empty() {
        return url.to_string();
    }
    let mut parts = path_parts(url);
    let Some(last) = parts.last_mut() else {
        return url.to_string();
    };

    loop {
        let Some(suffix) = LEGACY_SUFFIXES
            .iter()
            .find(|suffix| last.ends_with(*suffix))
        else {
            break;
        };
        let clean = last[..last.len() - suffix.len()]
            .trim_end_matches('-')
            .to_string();
        if clean.is_empty() {
            break;
        }
        *last = clean;
    }

    format!("/{}", parts.join("/"))
}
