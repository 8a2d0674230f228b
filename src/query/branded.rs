//! Branded-query detection.
//!
//! Branded queries mention the business itself and are excluded from all
//! traffic-based detection: a site competing with itself for its own name is
//! expected, not cannibalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::stopwords;

static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[|\-–]\s+").expect("static regex"));

/// Minimum length for a brand candidate extracted from a homepage title.
const MIN_BRAND_LEN: usize = 4;

/// Detect whether a query mentions the site's brand.
///
/// Checks, in order: the explicit brand name, the leading token of the
/// homepage title (text before `|`, `-`, or `–`), and whole-word company
/// indicators (`inc`, `llc`, ...).
#[must_use]
pub fn is_branded_query(query: &str, brand_name: Option<&str>, homepage_title: Option<&str>) -> bool {
    if query.is_empty() {
        return false;
    }
    let query_lower = query.to_lowercase();

    if let Some(brand) = brand_name {
        let brand = brand.trim().to_lowercase();
        if !brand.is_empty() && query_lower.contains(&brand) {
            return true;
        }
    }

    if let Some(title) = homepage_title
        && let Some(candidate) = brand_from_title(title)
        && query_lower.contains(&candidate)
    {
        return true;
    }

    query_lower
        .split_whitespace()
        .any(stopwords::is_brand_indicator)
}

/// Leading token of a homepage title, lowercased, when long enough to be a
/// plausible brand name.
#[must_use]
pub fn brand_from_title(title: &str) -> Option<String> {
    let leading = TITLE_SEPARATOR.split(title).next()?.trim();
    if leading.len() >= MIN_BRAND_LEN {
        Some(leading.to_lowercase())
    } else {
        None
    }
}
