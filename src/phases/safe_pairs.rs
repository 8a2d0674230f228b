//! P2 — Safe-Pair Filter.
//!
//! Flags page pairs that must never be reported as static conflicts:
//! product siblings under one category, hub→spoke parent-child links, and
//! geographic variants of the same service. Pairs are unordered and stored
//! with the smaller page id first.

use std::collections::BTreeSet;

use crate::core::config::PipelineConfig;
use crate::model::classification::Classification;
use crate::model::page::{PageId, PageType};
use crate::url::geo::normalize_geo;
use crate::url::legacy::strip_legacy_suffix;
use crate::url::normalize::{has_distinct_subtopic, is_direct_parent};
use crate::url::tokens::slug_similarity;

/// Unordered page-id pairs excluded from static conflict reporting.
pub type SafePairSet = BTreeSet<(PageId, PageId)>;

/// Normalize an unordered pair to its canonical `(low, high)` form.
#[must_use]
pub fn pair_key(a: PageId, b: PageId) -> (PageId, PageId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Build the safe-pair set over all classification pairs.
#[must_use]
pub fn run_safe_pairs(
    classifications: &[Classification],
    config: &PipelineConfig,
) -> SafePairSet {
    let mut safe_pairs = SafePairSet::new();
    for (i, page_a) in classifications.iter().enumerate() {
        for page_b in &classifications[i + 1..] {
            if is_safe_pair(page_a, page_b, config) {
                safe_pairs.insert(pair_key(page_a.page_id, page_b.page_id));
            }
        }
    }
    safe_pairs
}

/// True when the pair matches any of the three suppression rules.
#[must_use]
pub fn is_safe_pair(
    page_a: &Classification,
    page_b: &Classification,
    config: &PipelineConfig,
) -> bool {
    are_product_siblings(page_a, page_b, config)
        || are_parent_child(page_a, page_b)
        || are_geographic_variants(page_a, page_b)
}

/// Distinct products listed under the same category page.
fn are_product_siblings(
    page_a: &Classification,
    page_b: &Classification,
    config: &PipelineConfig,
) -> bool {
    if page_a.classified_type != PageType::Product || page_b.classified_type != PageType::Product {
        return false;
    }
    if page_a.parent_path != page_b.parent_path {
        return false;
    }
    if page_a.slug_last == page_b.slug_last {
        return false;
    }
    // One being a stale copy of the other is exactly what we must report.
    if (page_a.is_legacy_variant || page_b.is_legacy_variant)
        && is_legacy_pair(&page_a.normalized_path, &page_b.normalized_path)
    {
        return false;
    }
    slug_similarity(&page_a.normalized_path, &page_b.normalized_path)
        < config.similarity.near_duplicate_threshold
}

/// One page is the immediate parent of the other and the child names a
/// distinct subtopic.
fn are_parent_child(page_a: &Classification, page_b: &Classification) -> bool {
    (is_direct_parent(&page_a.normalized_path, &page_b.normalized_path)
        && has_distinct_subtopic(&page_b.normalized_path, &page_a.normalized_path))
        || (is_direct_parent(&page_b.normalized_path, &page_a.normalized_path)
            && has_distinct_subtopic(&page_a.normalized_path, &page_b.normalized_path))
}

/// Two location pages serving different cities.
fn are_geographic_variants(page_a: &Classification, page_b: &Classification) -> bool {
    if page_a.classified_type != PageType::Location
        || page_b.classified_type != PageType::Location
    {
        return false;
    }
    if page_a.geo_node.is_empty() || page_b.geo_node.is_empty() {
        return false;
    }
    normalize_geo(&page_a.geo_node) != normalize_geo(&page_b.geo_node)
}

/// True when the two paths collapse to the same legacy-stripped path.
fn is_legacy_pair(path_a: &str, path_b: &str) -> bool {
    path_a != path_b && strip_legacy_suffix(path_a) == strip_legacy_suffix(path_b)
}
