//! P3 — Static Detectors.
//!
//! Six independent detectors over the classification arena. Every detector
//! honors the safe-pair set: a candidate whose page set is exactly a safe
//! pair is never reported.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use crate::core::config::PipelineConfig;
use crate::model::classification::Classification;
use crate::model::issue::{ConflictType, Issue, IssueDetails, Severity};
use crate::model::page::PageType;
use crate::phases::safe_pairs::{SafePairSet, pair_key};
use crate::url::geo::extract_title_template;
use crate::url::legacy::strip_legacy_suffix;
use crate::url::tokens::jaccard;

/// Run all static detectors in fixed order.
#[must_use]
pub fn run_static_detect(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
    config: &PipelineConfig,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(detect_taxonomy_clash(classifications, safe_pairs));
    issues.extend(detect_legacy_variants(classifications, safe_pairs));
    issues.extend(detect_near_duplicates(classifications, safe_pairs, config));
    issues.extend(detect_context_duplicates(classifications, safe_pairs));
    issues.extend(detect_location_boilerplate(
        classifications,
        safe_pairs,
        config,
    ));
    issues
}

/// Same slug living under diverging folder structures.
#[must_use]
pub fn detect_taxonomy_clash(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
) -> Vec<Issue> {
    let mut by_slug: BTreeMap<&str, Vec<&Classification>> = BTreeMap::new();
    for classification in classifications {
        if !classification.slug_last.is_empty() {
            by_slug
                .entry(classification.slug_last.as_str())
                .or_default()
                .push(classification);
        }
    }

    let mut issues = Vec::new();
    for (slug, group) in by_slug {
        if group.len() < 2 {
            continue;
        }
        let distinct_roots = group
            .iter()
            .map(|c| c.folder_root.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        if distinct_roots < 2 {
            continue;
        }
        if is_suppressed_group(&group, safe_pairs) {
            continue;
        }
        issues.push(Issue::new(
            ConflictType::TaxonomyClash,
            Severity::High,
            sorted_ids(&group),
            IssueDetails::TaxonomyClash {
                shared_slug: slug.to_string(),
            },
        ));
    }
    issues
}

/// Legacy pages: paired with their clean counterpart when one exists,
/// orphaned otherwise.
#[must_use]
pub fn detect_legacy_variants(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
) -> Vec<Issue> {
    let by_path: BTreeMap<&str, &Classification> = classifications
        .iter()
        .map(|c| (c.normalized_path.as_str(), c))
        .collect();

    let mut issues = Vec::new();
    for legacy in classifications.iter().filter(|c| c.is_legacy_variant) {
        let canonical_path = strip_legacy_suffix(&legacy.normalized_path);
        let clean = by_path
            .get(canonical_path.as_str())
            .filter(|clean| !clean.is_legacy_variant);

        if let Some(clean) = clean {
            if safe_pairs.contains(&pair_key(clean.page_id, legacy.page_id)) {
                continue;
            }
            issues.push(Issue::new(
                ConflictType::LegacyCleanup,
                Severity::High,
                vec![clean.page_id, legacy.page_id],
                IssueDetails::Legacy {
                    legacy_url: legacy.normalized_path.clone(),
                    canonical_path,
                },
            ));
        } else {
            issues.push(Issue::new(
                ConflictType::LegacyOrphan,
                Severity::Medium,
                vec![legacy.page_id],
                IssueDetails::Legacy {
                    legacy_url: legacy.normalized_path.clone(),
                    canonical_path,
                },
            ));
        }
    }
    issues
}

/// Pairs whose slug token sets are nearly identical.
#[must_use]
pub fn detect_near_duplicates(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
    config: &PipelineConfig,
) -> Vec<Issue> {
    let threshold = config.similarity.near_duplicate_threshold;
    let mut issues = Vec::new();
    for (i, page_a) in classifications.iter().enumerate() {
        if page_a.slug_tokens.is_empty() {
            continue;
        }
        for page_b in &classifications[i + 1..] {
            if page_b.slug_tokens.is_empty() {
                continue;
            }
            // Jaccard >= t forces min(|A|,|B|) / max(|A|,|B|) >= t; skip
            // pairs whose set sizes already rule the threshold out.
            let (small, large) = ordered_sizes(page_a, page_b);
            if (small as f64) < threshold * large as f64 {
                continue;
            }
            if safe_pairs.contains(&pair_key(page_a.page_id, page_b.page_id)) {
                continue;
            }
            let similarity = jaccard(&page_a.slug_tokens, &page_b.slug_tokens);
            if similarity >= threshold {
                issues.push(Issue::new(
                    ConflictType::NearDuplicateContent,
                    Severity::Medium,
                    vec![
                        page_a.page_id.min(page_b.page_id),
                        page_a.page_id.max(page_b.page_id),
                    ],
                    IssueDetails::NearDuplicate { similarity },
                ));
            }
        }
    }
    issues
}

/// The same service published under two different parent sections.
#[must_use]
pub fn detect_context_duplicates(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
) -> Vec<Issue> {
    let mut by_keyword: BTreeMap<&str, Vec<&Classification>> = BTreeMap::new();
    for classification in classifications {
        if classification.classified_type == PageType::ServiceSpoke
            && !classification.service_keyword.is_empty()
        {
            by_keyword
                .entry(classification.service_keyword.as_str())
                .or_default()
                .push(classification);
        }
    }

    let mut issues = Vec::new();
    for (keyword, group) in by_keyword {
        let distinct_parents = group
            .iter()
            .map(|c| c.parent_path.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        if distinct_parents < 2 {
            continue;
        }
        if is_suppressed_group(&group, safe_pairs) {
            continue;
        }
        issues.push(Issue::new(
            ConflictType::ContextDuplicate,
            Severity::Medium,
            sorted_ids(&group),
            IssueDetails::ContextDuplicate {
                service_keyword: keyword.to_string(),
            },
        ));
    }
    issues
}

/// Location pages whose titles collapse to one template once the city is
/// removed.
#[must_use]
pub fn detect_location_boilerplate(
    classifications: &[Classification],
    safe_pairs: &SafePairSet,
    config: &PipelineConfig,
) -> Vec<Issue> {
    let mut by_template: BTreeMap<String, Vec<&Classification>> = BTreeMap::new();
    for classification in classifications {
        if classification.classified_type != PageType::Location || classification.title.is_empty() {
            continue;
        }
        let template = extract_title_template(&classification.title, &classification.geo_node);
        if template.is_empty() {
            continue;
        }
        by_template.entry(template).or_default().push(classification);
    }

    let mut issues = Vec::new();
    for (template, group) in by_template {
        if group.len() < config.similarity.boilerplate_min_group {
            continue;
        }
        if is_suppressed_group(&group, safe_pairs) {
            continue;
        }
        issues.push(Issue::new(
            ConflictType::LocationBoilerplate,
            Severity::Medium,
            sorted_ids(&group),
            IssueDetails::LocationBoilerplate {
                title_template: template,
            },
        ));
    }
    issues
}

/// A group is suppressed only when its page set is exactly a safe pair.
fn is_suppressed_group(group: &[&Classification], safe_pairs: &SafePairSet) -> bool {
    group.len() == 2 && safe_pairs.contains(&pair_key(group[0].page_id, group[1].page_id))
}

fn sorted_ids(group: &[&Classification]) -> Vec<u64> {
    let mut ids: Vec<u64> = group.iter().map(|c| c.page_id).collect();
    ids.sort_unstable();
    ids
}

fn ordered_sizes(page_a: &Classification, page_b: &Classification) -> (usize, usize) {
    let a = page_a.slug_tokens.len();
    let b = page_b.slug_tokens.len();
    if a <= b { (a, b) } else { (b, a) }
}
