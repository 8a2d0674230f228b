//! P7 — Fix Synthesis.
//!
//! Attaches a human-readable recommendation to every cluster and, for
//! redirect actions, suggests the canonical page that should survive.

use std::collections::BTreeMap;

use crate::model::cluster::{Cluster, ClusterPage};
use crate::model::issue::ConflictType;
use crate::model::page::{PageId, PageType};

/// Fill recommendations and canonical suggestions in place.
///
/// Recommendation sentences cite the pre-cap page total so an oversize
/// cluster reports its true extent, not the capped listing.
pub fn run_fix(clusters: &mut [Cluster]) {
    for cluster in clusters.iter_mut() {
        cluster.recommendation = recommendation(cluster.conflict_type, cluster.total_page_count);
        if cluster.action_code.wants_canonical() {
            cluster.suggested_canonical_url =
                suggest_canonical(cluster).map(|page| page.url.clone());
        }
    }
}

/// One-sentence remediation text per conflict family.
#[must_use]
pub fn recommendation(conflict: ConflictType, page_count: usize) -> String {
    match conflict {
        ConflictType::TaxonomyClash => format!(
            "Choose ONE canonical folder structure for these {page_count} pages. Redirect duplicates via 301."
        ),
        ConflictType::LegacyCleanup => {
            format!("Redirect {page_count} legacy pages to their clean versions via 301.")
        }
        ConflictType::LegacyOrphan => format!(
            "Review {page_count} orphaned legacy pages. Either redirect to a current page or update the URL."
        ),
        ConflictType::NearDuplicateContent => format!(
            "Consolidate {page_count} near-duplicate pages. Choose canonical, redirect others."
        ),
        ConflictType::ContextDuplicate => format!(
            "Either merge {page_count} duplicate service pages or differentiate with unique content (70%+ different)."
        ),
        ConflictType::LocationBoilerplate => format!(
            "Rewrite {page_count} location pages with unique local evidence: venue names, local reviews, neighborhood photos."
        ),
        ConflictType::GscConfirmed => format!(
            "Google sees {page_count} pages competing for the same query. Consolidate or canonicalize."
        ),
        ConflictType::IntentMismatch => {
            "De-optimize blog for this commercial keyword. Strengthen the correct page.".to_string()
        }
        ConflictType::GeographicMismatch => {
            "Add unique local evidence to the correct location page. Prune city mentions from wrong page."
                .to_string()
        }
        ConflictType::PageTypeMismatch => {
            "Strengthen the category page. De-optimize product page for generic keywords."
                .to_string()
        }
        ConflictType::HomepageHoarding => {
            "Remove service content from homepage. Add clear link from homepage to service page."
                .to_string()
        }
    }
}

/// Pick the page the cluster should redirect to.
///
/// Rules apply in order, each as a tie-break for the previous one: page
/// type authority, aggregated impressions, shallowest path, smallest URL.
#[must_use]
pub fn suggest_canonical(cluster: &Cluster) -> Option<&ClusterPage> {
    let impressions = impressions_by_page(cluster);
    cluster.pages.iter().min_by(|a, b| {
        authority_rank(a.classified_type)
            .cmp(&authority_rank(b.classified_type))
            .then_with(|| {
                let imp_a = impressions.get(&a.page_id).copied().unwrap_or(0);
                let imp_b = impressions.get(&b.page_id).copied().unwrap_or(0);
                imp_b.cmp(&imp_a)
            })
            .then_with(|| page_depth(a).cmp(&page_depth(b)))
            .then_with(|| a.url.cmp(&b.url))
    })
}

/// Authority ordering for canonical selection; lower ranks win.
///
/// Categories beat products, hubs beat spokes, and structural pages beat
/// editorial ones.
fn authority_rank(page_type: PageType) -> u8 {
    match page_type {
        PageType::CategoryWoo | PageType::CategoryShop | PageType::CategoryCustom => 0,
        PageType::ShopRoot | PageType::ProductIndex => 1,
        PageType::ServiceHub => 2,
        PageType::ServiceSpoke | PageType::Location => 3,
        PageType::Product => 4,
        PageType::Blog | PageType::Portfolio => 5,
        PageType::Homepage => 6,
        PageType::Utility | PageType::Uncategorized => 7,
    }
}

fn impressions_by_page(cluster: &Cluster) -> BTreeMap<PageId, u64> {
    let mut totals = BTreeMap::new();
    if let Some(gsc) = &cluster.gsc_data {
        for row in &gsc.rows {
            *totals.entry(row.page_id).or_insert(0) += row.impressions;
        }
    }
    totals
}

fn page_depth(page: &ClusterPage) -> usize {
    page.normalized_path
        .split('/')
        .filter(|part| !part.is_empty())
        .count()
}
