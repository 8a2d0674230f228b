//! P5 — Wrong-Winner Detection.
//!
//! Finds queries where the winning page is the wrong page type: a blog
//! outranking commercial pages on transactional intent, a product winning a
//! plural category query, the homepage hoarding a specific query, or the
//! wrong city's location page ranking. This is a strategy problem, not
//! cannibalization — there is no competition to collapse.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::PipelineConfig;
use crate::lexicon::stopwords;
use crate::model::classification::Classification;
use crate::model::issue::{ConflictType, GscRow, Issue, IssueDetails, Severity};
use crate::model::page::{PageId, PageType};
use crate::model::traffic::TrafficRow;
use crate::phases::traffic::group_rows_by_query;
use crate::query::intent::{QueryIntent, classify_query_intent, extract_query_city, is_plural_query};
use crate::url::geo::normalize_geo;

/// Run wrong-winner detection over all non-branded queries.
#[must_use]
pub fn run_wrong_winner(
    classifications: &[Classification],
    traffic_rows: &[TrafficRow],
    brand_name: Option<&str>,
    homepage_title: Option<&str>,
    config: &PipelineConfig,
) -> Vec<Issue> {
    let by_id: BTreeMap<PageId, &Classification> = classifications
        .iter()
        .map(|c| (c.page_id, c))
        .collect();
    let groups = group_rows_by_query(
        classifications,
        traffic_rows,
        brand_name,
        homepage_title,
        config,
    );

    let mut issues = Vec::new();
    for (query, rows) in groups {
        let Some(winner_row) = rows.first() else {
            continue;
        };
        let Some(winner) = by_id.get(&winner_row.page_id) else {
            continue;
        };
        if let Some(issue) = detect_wrong_winner(&query, winner, winner_row, classifications) {
            issues.push(issue);
        }
    }
    issues
}

/// Check the query's winner against each mismatch pattern; first match wins.
#[must_use]
pub fn detect_wrong_winner(
    query: &str,
    winner: &Classification,
    winner_row: &GscRow,
    classifications: &[Classification],
) -> Option<Issue> {
    let (intent, has_local) = classify_query_intent(query);
    let query_tokens = significant_query_tokens(query);

    // INTENT_MISMATCH: blog winning a transactional query while commercial
    // pages on the topic exist.
    if intent == QueryIntent::Transactional && winner.classified_type == PageType::Blog {
        let better: Vec<&Classification> = classifications
            .iter()
            .filter(|pc| pc.classified_type.is_commercial() && has_query_overlap(&query_tokens, pc))
            .collect();
        if !better.is_empty() {
            let mut pages = vec![winner.page_id];
            pages.extend(better.iter().take(2).map(|pc| pc.page_id));
            return Some(Issue::new(
                ConflictType::IntentMismatch,
                Severity::Medium,
                pages,
                IssueDetails::WrongWinner {
                    query: query.to_string(),
                    winner_type: winner.classified_type,
                    expected_type: "category or service".to_string(),
                    impressions: winner_row.impressions,
                    clicks: winner_row.clicks,
                    query_city: None,
                    correct_city: None,
                },
            ));
        }
    }

    // PAGE_TYPE_MISMATCH: single product winning a plural category query.
    if is_plural_query(query) && winner.classified_type == PageType::Product {
        let categories: Vec<&Classification> = classifications
            .iter()
            .filter(|pc| pc.classified_type.is_category() && has_query_overlap(&query_tokens, pc))
            .collect();
        if let Some(category) = categories.first() {
            return Some(Issue::new(
                ConflictType::PageTypeMismatch,
                Severity::Medium,
                vec![winner.page_id, category.page_id],
                IssueDetails::WrongWinner {
                    query: query.to_string(),
                    winner_type: winner.classified_type,
                    expected_type: "category".to_string(),
                    impressions: winner_row.impressions,
                    clicks: winner_row.clicks,
                    query_city: None,
                    correct_city: None,
                },
            ));
        }
    }

    // HOMEPAGE_HOARDING: homepage winning a query a specific page covers.
    if winner.classified_type == PageType::Homepage {
        let specific: Vec<&Classification> = classifications
            .iter()
            .filter(|pc| pc.classified_type.is_specific() && has_query_overlap(&query_tokens, pc))
            .collect();
        if !specific.is_empty() {
            let mut pages = vec![winner.page_id];
            pages.extend(specific.iter().take(2).map(|pc| pc.page_id));
            return Some(Issue::new(
                ConflictType::HomepageHoarding,
                Severity::Medium,
                pages,
                IssueDetails::WrongWinner {
                    query: query.to_string(),
                    winner_type: winner.classified_type,
                    expected_type: specific[0].classified_type.as_str().to_string(),
                    impressions: winner_row.impressions,
                    clicks: winner_row.clicks,
                    query_city: None,
                    correct_city: None,
                },
            ));
        }
    }

    // GEOGRAPHIC_MISMATCH: locally-scoped query won by the wrong city.
    if has_local && winner.classified_type == PageType::Location {
        let query_city = extract_query_city(query)?;
        let query_city_norm = normalize_geo(&query_city);
        let winner_city_norm = normalize_geo(&winner.geo_node);
        if !query_city_norm.is_empty()
            && !winner_city_norm.is_empty()
            && query_city_norm != winner_city_norm
        {
            let correct = classifications.iter().find(|pc| {
                pc.classified_type == PageType::Location
                    && normalize_geo(&pc.geo_node) == query_city_norm
            })?;
            return Some(Issue::new(
                ConflictType::GeographicMismatch,
                Severity::High,
                vec![winner.page_id, correct.page_id],
                IssueDetails::WrongWinner {
                    query: query.to_string(),
                    winner_type: winner.classified_type,
                    expected_type: "location".to_string(),
                    impressions: winner_row.impressions,
                    clicks: winner_row.clicks,
                    query_city: Some(query_city),
                    correct_city: Some(correct.geo_node.clone()),
                },
            ));
        }
    }

    None
}

/// Query words minus stop words, expanded with synonym-group members so
/// inflection differences still match slug tokens.
fn significant_query_tokens(query: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for word in query.to_lowercase().split_whitespace() {
        if stopwords::is_stop_word(word) {
            continue;
        }
        tokens.insert(word.to_string());
        for synonym in stopwords::synonyms_of(word) {
            tokens.insert((*synonym).to_string());
        }
    }
    tokens
}

/// At least one significant query word appears in the page's slug tokens.
fn has_query_overlap(query_tokens: &BTreeSet<String>, page: &Classification) -> bool {
    query_tokens
        .iter()
        .any(|token| page.slug_tokens.contains(token))
}
