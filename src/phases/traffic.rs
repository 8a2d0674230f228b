//! P4 — Traffic Validation.
//!
//! Confirms static suspicions against real search traffic: groups rows by
//! query, computes impression shares, filters noise, and emits
//! `GSC_CONFIRMED` issues for queries where a secondary page captures a
//! meaningful share. Matching static issues are upgraded in place.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use crate::core::config::PipelineConfig;
use crate::model::classification::Classification;
use crate::model::issue::{ConflictType, GscEvidence, GscRow, Issue, IssueDetails, Severity};
use crate::model::traffic::TrafficRow;
use crate::query::branded::is_branded_query;
use crate::url::normalize::normalize_full_url;

/// Validate traffic rows into confirmed conflicts.
#[must_use]
pub fn run_traffic_validation(
    classifications: &[Classification],
    traffic_rows: &[TrafficRow],
    brand_name: Option<&str>,
    homepage_title: Option<&str>,
    config: &PipelineConfig,
) -> Vec<Issue> {
    let groups = group_rows_by_query(
        classifications,
        traffic_rows,
        brand_name,
        homepage_title,
        config,
    );
    groups
        .into_iter()
        .filter_map(|(query, rows)| analyze_query_group(&query, rows, config))
        .collect()
}

/// Group eligible rows by lowercased query, each row resolved to a
/// classification and annotated with its impression share.
///
/// Drops rows below the impression floor, rows on branded queries, and rows
/// whose page does not resolve to a classification.
#[must_use]
pub fn group_rows_by_query(
    classifications: &[Classification],
    traffic_rows: &[TrafficRow],
    brand_name: Option<&str>,
    homepage_title: Option<&str>,
    config: &PipelineConfig,
) -> BTreeMap<String, Vec<GscRow>> {
    let by_url: BTreeMap<&str, &Classification> = classifications
        .iter()
        .map(|c| (c.normalized_url.as_str(), c))
        .collect();

    let mut groups: BTreeMap<String, Vec<GscRow>> = BTreeMap::new();
    for row in traffic_rows {
        if row.impressions < config.traffic.min_impressions {
            continue;
        }
        let query = row.query.trim().to_lowercase();
        if query.is_empty() || is_branded_query(&query, brand_name, homepage_title) {
            continue;
        }
        let normalized = normalize_full_url(&row.page_url);
        let Some(classification) = by_url.get(normalized.as_str()) else {
            continue;
        };
        groups.entry(query).or_default().push(GscRow {
            page_id: classification.page_id,
            page_url: row.page_url.clone(),
            clicks: row.clicks,
            impressions: row.impressions,
            position: row.position,
            share: 0.0,
        });
    }

    // Impressions descending, page id as the deterministic tie-break;
    // shares are computed once over the full group and never recomputed.
    for rows in groups.values_mut() {
        rows.sort_by(|a, b| {
            b.impressions
                .cmp(&a.impressions)
                .then_with(|| a.page_id.cmp(&b.page_id))
        });
        let total: f64 = rows.iter().map(|r| r.impressions as f64).sum();
        if total > 0.0 {
            for row in rows.iter_mut() {
                row.share = row.impressions as f64 / total;
            }
        }
    }
    groups
}

/// Decide whether one query's rows describe a confirmed conflict.
#[must_use]
pub fn analyze_query_group(
    query: &str,
    rows: Vec<GscRow>,
    config: &PipelineConfig,
) -> Option<Issue> {
    let survivors: Vec<GscRow> = rows
        .into_iter()
        .filter(|row| row.share >= config.traffic.noise_share_floor || row.clicks > 0)
        .collect();

    if survivors.len() < 2 {
        return None;
    }
    if survivors[0].share >= config.traffic.primary_dominance_share {
        return None;
    }
    if survivors[1].share < config.traffic.secondary_conflict_share {
        return None;
    }

    let severity = calculate_severity(&survivors, config);
    let pages: Vec<u64> = survivors.iter().map(|row| row.page_id).collect();
    let total_impressions: u64 = survivors.iter().map(|row| row.impressions).sum();
    let total_clicks: u64 = survivors.iter().map(|row| row.clicks).sum();

    let mut issue = Issue::new(
        ConflictType::GscConfirmed,
        severity,
        pages,
        IssueDetails::GscConfirmed {
            query: query.to_string(),
            total_impressions,
            total_clicks,
            rows: survivors,
        },
    );
    issue.gsc_validated = true;
    Some(issue)
}

/// Severity of a confirmed conflict, evaluated on per-row shares.
#[must_use]
pub fn calculate_severity(rows: &[GscRow], config: &PipelineConfig) -> Severity {
    let strong_rows = rows
        .iter()
        .filter(|row| row.share >= config.traffic.severe_row_share)
        .count();
    if strong_rows >= config.traffic.severe_row_count {
        return Severity::Severe;
    }
    let secondary_share = rows.get(1).map_or(0.0, |row| row.share);
    if secondary_share >= config.traffic.high_secondary_share {
        Severity::High
    } else if secondary_share >= config.traffic.secondary_conflict_share {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Upgrade pass: any static issue sharing at least two pages with a
/// confirmed conflict is marked validated and receives the traffic
/// evidence.
pub fn upgrade_static_issues(static_issues: &mut [Issue], gsc_issues: &[Issue]) {
    for issue in static_issues.iter_mut() {
        for gsc_issue in gsc_issues {
            let shared = issue
                .pages
                .iter()
                .filter(|page_id| gsc_issue.pages.contains(page_id))
                .count();
            if shared < 2 {
                continue;
            }
            let IssueDetails::GscConfirmed {
                query,
                total_impressions,
                total_clicks,
                ..
            } = &gsc_issue.details
            else {
                continue;
            };
            issue.gsc_validated = true;
            issue.gsc_evidence = Some(GscEvidence {
                query: query.clone(),
                total_impressions: *total_impressions,
                total_clicks: *total_clicks,
            });
            break;
        }
    }
}
