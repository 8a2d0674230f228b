//! P6 — Cluster & Prioritize.
//!
//! Collapses heterogeneous detector findings into stable, ranked clusters.
//! Issues sharing a cluster key merge: page sets union, traffic evidence
//! sums, severity keeps its maximum. Output order is the user-facing
//! ranking and must be byte-identical across runs.

use std::collections::BTreeMap;

use crate::core::config::PipelineConfig;
use crate::model::classification::Classification;
use crate::model::cluster::{ActionCode, Badge, Bucket, Cluster, ClusterPage, GscSummary};
use crate::model::issue::{ConflictType, Issue, IssueDetails, Severity};
use crate::model::page::PageId;
use crate::url::normalize::slug_last;

/// Cluster all issues and rank them.
#[must_use]
pub fn run_cluster(
    issues: &[Issue],
    classifications: &[Classification],
    config: &PipelineConfig,
) -> Vec<Cluster> {
    let by_id: BTreeMap<PageId, &Classification> = classifications
        .iter()
        .map(|c| (c.page_id, c))
        .collect();

    let mut builders: BTreeMap<String, ClusterBuilder> = BTreeMap::new();
    for issue in issues {
        let key = cluster_key(issue);
        builders
            .entry(key.clone())
            .or_insert_with(|| ClusterBuilder::new(key, issue))
            .merge(issue);
    }

    let mut clusters: Vec<Cluster> = builders
        .into_values()
        .map(|builder| builder.finish(&by_id, config))
        .collect();

    clusters.sort_by(|a, b| {
        a.bucket
            .rank()
            .cmp(&b.bucket.rank())
            .then_with(|| b.priority_score.cmp(&a.priority_score))
            .then_with(|| a.cluster_key.cmp(&b.cluster_key))
    });
    clusters
}

/// Conflict-type-specific grouping key.
#[must_use]
pub fn cluster_key(issue: &Issue) -> String {
    let prefix = issue.conflict_type.as_str();
    match &issue.details {
        IssueDetails::Legacy { canonical_path, .. } => {
            format!("{prefix}:{}", slug_last(canonical_path))
        }
        IssueDetails::TaxonomyClash { shared_slug } => format!("{prefix}:{shared_slug}"),
        IssueDetails::LocationBoilerplate { title_template } => {
            let head: String = title_template.chars().take(50).collect();
            format!("{prefix}:{head}")
        }
        IssueDetails::ContextDuplicate { service_keyword } => {
            format!("{prefix}:{service_keyword}")
        }
        IssueDetails::GscConfirmed { query, .. } | IssueDetails::WrongWinner { query, .. } => {
            format!("{prefix}:{query}")
        }
        IssueDetails::NearDuplicate { .. } => {
            let mut ids = issue.pages.clone();
            ids.sort_unstable();
            let joined = ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("_");
            format!("{prefix}:{joined}")
        }
    }
}

/// Bucket of a single issue: confirmed traffic beats the static family.
#[must_use]
pub fn issue_bucket(issue: &Issue) -> Bucket {
    if issue.gsc_validated || issue.conflict_type.is_traffic_confirmed() {
        Bucket::SearchConflict
    } else if issue.conflict_type.is_wrong_winner() {
        Bucket::WrongWinner
    } else {
        Bucket::SiteDuplication
    }
}

struct ClusterBuilder {
    key: String,
    conflict_type: ConflictType,
    bucket: Bucket,
    severity: Severity,
    pages: BTreeMap<PageId, ()>,
    gsc: GscSummary,
}

impl ClusterBuilder {
    fn new(key: String, first: &Issue) -> Self {
        Self {
            key,
            conflict_type: first.conflict_type,
            bucket: issue_bucket(first),
            severity: first.severity,
            pages: BTreeMap::new(),
            gsc: GscSummary::default(),
        }
    }

    fn merge(&mut self, issue: &Issue) {
        // Any merged issue with traffic confirmation lifts the whole
        // cluster into the search-conflict bucket.
        if issue_bucket(issue) == Bucket::SearchConflict {
            self.bucket = Bucket::SearchConflict;
        }
        self.severity = self.severity.max(issue.severity);
        for page_id in &issue.pages {
            self.pages.insert(*page_id, ());
        }

        match &issue.details {
            IssueDetails::GscConfirmed {
                query,
                total_impressions,
                total_clicks,
                rows,
            } => {
                self.gsc.total_impressions += total_impressions;
                self.gsc.total_clicks += total_clicks;
                self.gsc.queries.push(query.clone());
                self.gsc.rows.extend(rows.iter().cloned());
            }
            IssueDetails::WrongWinner {
                query,
                impressions,
                clicks,
                ..
            } => {
                self.gsc.total_impressions += impressions;
                self.gsc.total_clicks += clicks;
                self.gsc.queries.push(query.clone());
            }
            _ => {
                if let Some(evidence) = &issue.gsc_evidence {
                    self.gsc.total_impressions += evidence.total_impressions;
                    self.gsc.total_clicks += evidence.total_clicks;
                    self.gsc.queries.push(evidence.query.clone());
                }
            }
        }
    }

    fn finish(
        self,
        by_id: &BTreeMap<PageId, &Classification>,
        config: &PipelineConfig,
    ) -> Cluster {
        let badge = Badge::for_bucket(self.bucket);
        let action_code = ActionCode::for_conflict(self.conflict_type);

        let all_pages: Vec<&Classification> = self
            .pages
            .keys()
            .filter_map(|page_id| by_id.get(page_id).copied())
            .collect();
        let total_page_count = all_pages.len();
        let capped = cap_cluster_pages(&all_pages, config.cluster.max_cluster_size);

        let priority_score = priority_score(
            self.bucket,
            self.severity,
            self.gsc.total_impressions,
            config,
        );

        let pages: Vec<ClusterPage> = capped
            .iter()
            .map(|classification| ClusterPage {
                page_id: classification.page_id,
                url: classification.url.clone(),
                title: classification.title.clone(),
                classified_type: classification.classified_type,
                normalized_path: classification.normalized_path.clone(),
            })
            .collect();

        Cluster {
            cluster_key: self.key,
            conflict_type: self.conflict_type,
            bucket: self.bucket,
            badge,
            severity: self.severity,
            action_code,
            priority_score,
            page_count: pages.len(),
            total_page_count,
            pages,
            gsc_data: if self.gsc.is_empty() {
                None
            } else {
                Some(self.gsc)
            },
            recommendation: String::new(),
            suggested_canonical_url: None,
        }
    }
}

/// Priority score in `[0, 100]`: bucket + severity + impression volume.
#[must_use]
pub fn priority_score(
    bucket: Bucket,
    severity: Severity,
    total_impressions: u64,
    config: &PipelineConfig,
) -> u32 {
    let scoring = &config.scoring;
    let bucket_score = match bucket {
        Bucket::SearchConflict => scoring.bucket_search_conflict,
        Bucket::WrongWinner => scoring.bucket_wrong_winner,
        Bucket::SiteDuplication => scoring.bucket_site_duplication,
    };
    let severity_score = match severity {
        Severity::Severe => scoring.severity_severe,
        Severity::High => scoring.severity_high,
        Severity::Medium => scoring.severity_medium,
        Severity::Low => scoring.severity_low,
    };
    let impression_score = if total_impressions >= config.cluster.impression_threshold_high {
        scoring.impressions_high
    } else if total_impressions >= config.cluster.impression_threshold_medium {
        scoring.impressions_medium
    } else if total_impressions > 0 {
        scoring.impressions_low
    } else {
        0
    };
    (bucket_score + severity_score + impression_score).min(100)
}

/// Enforce the cluster size cap.
///
/// Oversize clusters split by folder root: the largest sub-group that fits
/// wins; when no sub-group fits, the first `cap` pages in stable order
/// survive.
fn cap_cluster_pages<'a>(
    pages: &[&'a Classification],
    cap: usize,
) -> Vec<&'a Classification> {
    if pages.len() <= cap {
        return pages.to_vec();
    }

    let mut by_folder: BTreeMap<&str, Vec<&Classification>> = BTreeMap::new();
    for page in pages {
        by_folder.entry(page.folder_root.as_str()).or_default().push(page);
    }

    if by_folder.len() > 1 {
        let fitting = by_folder
            .values()
            .filter(|group| group.len() <= cap)
            .max_by_key(|group| group.len());
        if let Some(group) = fitting {
            return group.clone();
        }
    }

    pages[..cap].to_vec()
}
