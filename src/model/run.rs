//! Persisted result of one analysis run.

#![allow(missing_docs)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::cluster::{Badge, Bucket, Cluster};

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Cluster counts per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub search_conflict: usize,
    pub site_duplication: usize,
    pub wrong_winner: usize,
}

/// Cluster counts per badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCounts {
    pub confirmed: usize,
    pub potential: usize,
    pub wrong_winner: usize,
}

/// Everything the result sink persists for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRunResult {
    /// Site the run analyzed.
    pub site_id: u64,
    /// Terminal state.
    pub status: RunStatus,
    /// Run start time.
    pub started_at: DateTime<Utc>,
    /// Run end time.
    pub completed_at: DateTime<Utc>,
    /// Whether traffic data participated.
    pub gsc_connected: bool,
    /// First day of the traffic lookback window, when traffic was used.
    pub gsc_date_start: Option<NaiveDate>,
    /// Last day of the traffic lookback window, when traffic was used.
    pub gsc_date_end: Option<NaiveDate>,
    /// Classified page count.
    pub pages_analyzed: usize,
    /// Cluster counts per bucket.
    pub bucket_counts: BucketCounts,
    /// Cluster counts per badge.
    pub badge_counts: BadgeCounts,
    /// Ordered clusters; empty on a failed run.
    pub clusters: Vec<Cluster>,
    /// Failure description on a failed run.
    pub error_message: Option<String>,
}

impl AnalysisRunResult {
    /// Recompute bucket and badge counters from the cluster list.
    pub fn tally(&mut self) {
        let mut buckets = BucketCounts::default();
        let mut badges = BadgeCounts::default();
        for cluster in &self.clusters {
            match cluster.bucket {
                Bucket::SearchConflict => buckets.search_conflict += 1,
                Bucket::SiteDuplication => buckets.site_duplication += 1,
                Bucket::WrongWinner => buckets.wrong_winner += 1,
            }
            match cluster.badge {
                Badge::Confirmed => badges.confirmed += 1,
                Badge::Potential => badges.potential += 1,
                Badge::WrongWinner => badges.wrong_winner += 1,
            }
        }
        self.bucket_counts = buckets;
        self.badge_counts = badges;
    }
}
