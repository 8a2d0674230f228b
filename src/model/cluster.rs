//! Cluster: a merged, prioritized group of issues sharing a cluster key.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::model::issue::{ConflictType, GscRow, Severity};
use crate::model::page::{PageId, PageType};

/// Coarse category of a cluster; also its sort group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    SearchConflict,
    SiteDuplication,
    WrongWinner,
}

impl Bucket {
    /// Sort rank: search conflicts first, wrong winners last.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::SearchConflict => 0,
            Self::SiteDuplication => 1,
            Self::WrongWinner => 2,
        }
    }

    /// Persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchConflict => "SEARCH_CONFLICT",
            Self::SiteDuplication => "SITE_DUPLICATION",
            Self::WrongWinner => "WRONG_WINNER",
        }
    }
}

/// User-facing label derived from the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    Confirmed,
    Potential,
    WrongWinner,
}

impl Badge {
    /// Persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Potential => "POTENTIAL",
            Self::WrongWinner => "WRONG_WINNER",
        }
    }

    /// Badge implied by a bucket.
    #[must_use]
    pub const fn for_bucket(bucket: Bucket) -> Self {
        match bucket {
            Bucket::SearchConflict => Self::Confirmed,
            Bucket::SiteDuplication => Self::Potential,
            Bucket::WrongWinner => Self::WrongWinner,
        }
    }
}

/// Remediation action recommended for a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCode {
    RedirectToCanonical,
    ReviewAndRedirect,
    RedirectOrDifferentiate,
    RewriteLocalEvidence,
    StrengthenCorrectPage,
}

impl ActionCode {
    /// Persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RedirectToCanonical => "REDIRECT_TO_CANONICAL",
            Self::ReviewAndRedirect => "REVIEW_AND_REDIRECT",
            Self::RedirectOrDifferentiate => "REDIRECT_OR_DIFFERENTIATE",
            Self::RewriteLocalEvidence => "REWRITE_LOCAL_EVIDENCE",
            Self::StrengthenCorrectPage => "STRENGTHEN_CORRECT_PAGE",
        }
    }

    /// Fixed action per conflict family.
    #[must_use]
    pub const fn for_conflict(conflict: ConflictType) -> Self {
        match conflict {
            ConflictType::TaxonomyClash
            | ConflictType::LegacyCleanup
            | ConflictType::NearDuplicateContent
            | ConflictType::GscConfirmed => Self::RedirectToCanonical,
            ConflictType::LegacyOrphan => Self::ReviewAndRedirect,
            ConflictType::ContextDuplicate => Self::RedirectOrDifferentiate,
            ConflictType::LocationBoilerplate | ConflictType::GeographicMismatch => {
                Self::RewriteLocalEvidence
            }
            ConflictType::IntentMismatch
            | ConflictType::PageTypeMismatch
            | ConflictType::HomepageHoarding => Self::StrengthenCorrectPage,
        }
    }

    /// Whether the action redirects traffic and therefore needs a canonical
    /// target suggestion.
    #[must_use]
    pub const fn wants_canonical(self) -> bool {
        matches!(self, Self::RedirectToCanonical | Self::RedirectOrDifferentiate)
    }
}

/// Merged traffic evidence across a cluster's issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GscSummary {
    /// Impressions summed over merged issues.
    pub total_impressions: u64,
    /// Clicks summed over merged issues.
    pub total_clicks: u64,
    /// Queries contributing to the cluster, in merge order.
    pub queries: Vec<String>,
    /// All surviving traffic rows from merged issues.
    pub rows: Vec<GscRow>,
}

impl GscSummary {
    /// True when no traffic evidence was merged in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_impressions == 0
            && self.total_clicks == 0
            && self.queries.is_empty()
            && self.rows.is_empty()
    }
}

/// Page snapshot embedded in a persisted cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPage {
    /// Page id.
    pub page_id: PageId,
    /// Original URL.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Classified role.
    pub classified_type: PageType,
    /// Normalized path.
    pub normalized_path: String,
}

/// A merged, prioritized conflict group — the engine's terminal output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Grouping key (`TYPE:context`).
    pub cluster_key: String,
    /// Conflict family.
    pub conflict_type: ConflictType,
    /// Coarse category.
    pub bucket: Bucket,
    /// User-facing label.
    pub badge: Badge,
    /// Maximum severity across merged issues.
    pub severity: Severity,
    /// Recommended remediation action.
    pub action_code: ActionCode,
    /// Priority in `[0, 100]`.
    pub priority_score: u32,
    /// Number of pages after the size cap.
    pub page_count: usize,
    /// Distinct pages merged into the cluster, before the size cap.
    pub total_page_count: usize,
    /// Participating pages (at most the configured cap).
    pub pages: Vec<ClusterPage>,
    /// Merged traffic evidence, when any.
    pub gsc_data: Option<GscSummary>,
    /// One-sentence remediation text.
    pub recommendation: String,
    /// Canonical target for redirect actions.
    pub suggested_canonical_url: Option<String>,
}
