//! Issue: a single detector's finding, before clustering.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::model::page::{PageId, PageType};

/// Conflict family a detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    TaxonomyClash,
    LegacyCleanup,
    LegacyOrphan,
    NearDuplicateContent,
    ContextDuplicate,
    LocationBoilerplate,
    GscConfirmed,
    IntentMismatch,
    PageTypeMismatch,
    HomepageHoarding,
    GeographicMismatch,
}

impl ConflictType {
    /// Persisted SCREAMING_SNAKE_CASE label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaxonomyClash => "TAXONOMY_CLASH",
            Self::LegacyCleanup => "LEGACY_CLEANUP",
            Self::LegacyOrphan => "LEGACY_ORPHAN",
            Self::NearDuplicateContent => "NEAR_DUPLICATE_CONTENT",
            Self::ContextDuplicate => "CONTEXT_DUPLICATE",
            Self::LocationBoilerplate => "LOCATION_BOILERPLATE",
            Self::GscConfirmed => "GSC_CONFIRMED",
            Self::IntentMismatch => "INTENT_MISMATCH",
            Self::PageTypeMismatch => "PAGE_TYPE_MISMATCH",
            Self::HomepageHoarding => "HOMEPAGE_HOARDING",
            Self::GeographicMismatch => "GEOGRAPHIC_MISMATCH",
        }
    }

    /// Whether the family describes a wrong-winner case rather than
    /// competing pages.
    #[must_use]
    pub const fn is_wrong_winner(self) -> bool {
        matches!(
            self,
            Self::IntentMismatch
                | Self::GeographicMismatch
                | Self::PageTypeMismatch
                | Self::HomepageHoarding
        )
    }

    /// Whether the family originates from confirmed search traffic.
    #[must_use]
    pub const fn is_traffic_confirmed(self) -> bool {
        matches!(self, Self::GscConfirmed)
    }
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity; ordering follows escalation (`Low < ... < Severe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Severe,
}

impl Severity {
    /// Persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Severe => "SEVERE",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One surviving traffic row inside a confirmed conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GscRow {
    /// Page id the row resolved to.
    pub page_id: PageId,
    /// Landing page URL as reported by the traffic source.
    pub page_url: String,
    /// Click count.
    pub clicks: u64,
    /// Impression count.
    pub impressions: u64,
    /// Average ranking position.
    pub position: f64,
    /// Impression share within the query group.
    pub share: f64,
}

/// Conflict-type-specific payload. Each detector owns its variant; there is
/// no free-form metadata map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueDetails {
    /// Same slug under diverging folder structures.
    TaxonomyClash {
        /// The slug shared by every page in the group.
        shared_slug: String,
    },
    /// Legacy page, with or without its clean counterpart.
    Legacy {
        /// Normalized path of the legacy page.
        legacy_url: String,
        /// Legacy-stripped canonical path.
        canonical_path: String,
    },
    /// Slug token sets nearly identical.
    NearDuplicate {
        /// Jaccard similarity of the pair.
        similarity: f64,
    },
    /// Same service under two parent sections.
    ContextDuplicate {
        /// Shared service keyword.
        service_keyword: String,
    },
    /// Location pages sharing a title template.
    LocationBoilerplate {
        /// The shared template after geo removal.
        title_template: String,
    },
    /// Traffic-confirmed cannibalization on one query.
    GscConfirmed {
        /// The competing query.
        query: String,
        /// Impressions summed over surviving rows.
        total_impressions: u64,
        /// Clicks summed over surviving rows.
        total_clicks: u64,
        /// Surviving rows, impressions descending.
        rows: Vec<GscRow>,
    },
    /// The wrong page type is winning a query.
    WrongWinner {
        /// The query being won.
        query: String,
        /// Type of the page currently winning.
        winner_type: PageType,
        /// Human-readable expectation, e.g. "category".
        expected_type: String,
        /// Winner impressions.
        impressions: u64,
        /// Winner clicks.
        clicks: u64,
        /// City extracted from the query (geographic mismatch only).
        query_city: Option<String>,
        /// City of the correctly targeted page (geographic mismatch only).
        correct_city: Option<String>,
    },
}

/// Traffic evidence copied onto a static issue by the P4 upgrade pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GscEvidence {
    /// The confirming query.
    pub query: String,
    /// Impressions of the confirming conflict.
    pub total_impressions: u64,
    /// Clicks of the confirming conflict.
    pub total_clicks: u64,
}

/// A single detector finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Conflict family.
    pub conflict_type: ConflictType,
    /// Escalation level.
    pub severity: Severity,
    /// Participating pages, in detector-defined stable order.
    pub pages: Vec<PageId>,
    /// Family-specific payload.
    pub details: IssueDetails,
    /// Set by P4 when real traffic confirms the suspicion.
    pub gsc_validated: bool,
    /// Evidence copied by the upgrade pass.
    pub gsc_evidence: Option<GscEvidence>,
}

impl Issue {
    /// Construct an unvalidated issue.
    #[must_use]
    pub fn new(
        conflict_type: ConflictType,
        severity: Severity,
        pages: Vec<PageId>,
        details: IssueDetails,
    ) -> Self {
        Self {
            conflict_type,
            severity,
            pages,
            details,
            gsc_validated: false,
            gsc_evidence: None,
        }
    }
}
