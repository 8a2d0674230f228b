//! Classification: the structured fingerprint of a single page after P1.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::page::{PageId, PageType};

/// Per-page classification record, immutable within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Source page id.
    pub page_id: PageId,
    /// Original URL as ingested.
    pub url: String,
    /// Page title (empty when the source had none).
    pub title: String,
    /// Join key against traffic rows.
    pub normalized_url: String,
    /// Lowercased path with trailing slash trimmed (root stays `/`).
    pub normalized_path: String,
    /// Ordered non-empty path segments.
    pub path_parts: Vec<String>,
    /// Number of path segments.
    pub depth: usize,
    /// First path segment, or empty for the root.
    pub folder_root: String,
    /// Path minus its last segment; root stays `/`.
    pub parent_path: String,
    /// Last path segment, or empty for the root.
    pub slug_last: String,
    /// Stop-word-free slug tokens for similarity comparison.
    pub slug_tokens: BTreeSet<String>,
    /// Resolved page role.
    pub classified_type: PageType,
    /// Whether the last segment carries an obsolescence suffix.
    pub is_legacy_variant: bool,
    /// City slug for location pages, otherwise empty.
    pub geo_node: String,
    /// Service keyword under a service or location folder, otherwise empty.
    pub service_keyword: String,
}
