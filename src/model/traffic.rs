//! Search-traffic input rows (query ↔ landing page metrics).

use serde::{Deserialize, Serialize};

/// One query/page row from the search-traffic source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficRow {
    /// Search query, as reported.
    pub query: String,
    /// Landing page URL, as reported.
    pub page_url: String,
    /// Click count over the lookback window.
    pub clicks: u64,
    /// Impression count over the lookback window.
    pub impressions: u64,
    /// Average ranking position.
    pub position: f64,
}
