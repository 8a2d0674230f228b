//! Pipeline configuration: TOML file + validated defaults.
//!
//! One immutable `PipelineConfig` value is built at init and handed by
//! reference to every phase. The core reads no environment variables: a run
//! must be a pure function of its explicit inputs.

#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{CannError, Result};

/// Full pipeline configuration model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub traffic: TrafficConfig,
    pub similarity: SimilarityConfig,
    pub cluster: ClusterConfig,
    pub scoring: ScoringConfig,
}

/// Thresholds for traffic validation (P4) and wrong-winner detection (P5).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    /// Rows below this impression count are dropped at ingest.
    pub min_impressions: u64,
    /// Rows below this impression share with zero clicks are noise.
    pub noise_share_floor: f64,
    /// Top share at or above this means one page owns the query.
    pub primary_dominance_share: f64,
    /// Secondary share at or above this confirms a conflict.
    pub secondary_conflict_share: f64,
    /// Secondary share at or above this escalates severity to HIGH.
    pub high_secondary_share: f64,
    /// Per-row share counted toward the SEVERE three-way split.
    pub severe_row_share: f64,
    /// Number of rows at `severe_row_share` required for SEVERE.
    pub severe_row_count: usize,
}

/// Slug-token similarity thresholds (P2 sibling filter, P3 near-duplicates).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Jaccard similarity at or above this flags near-duplicate slugs.
    pub near_duplicate_threshold: f64,
    /// Minimum location pages sharing a title template to flag boilerplate.
    pub boilerplate_min_group: usize,
}

/// Cluster assembly limits (P6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Hard cap on pages per emitted cluster.
    pub max_cluster_size: usize,
    /// Impression total granting the full impression score.
    pub impression_threshold_high: u64,
    /// Impression total granting the medium impression score.
    pub impression_threshold_medium: u64,
}

/// Priority score tables (P6). The sum of the maxima must stay within 100.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringConfig {
    pub bucket_search_conflict: u32,
    pub bucket_wrong_winner: u32,
    pub bucket_site_duplication: u32,
    pub severity_severe: u32,
    pub severity_high: u32,
    pub severity_medium: u32,
    pub severity_low: u32,
    pub impressions_high: u32,
    pub impressions_medium: u32,
    pub impressions_low: u32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            min_impressions: 20,
            noise_share_floor: 0.05,
            primary_dominance_share: 0.85,
            secondary_conflict_share: 0.15,
            high_secondary_share: 0.35,
            severe_row_share: 0.10,
            severe_row_count: 3,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            near_duplicate_threshold: 0.80,
            boilerplate_min_group: 3,
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_cluster_size: 15,
            impression_threshold_high: 10_000,
            impression_threshold_medium: 1_000,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bucket_search_conflict: 50,
            bucket_wrong_winner: 30,
            bucket_site_duplication: 20,
            severity_severe: 30,
            severity_high: 22,
            severity_medium: 14,
            severity_low: 6,
            impressions_high: 20,
            impressions_medium: 10,
            impressions_low: 5,
        }
    }
}

impl ScoringConfig {
    /// Largest priority score the tables can produce.
    #[must_use]
    pub const fn max_priority(&self) -> u32 {
        let bucket = max3(
            self.bucket_search_conflict,
            self.bucket_wrong_winner,
            self.bucket_site_duplication,
        );
        let severity = max3(
            max3(self.severity_severe, self.severity_high, 0),
            self.severity_medium,
            self.severity_low,
        );
        let impressions = max3(
            self.impressions_high,
            self.impressions_medium,
            self.impressions_low,
        );
        bucket + severity + impressions
    }
}

const fn max3(a: u32, b: u32, c: u32) -> u32 {
    let ab = if a > b { a } else { b };
    if ab > c { ab } else { c }
}

impl PipelineConfig {
    /// Load config from a TOML file, then validate.
    ///
    /// A missing file is an error — callers that want defaults construct
    /// `PipelineConfig::default()` directly.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CannError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|source| CannError::ConfigParse {
            context: "io",
            details: format!("{}: {source}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse config from TOML text, then validate.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        for (name, val) in [
            ("traffic.noise_share_floor", self.traffic.noise_share_floor),
            (
                "traffic.primary_dominance_share",
                self.traffic.primary_dominance_share,
            ),
            (
                "traffic.secondary_conflict_share",
                self.traffic.secondary_conflict_share,
            ),
            (
                "traffic.high_secondary_share",
                self.traffic.high_secondary_share,
            ),
            ("traffic.severe_row_share", self.traffic.severe_row_share),
            (
                "similarity.near_duplicate_threshold",
                self.similarity.near_duplicate_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&val) {
                return Err(CannError::InvalidConfig {
                    details: format!("{name} must be in [0, 1], got {val}"),
                });
            }
        }

        if self.traffic.min_impressions == 0 {
            return Err(CannError::InvalidConfig {
                details: "traffic.min_impressions must be >= 1".to_string(),
            });
        }
        if self.traffic.secondary_conflict_share > self.traffic.high_secondary_share {
            return Err(CannError::InvalidConfig {
                details: "traffic.secondary_conflict_share must be <= high_secondary_share"
                    .to_string(),
            });
        }
        if self.traffic.primary_dominance_share <= self.traffic.high_secondary_share {
            return Err(CannError::InvalidConfig {
                details: "traffic.primary_dominance_share must be > high_secondary_share"
                    .to_string(),
            });
        }
        if self.traffic.severe_row_count < 2 {
            return Err(CannError::InvalidConfig {
                details: "traffic.severe_row_count must be >= 2".to_string(),
            });
        }

        if self.similarity.boilerplate_min_group < 2 {
            return Err(CannError::InvalidConfig {
                details: "similarity.boilerplate_min_group must be >= 2".to_string(),
            });
        }

        if self.cluster.max_cluster_size < 2 {
            return Err(CannError::InvalidConfig {
                details: "cluster.max_cluster_size must be >= 2".to_string(),
            });
        }
        if self.cluster.impression_threshold_high <= self.cluster.impression_threshold_medium {
            return Err(CannError::InvalidConfig {
                details: "cluster.impression_threshold_high must be > impression_threshold_medium"
                    .to_string(),
            });
        }

        let max = self.scoring.max_priority();
        if max > 100 {
            return Err(CannError::InvalidConfig {
                details: format!("scoring tables must cap priority at 100; maximum is {max}"),
            });
        }

        Ok(())
    }
}
