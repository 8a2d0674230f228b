//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use cannibalscope::prelude::*;
//! ```

// Core
pub use crate::core::config::PipelineConfig;
pub use crate::core::errors::{CannError, Result};

// Model
pub use crate::model::classification::Classification;
pub use crate::model::cluster::{ActionCode, Badge, Bucket, Cluster, ClusterPage, GscSummary};
pub use crate::model::issue::{ConflictType, Issue, IssueDetails, Severity};
pub use crate::model::page::{Page, PageId, PageType};
pub use crate::model::run::{AnalysisRunResult, BadgeCounts, BucketCounts, RunStatus};
pub use crate::model::traffic::TrafficRow;

// Pipeline
pub use crate::pipeline::{AnalysisEngine, PageSource, ResultSink, SiteMetadata, TrafficSource};
