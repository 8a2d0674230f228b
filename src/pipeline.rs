//! Pipeline orchestrator: collaborator traits and `AnalysisEngine`.
//!
//! One call to [`AnalysisEngine::run_analysis`] drives all seven phases over
//! a single site. The engine owns no I/O: pages, traffic, and site metadata
//! arrive through collaborator traits, and persistence is the sink's
//! problem. Within a run everything is synchronous and deterministic.

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::core::config::PipelineConfig;
use crate::core::errors::{CannError, Result};
use crate::model::page::Page;
use crate::model::run::{AnalysisRunResult, BadgeCounts, BucketCounts, RunStatus};
use crate::model::traffic::TrafficRow;
use crate::phases::{cluster, fix, ingest, safe_pairs, static_detect, traffic, wrong_winner};

/// Reads pages and their metadata for a site.
pub trait PageSource {
    /// All pages of the site; the engine filters for eligibility itself.
    ///
    /// An unknown site must surface as [`CannError::SiteNotFound`].
    fn pages_for_site(&self, site_id: u64) -> Result<Vec<Page>>;
}

/// Reads query ↔ landing-page rows for a site.
pub trait TrafficSource {
    /// Traffic rows over `[start, end]`. Failures here degrade the run
    /// instead of failing it.
    fn traffic_for_site(&self, site_id: u64, start: NaiveDate, end: NaiveDate)
    -> Result<Vec<TrafficRow>>;
}

/// Site-level metadata used for branded-query filtering.
pub trait SiteMetadata {
    /// Known brand name, when the site configured one.
    fn brand_name(&self, site_id: u64) -> Option<String>;
    /// Homepage title, used as a brand-name fallback.
    fn homepage_title(&self, site_id: u64) -> Option<String>;
}

/// Persists finished run results. Durability concerns live here, not in the
/// engine.
pub trait ResultSink {
    /// Store one run result (completed or failed).
    fn write_run(&mut self, result: &AnalysisRunResult) -> Result<()>;
}

/// The cannibalization analysis engine.
///
/// Holds references to its collaborators and an immutable config; every run
/// is a pure function of the collaborator outputs.
pub struct AnalysisEngine<'a> {
    config: &'a PipelineConfig,
    pages: &'a dyn PageSource,
    metadata: &'a dyn SiteMetadata,
    traffic: Option<&'a dyn TrafficSource>,
}

impl<'a> AnalysisEngine<'a> {
    /// Build an engine without a traffic source; P4/P5 will be skipped.
    #[must_use]
    pub fn new(
        config: &'a PipelineConfig,
        pages: &'a dyn PageSource,
        metadata: &'a dyn SiteMetadata,
    ) -> Self {
        Self {
            config,
            pages,
            metadata,
            traffic: None,
        }
    }

    /// Attach a traffic source.
    #[must_use]
    pub fn with_traffic(mut self, traffic: &'a dyn TrafficSource) -> Self {
        self.traffic = Some(traffic);
        self
    }

    /// Run the full seven-phase analysis for one site.
    ///
    /// An unresolvable site id is returned as an error. An empty corpus
    /// produces a failed-but-persisted result. A traffic-source failure
    /// degrades the run: `gsc_connected` is cleared and P4/P5 are skipped.
    pub fn run_analysis(
        &self,
        site_id: u64,
        include_traffic: bool,
        lookback_days: u32,
    ) -> Result<AnalysisRunResult> {
        let started_at = Utc::now();
        let pages = self.pages.pages_for_site(site_id)?;

        // P1 — ingest and classify.
        let classifications = ingest::run_ingest(&pages);
        debug!(site_id, pages = classifications.len(), "ingest complete");
        if classifications.is_empty() {
            let error = CannError::EmptyCorpus { site_id };
            warn!(site_id, %error, "run failed");
            return Ok(AnalysisRunResult {
                site_id,
                status: RunStatus::Failed,
                started_at,
                completed_at: Utc::now(),
                gsc_connected: false,
                gsc_date_start: None,
                gsc_date_end: None,
                pages_analyzed: 0,
                bucket_counts: BucketCounts::default(),
                badge_counts: BadgeCounts::default(),
                clusters: Vec::new(),
                error_message: Some("no pages found to analyze".to_string()),
            });
        }

        // P2 — safe pairs; P3 — static detectors.
        let safe = safe_pairs::run_safe_pairs(&classifications, self.config);
        let mut static_issues =
            static_detect::run_static_detect(&classifications, &safe, self.config);
        debug!(
            site_id,
            safe_pairs = safe.len(),
            static_issues = static_issues.len(),
            "static detection complete"
        );

        // P4/P5 — traffic-backed phases, when a source is attached.
        let mut gsc_connected = false;
        let mut gsc_window: Option<(NaiveDate, NaiveDate)> = None;
        let mut gsc_issues = Vec::new();
        let mut wrong_winner_issues = Vec::new();

        if include_traffic && let Some(source) = self.traffic {
            let end = started_at.date_naive();
            let start = end - Duration::days(i64::from(lookback_days));
            match source.traffic_for_site(site_id, start, end) {
                Ok(rows) => {
                    gsc_connected = true;
                    gsc_window = Some((start, end));
                    let brand_name = self.metadata.brand_name(site_id);
                    let homepage_title = self.metadata.homepage_title(site_id);
                    gsc_issues = traffic::run_traffic_validation(
                        &classifications,
                        &rows,
                        brand_name.as_deref(),
                        homepage_title.as_deref(),
                        self.config,
                    );
                    traffic::upgrade_static_issues(&mut static_issues, &gsc_issues);
                    wrong_winner_issues = wrong_winner::run_wrong_winner(
                        &classifications,
                        &rows,
                        brand_name.as_deref(),
                        homepage_title.as_deref(),
                        self.config,
                    );
                    debug!(
                        site_id,
                        rows = rows.len(),
                        confirmed = gsc_issues.len(),
                        wrong_winner = wrong_winner_issues.len(),
                        "traffic phases complete"
                    );
                }
                Err(error) => {
                    warn!(site_id, %error, "traffic source failed; continuing without P4/P5");
                }
            }
        }

        // P6 — cluster and prioritize; P7 — fix synthesis.
        let mut all_issues = static_issues;
        all_issues.extend(gsc_issues);
        all_issues.extend(wrong_winner_issues);
        let mut clusters = cluster::run_cluster(&all_issues, &classifications, self.config);
        fix::run_fix(&mut clusters);

        let mut result = AnalysisRunResult {
            site_id,
            status: RunStatus::Completed,
            started_at,
            completed_at: Utc::now(),
            gsc_connected,
            gsc_date_start: gsc_window.map(|(start, _)| start),
            gsc_date_end: gsc_window.map(|(_, end)| end),
            pages_analyzed: classifications.len(),
            bucket_counts: BucketCounts::default(),
            badge_counts: BadgeCounts::default(),
            clusters,
            error_message: None,
        };
        result.tally();
        Ok(result)
    }

    /// Run an analysis and hand the result (completed or failed) to the sink.
    pub fn run_and_store(
        &self,
        sink: &mut dyn ResultSink,
        site_id: u64,
        include_traffic: bool,
        lookback_days: u32,
    ) -> Result<AnalysisRunResult> {
        let result = self.run_analysis(site_id, include_traffic, lookback_days)?;
        sink.write_run(&result)?;
        Ok(result)
    }
}
