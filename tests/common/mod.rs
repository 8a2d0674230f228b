//! Shared test infrastructure for cannibalscope.
//!
//! Provides:
//! - in-memory collaborator fakes (`MemoryPageSource`, `MemoryTrafficSource`,
//!   `StaticMetadata`, `MemorySink`)
//! - record constructors (`page()`, `titled_page()`, `traffic_row()`)
//! - `demo_site()` — a realistic small-business site fixture

// Not every test binary uses every item; suppress dead-code warnings for the
// shared module.
#![allow(dead_code)]

use std::collections::BTreeMap;

use cannibalscope::prelude::*;
use chrono::NaiveDate;

// ──────────────────── collaborator fakes ────────────────────

/// Page source backed by a site-id map.
#[derive(Debug, Default)]
pub struct MemoryPageSource {
    sites: BTreeMap<u64, Vec<Page>>,
}

impl MemoryPageSource {
    pub fn with_site(site_id: u64, pages: Vec<Page>) -> Self {
        let mut sites = BTreeMap::new();
        sites.insert(site_id, pages);
        Self { sites }
    }
}

impl PageSource for MemoryPageSource {
    fn pages_for_site(&self, site_id: u64) -> Result<Vec<Page>> {
        self.sites
            .get(&site_id)
            .cloned()
            .ok_or(CannError::SiteNotFound { site_id })
    }
}

/// Traffic source that either serves fixed rows or fails on demand.
#[derive(Debug, Default)]
pub struct MemoryTrafficSource {
    rows: Vec<TrafficRow>,
    fail: bool,
}

impl MemoryTrafficSource {
    pub fn with_rows(rows: Vec<TrafficRow>) -> Self {
        Self { rows, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
        }
    }
}

impl TrafficSource for MemoryTrafficSource {
    fn traffic_for_site(
        &self,
        _site_id: u64,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<TrafficRow>> {
        if self.fail {
            return Err(CannError::TrafficSource {
                details: "simulated outage".to_string(),
            });
        }
        Ok(self.rows.clone())
    }
}

/// Fixed site metadata.
#[derive(Debug, Default)]
pub struct StaticMetadata {
    pub brand: Option<String>,
    pub homepage_title: Option<String>,
}

impl SiteMetadata for StaticMetadata {
    fn brand_name(&self, _site_id: u64) -> Option<String> {
        self.brand.clone()
    }

    fn homepage_title(&self, _site_id: u64) -> Option<String> {
        self.homepage_title.clone()
    }
}

/// Sink that records every written run.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub runs: Vec<AnalysisRunResult>,
}

impl ResultSink for MemorySink {
    fn write_run(&mut self, result: &AnalysisRunResult) -> Result<()> {
        self.runs.push(result.clone());
        Ok(())
    }
}

// ──────────────────── record constructors ────────────────────

pub fn page(id: u64, url: &str) -> Page {
    Page {
        id,
        url: format!("https://example.com{url}"),
        title: format!("Page {id}"),
        status: "publish".to_string(),
        ..Page::default()
    }
}

pub fn titled_page(id: u64, url: &str, title: &str) -> Page {
    Page {
        title: title.to_string(),
        ..page(id, url)
    }
}

pub fn homepage(id: u64, title: &str) -> Page {
    Page {
        is_homepage: true,
        ..titled_page(id, "/", title)
    }
}

pub fn traffic_row(query: &str, path: &str, clicks: u64, impressions: u64) -> TrafficRow {
    TrafficRow {
        query: query.to_string(),
        page_url: format!("https://example.com{path}"),
        clicks,
        impressions,
        position: 5.0,
    }
}

// ──────────────────── site fixture ────────────────────

/// A realistic small-business site: shop hierarchy, service hub with
/// spokes, location pages with boilerplate titles, a blog with a
/// year-variant duplicate, one legacy copy, and utility pages.
pub fn demo_site() -> Vec<Page> {
    vec![
        homepage(1, "Coco Events | Event Planning in NYC"),
        // Shop hierarchy.
        page(10, "/shop/"),
        page(11, "/shop/dance/"),
        page(12, "/shop/dance/jazz-shoes/"),
        page(13, "/shop/dance/ballet-slippers/"),
        // Services.
        page(20, "/services/"),
        page(21, "/services/event-planning/"),
        page(22, "/services/event-planning-old/"),
        page(23, "/services/catering/"),
        // Locations with boilerplate titles.
        titled_page(
            30,
            "/service-area/event-planner/brooklyn/",
            "Event Planner in Brooklyn | Coco Events",
        ),
        titled_page(
            31,
            "/service-area/event-planner/manhattan/",
            "Event Planner in Manhattan | Coco Events",
        ),
        titled_page(
            32,
            "/service-area/event-planner/queens/",
            "Event Planner in Queens | Coco Events",
        ),
        // Blog, including a year-variant near-duplicate.
        page(40, "/blog/best-dance-shoes-2023/"),
        page(41, "/blog/best-dance-shoes-2024/"),
        page(42, "/blog/wedding-tips/"),
        // Utility noise.
        page(50, "/cart/"),
        page(51, "/checkout/"),
        // Ineligible pages.
        Page {
            status: "draft".to_string(),
            ..page(60, "/draft-page/")
        },
        Page {
            is_noindex: true,
            ..page(61, "/hidden-page/")
        },
    ]
}
