#![forbid(unsafe_code)]

//! Cannibalscope — keyword-cannibalization detection engine.
//!
//! Seven-phase analytical pipeline over one site's pages and (optionally)
//! its search-console traffic:
//! 1. **Ingest & classify** — normalize URLs, resolve page roles
//! 2. **Safe-pair filter** — suppress pairs that legitimately coexist
//! 3. **Static detectors** — structural cannibalization suspicions
//! 4. **Traffic validation** — confirm suspicions against real queries
//! 5. **Wrong-winner** — the wrong page type is ranking
//! 6. **Cluster & prioritize** — merge findings into ranked clusters
//! 7. **Fix synthesis** — canonical suggestions and remediation text
//!
//! A run is a pure function of its inputs: same pages and traffic rows in,
//! byte-identical cluster list out.

pub mod core;
pub mod lexicon;
pub mod model;
pub mod phases;
pub mod pipeline;
pub mod prelude;
pub mod query;
pub mod url;
