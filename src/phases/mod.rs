//! The seven-phase analysis pipeline.
//!
//! Phases run sequentially and are pure: each reads its inputs once and
//! emits immutable output. P4 is the one exception — it additionally
//! upgrades matching P3 issues in place.

pub mod cluster;
pub mod fix;
pub mod ingest;
pub mod safe_pairs;
pub mod static_detect;
pub mod traffic;
pub mod wrong_winner;
