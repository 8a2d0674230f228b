//! URL normalization, slug tokens, legacy suffixes, geographic helpers.
//!
//! `normalize_full_url` is the one bit-level contract of the crate: it is the
//! join key between page records and traffic rows and must stay idempotent
//! and stable across versions.

pub mod geo;
pub mod legacy;
pub mod normalize;
pub mod tokens;
