//! Query-intent marker tables and geographic modifiers.
//!
//! Marker groups are tested in declaration order; the first group with a
//! match decides the intent.

/// Markers for comparison/round-up queries.
pub const LISTICLE_MARKERS: &[&str] = &[
    "best",
    "top",
    "vs",
    "versus",
    "review",
    "reviews",
    "compare",
    "comparison",
    "ranking",
    "rankings",
];

/// Markers for research queries.
pub const INFORMATIONAL_MARKERS: &[&str] = &[
    "how", "what", "why", "guide", "tips", "tutorial", "ideas", "diy", "examples",
];

/// Markers for queries looking for the business itself.
pub const NAVIGATIONAL_MARKERS: &[&str] = &["login", "contact", "about", "hours", "location"];

/// Markers for purchase-ready queries. "near me" is matched as a phrase.
pub const TRANSACTIONAL_MARKERS: &[&str] = &[
    "buy", "price", "cost", "pricing", "quote", "hire", "book", "near me", "service", "services",
    "company", "rental", "rentals",
];

/// Whole tokens that mark a query as locally scoped.
pub const GEO_MODIFIER_TOKENS: &[&str] = &["in", "near", "nearby", "local"];
