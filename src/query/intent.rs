//! Query-intent classification, plural heuristic, and city extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::intents;

static IN_CITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin\s+([a-z]+(?:\s+[a-z]+)?)").expect("static regex"));
static NEAR_CITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnear\s+([a-z]+(?:\s+[a-z]+)?)").expect("static regex"));

/// Coarse search intent of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// Comparison or round-up intent ("best", "top", "vs").
    Listicle,
    /// Research intent ("how", "what", "guide").
    Informational,
    /// Looking for the business itself ("contact", "hours").
    Navigational,
    /// Purchase-ready intent ("buy", "hire", "near me").
    Transactional,
    /// No clear signal.
    Ambiguous,
}

/// Classify a query's intent and detect a local modifier.
///
/// Marker groups are tested in fixed order (listicle, informational,
/// navigational, transactional); the first hit decides. The local modifier
/// is computed independently of intent.
#[must_use]
pub fn classify_query_intent(query: &str) -> (QueryIntent, bool) {
    let lowered = query.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let has_local = tokens
        .iter()
        .any(|token| intents::GEO_MODIFIER_TOKENS.contains(token));

    let groups = [
        (QueryIntent::Listicle, intents::LISTICLE_MARKERS),
        (QueryIntent::Informational, intents::INFORMATIONAL_MARKERS),
        (QueryIntent::Navigational, intents::NAVIGATIONAL_MARKERS),
        (QueryIntent::Transactional, intents::TRANSACTIONAL_MARKERS),
    ];
    for (intent, markers) in groups {
        if markers
            .iter()
            .any(|marker| marker_matches(marker, &lowered, &tokens))
        {
            return (intent, has_local);
        }
    }
    (QueryIntent::Ambiguous, has_local)
}

/// True when the query reads as plural (category intent rather than a
/// single product): last word ends in `s` but not `ss`, `us`, or `is`.
#[must_use]
pub fn is_plural_query(query: &str) -> bool {
    let lowered = query.to_lowercase();
    let Some(last) = lowered.split_whitespace().next_back() else {
        return false;
    };
    last.ends_with('s') && !last.ends_with("ss") && !last.ends_with("us") && !last.ends_with("is")
}

/// Extract a city candidate from `in <city>` / `near <city>` phrasings.
#[must_use]
pub fn extract_query_city(query: &str) -> Option<String> {
    let lowered = query.to_lowercase();
    for pattern in [&*IN_CITY, &*NEAR_CITY] {
        if let Some(captures) = pattern.captures(&lowered) {
            let city = captures.get(1)?.as_str().trim();
            // "near me" is a modifier, not a place.
            if city != "me" && !city.is_empty() {
                return Some(city.to_string());
            }
        }
    }
    None
}

fn marker_matches(marker: &str, query: &str, tokens: &[&str]) -> bool {
    if marker.contains(' ') {
        // Phrase markers match on padded text so "near me" does not fire
        // inside longer words.
        let padded = format!(" {query} ");
        padded.contains(&format!(" {marker} "))
    } else {
        tokens.contains(&marker)
    }
}
