//! Slug token extraction and Jaccard similarity.

use std::collections::BTreeSet;

use crate::lexicon::stopwords;
use crate::url::normalize::path_parts;

/// Years treated as dateline noise when they appear as bare slug tokens.
const YEAR_RANGE: std::ops::RangeInclusive<u32> = 2015..=2030;

/// Minimum token length kept after splitting.
const MIN_TOKEN_LEN: usize = 3;

/// Extract meaningful tokens from a URL slug for comparison.
///
/// Every path segment is split on `-` and `_`; year-shaped tokens and tokens
/// shorter than three characters are dropped. Stop words are subtracted when
/// `remove_stop_words` is set.
///
/// `/blog/2024/best-dance-shoes-for-beginners/` →
/// `{dance, shoes, beginners, blog}`
#[must_use]
pub fn extract_slug_tokens(url: &str, remove_stop_words: bool) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for part in path_parts(url) {
        for token in part.split(['-', '_']) {
            let token = token.to_lowercase();
            if token.len() < MIN_TOKEN_LEN {
                continue;
            }
            if is_year_token(&token) {
                continue;
            }
            if remove_stop_words && stopwords::is_stop_word(&token) {
                continue;
            }
            tokens.insert(token);
        }
    }
    tokens
}

/// Jaccard similarity between the slug token sets of two URLs, in `[0, 1]`.
#[must_use]
pub fn slug_similarity(url_a: &str, url_b: &str) -> f64 {
    let tokens_a = extract_slug_tokens(url_a, true);
    let tokens_b = extract_slug_tokens(url_b, true);
    jaccard(&tokens_a, &tokens_b)
}

/// Jaccard similarity of two token sets; empty ∪ empty is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

fn is_year_token(token: &str) -> bool {
    token.len() == 4
        && token
            .parse::<u32>()
            .is_ok_and(|year| YEAR_RANGE.contains(&year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_drop_years_short_tokens_and_stop_words() {
        let tokens = extract_slug_tokens("/blog/2024/best-dance-shoes-for-beginners/", true);
        assert!(tokens.contains("dance"));
        assert!(tokens.contains("shoes"));
        assert!(tokens.contains("beginners"));
        assert!(!tokens.contains("2024"), "year token must be dropped");
        assert!(!tokens.contains("for"), "short token must be dropped");
        assert!(!tokens.contains("best"), "stop word must be dropped");
    }

    #[test]
    fn stop_words_do_not_affect_shared_topic() {
        let tokens_a = extract_slug_tokens("/blog/guide-for-event-planning/", true);
        let tokens_b = extract_slug_tokens("/articles/event-planning-tips/", true);
        assert!(tokens_a.contains("event") && tokens_b.contains("event"));
        assert!(tokens_a.contains("planning") && tokens_b.contains("planning"));
    }

    #[test]
    fn year_variants_score_as_near_duplicates() {
        let sim = slug_similarity("/blog/best-dance-shoes-2024/", "/blog/best-dance-shoes-2023/");
        assert!(sim > 0.80, "expected > 0.80, got {sim}");
    }

    #[test]
    fn unrelated_slugs_score_low() {
        let sim = slug_similarity("/blog/wedding-tips/", "/services/catering/");
        assert!(sim < 0.30, "expected < 0.30, got {sim}");
    }

    #[test]
    fn identical_non_empty_urls_score_one() {
        let sim = slug_similarity("/services/event-planning/", "/services/event-planning/");
        assert!((sim - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn both_empty_score_zero() {
        let sim = slug_similarity("/", "/");
        assert!(sim.abs() < f64::EPSILON);
    }

    #[test]
    fn years_outside_range_are_kept() {
        let tokens = extract_slug_tokens("/blog/1999-retrospective/", true);
        assert!(tokens.contains("1999"));
    }
}
