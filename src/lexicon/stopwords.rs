//! Slug stop words, brand indicator tokens, and synonym groups.

/// Tokens carrying no topical signal; subtracted from every slug token set.
pub const SLUG_STOP_WORDS: &[&str] = &[
    "about", "all", "and", "any", "are", "best", "but", "can", "for", "from", "get", "guide",
    "guides", "had", "has", "have", "home", "how", "ideas", "index", "into", "its", "just", "more",
    "most", "near", "not", "only", "our", "out", "over", "page", "same", "some", "such", "than",
    "that", "the", "then", "this", "tips", "too", "top", "under", "very", "was", "what", "when",
    "where", "who", "why", "will", "with", "you", "your",
];

/// Whole-word company indicators that mark a query as branded.
pub const BRAND_INDICATOR_TOKENS: &[&str] = &["inc", "llc", "ltd", "corp", "co", "company"];

/// Interchangeable token families used when matching queries against slugs.
pub const SYNONYM_GROUPS: &[&[&str]] = &[
    &["plan", "planning", "planner", "planners"],
    &["event", "events"],
    &["rent", "rental", "rentals"],
    &["shoe", "shoes"],
    &["photo", "photography", "photographer"],
    &["venue", "venues"],
];

/// True when `token` is a slug stop word.
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    SLUG_STOP_WORDS.binary_search(&token).is_ok()
}

/// True when `token` is a whole-word brand indicator.
#[must_use]
pub fn is_brand_indicator(token: &str) -> bool {
    BRAND_INDICATOR_TOKENS.contains(&token)
}

/// Members of the synonym group containing `token`, or an empty slice.
#[must_use]
pub fn synonyms_of(token: &str) -> &'static [&'static str] {
    SYNONYM_GROUPS
        .iter()
        .find(|group| group.contains(&token))
        .copied()
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_sorted_for_binary_search() {
        let mut sorted = SLUG_STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SLUG_STOP_WORDS, "SLUG_STOP_WORDS must stay sorted");
    }

    #[test]
    fn stop_word_lookup() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("guide"));
        assert!(is_stop_word("tips"));
        assert!(!is_stop_word("planning"));
        assert!(!is_stop_word("shoes"));
    }

    #[test]
    fn brand_indicators_are_whole_tokens() {
        assert!(is_brand_indicator("llc"));
        assert!(is_brand_indicator("co"));
        // Substring matches must not count; "company" is its own entry.
        assert!(!is_brand_indicator("corporate"));
    }

    #[test]
    fn synonym_groups_resolve_both_directions() {
        assert!(synonyms_of("planner").contains(&"planning"));
        assert!(synonyms_of("planning").contains(&"planner"));
        assert!(synonyms_of("xyzzy").is_empty());
    }
}
