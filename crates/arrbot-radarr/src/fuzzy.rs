//! Fuzzy ranking of titles against free-form search terms.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// How many candidates a fuzzy search keeps.
pub const MAX_MATCHES: usize = 10;

/// An item paired with its similarity score.
#[derive(Debug, Clone)]
pub struct Scored<T> {
    pub item: T,
    pub score: i64,
}

/// Rank `items` by similarity between their title and the space-joined
/// search terms, best first, truncated to [`MAX_MATCHES`]. Matching is
/// case-insensitive; titles that do not match at all score zero. Ties keep
/// the incoming order.
pub fn rank_by_title<T>(
    items: Vec<T>,
    terms: &[String],
    title: impl Fn(&T) -> &str,
) -> Vec<Scored<T>> {
    let query = terms.join(" ").to_lowercase();
    let matcher = SkimMatcherV2::default();

    let mut scored: Vec<Scored<T>> = items
        .into_iter()
        .map(|item| {
            let score = matcher
                .fuzzy_match(&title(&item).to_lowercase(), &query)
                .unwrap_or(0);
            Scored { item, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_MATCHES);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles<'a>(scored: &[Scored<&'a str>]) -> Vec<&'a str> {
        scored.iter().map(|s| s.item).collect()
    }

    #[test]
    fn test_matches_rank_above_non_matches() {
        let items = vec!["Heat", "The Terminator"];
        let ranked = rank_by_title(items, &["terminator".to_string()], |t| t);

        assert_eq!(ranked[0].item, "The Terminator");
        assert!(ranked[0].score > 0);
        assert_eq!(ranked[1].item, "Heat");
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn test_case_insensitive() {
        let items = vec!["ALIEN", "Aliens"];
        let ranked = rank_by_title(items, &["alien".to_string()], |t| t);
        assert!(ranked[0].score > 0);
        assert!(ranked[1].score > 0);
    }

    #[test]
    fn test_multi_word_terms_are_joined() {
        let items = vec!["Blade Runner 2049", "Blade"];
        let terms = vec!["blade".to_string(), "runner".to_string()];
        let ranked = rank_by_title(items, &terms, |t| t);
        assert_eq!(ranked[0].item, "Blade Runner 2049");
    }

    #[test]
    fn test_truncates_to_max_matches() {
        let items: Vec<String> = (0..25).map(|i| format!("Movie {i}")).collect();
        let ranked = rank_by_title(items, &["movie".to_string()], |t| t.as_str());
        assert_eq!(ranked.len(), MAX_MATCHES);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let items = vec!["Zed", "Axe", "Bow"];
        let ranked = rank_by_title(items, &["qqq".to_string()], |t| t);
        assert_eq!(titles(&ranked), vec!["Zed", "Axe", "Bow"]);
    }
}
