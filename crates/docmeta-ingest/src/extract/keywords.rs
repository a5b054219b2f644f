//! Frequency-based keyword extraction.

use std::collections::HashMap;
use std::collections::HashSet;

use docmeta_core::HeuristicParams;

use super::stopwords::is_stopword;

/// Most frequent non-stopword tokens, distinct, in descending frequency.
///
/// Tokens longer than `keyword_min_len` characters are cleaned of
/// surrounding punctuation and lowercased before counting. Equal
/// frequencies keep first-occurrence order.
pub fn extract_keywords(text: &str, params: &HeuristicParams) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for raw in text.split_whitespace() {
        if raw.chars().count() <= params.keyword_min_len || is_stopword(raw) {
            continue;
        }
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if token.is_empty() || is_stopword(&token) {
            continue;
        }
        let count = counts.entry(token.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(token);
        }
        *count += 1;
    }

    // Stable sort: ties stay in first-occurrence order
    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|token| {
            let count = counts[&token];
            (token, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .take(params.keyword_candidates)
        .map(|(token, _)| token)
        .filter(|token| seen.insert(token.clone()))
        .take(params.keyword_limit)
        .collect()
}
