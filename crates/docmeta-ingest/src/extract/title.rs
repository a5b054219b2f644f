//! Title selection from the opening lines of a document.
//!
//! Candidate lines must have a plausible length, contain no front-matter
//! boilerplate, and not be mostly stopwords. Among those, title-cased lines
//! win; failing that, lines containing a phrase typical of report and paper
//! titles are used. The longest candidate by word count is chosen, shorter
//! text breaking ties.

use std::cmp::Reverse;

use docmeta_core::HeuristicParams;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::stopwords::is_stopword;

/// Lines containing any of these (case-insensitive) are front matter.
const BOILERPLATE_MARKERS: &[&str] = &["arxiv", "doi", "abstract", "acknowledgements", "copyright"];

/// Phrases typical of titles that are not title-cased.
const TRIGGER_PHRASES: &[&str] = &[
    "a study of",
    "a survey of",
    "an analysis of",
    "analysis of",
    "approach to",
    "framework for",
    "guide to",
    "introduction to",
    "overview of",
    "report on",
    "towards",
    "using",
];

/// Leading section numbers and bullet glyphs.
static LEADING_NUMBERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\d.)(\-–—•*·▪●◦#]+").unwrap());

/// Pick a title from the opening lines of `text`, or return `fallback`.
pub fn extract_title(text: &str, fallback: &str, params: &HeuristicParams) -> String {
    let mut eligible: Vec<String> = Vec::new();
    for line in text.lines().take(params.title_scan_lines) {
        let line = line.trim();
        let len = line.chars().count();
        if len <= params.title_min_len || len >= params.title_max_len {
            continue;
        }
        if has_boilerplate(line) || stopword_ratio(line) >= params.title_stopword_ratio {
            continue;
        }
        let stripped = LEADING_NUMBERING_RE.replace(line, "");
        let stripped = stripped.trim();
        if !stripped.is_empty() {
            eligible.push(stripped.to_string());
        }
    }

    let mut candidates: Vec<&String> = eligible
        .iter()
        .filter(|line| starts_uppercase(line) && is_title_case(line))
        .collect();

    if candidates.is_empty() {
        candidates = eligible.iter().filter(|line| has_trigger_phrase(line)).collect();
    }

    // Stable sort keeps document order among equal candidates
    candidates.sort_by_key(|line| (Reverse(line.split_whitespace().count()), line.chars().count()));

    match candidates.first() {
        Some(best) => {
            debug!("Title candidates: {}, chosen: {:?}", candidates.len(), best);
            truncate_title(best, params.title_max_output)
        }
        None => truncate_title(fallback, params.title_max_output),
    }
}

/// Cut to `max_chars`, replacing the tail with "..." when it is too long.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_string();
    }
    let kept: String = title.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn has_boilerplate(line: &str) -> bool {
    let lower = line.to_lowercase();
    BOILERPLATE_MARKERS.iter().any(|m| lower.contains(m))
}

fn has_trigger_phrase(line: &str) -> bool {
    let lower = line.to_lowercase();
    TRIGGER_PHRASES.iter().any(|p| lower.contains(p))
}

fn stopword_ratio(line: &str) -> f64 {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return 1.0;
    }
    let stops = words.iter().filter(|w| is_stopword(w)).count();
    stops as f64 / words.len() as f64
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Title case: every cased run starts with one uppercase letter followed
/// only by lowercase letters, and at least one cased letter exists.
fn is_title_case(line: &str) -> bool {
    let mut seen_cased = false;
    let mut previous_cased = false;
    for c in line.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            seen_cased = true;
        } else {
            previous_cased = false;
        }
    }
    seen_cased
}
