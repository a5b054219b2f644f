//! Named-entity recognition.
//!
//! Provides a `NerBackend` trait for pluggable recognizers and a built-in
//! `PatternNer` that needs no model files: honorific and capitalised-name
//! patterns for people, suffix patterns for organisations, a gazetteer for
//! geopolitical entities and month-name patterns for dates.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Entity category, following the usual PERSON/ORG/GPE/DATE scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Date,
    Other,
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Trait for NER backends.
pub trait NerBackend: Send + Sync {
    /// Backend identifier (e.g. "pattern").
    fn name(&self) -> &str;

    /// Recognize entities in document order. May contain repeats.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

static HONORIFIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sir|Dame)\.?[ \t]+([A-Z][a-z]+(?:[ \t]+[A-Z]\.)?(?:[ \t]+[A-Z][a-z]+)+)")
        .unwrap()
});

static CAPITALIZED_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,3}\b").unwrap());

static ORG_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][A-Za-z&]*(?:[ \t]+[A-Z][A-Za-z&]*)*[ \t]+(?:Inc\.|Inc\b|Corp\.|Corp\b|Corporation|LLC|Ltd\.|Ltd\b|Co\.|Company|Group|Foundation|Association|Institute|University|College|Laboratories|Labs)",
    )
    .unwrap()
});

static ORG_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:University|Institute|Department|Ministry|Bank|Agency|Office|Bureau|Council)[ \t]+of[ \t]+(?:the[ \t]+)?[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*",
    )
    .unwrap()
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:January|February|March|April|May|June|July|August|September|October|November|December)[ \t]+\d{1,2}(?:st|nd|rd|th)?,?[ \t]+\d{4}|\d{1,2}[ \t]+(?:January|February|March|April|May|June|July|August|September|October|November|December),?[ \t]+\d{4}|(?:January|February|March|April|May|June|July|August|September|October|November|December)[ \t]+\d{4})\b",
    )
    .unwrap()
});

/// Known geopolitical entities, multi-word names first so they win overlaps.
static GAZETTEER: &[&str] = &[
    "United States of America",
    "United States",
    "United Kingdom",
    "United Arab Emirates",
    "New York City",
    "New York",
    "New Jersey",
    "New Delhi",
    "New Zealand",
    "South Africa",
    "South Korea",
    "North Korea",
    "Saudi Arabia",
    "Sri Lanka",
    "Costa Rica",
    "Hong Kong",
    "Los Angeles",
    "San Francisco",
    "San Diego",
    "Mexico City",
    "Buenos Aires",
    "Rio de Janeiro",
    "Cape Town",
    "Kuala Lumpur",
    "Tel Aviv",
    "Abu Dhabi",
    "Washington",
    "London",
    "Paris",
    "Berlin",
    "Tokyo",
    "Beijing",
    "Moscow",
    "Madrid",
    "Rome",
    "Mumbai",
    "Toronto",
    "Sydney",
    "America",
    "Canada",
    "Mexico",
    "Brazil",
    "Argentina",
    "France",
    "Germany",
    "Italy",
    "Spain",
    "Portugal",
    "Russia",
    "China",
    "Japan",
    "India",
    "Pakistan",
    "Nigeria",
    "Kenya",
    "Egypt",
    "Australia",
    "Europe",
    "Africa",
    "Asia",
];

static GAZETTEER_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = GAZETTEER.iter().map(|g| regex::escape(g)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
});

static MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

/// Capitalised words that start sentences or headings and are not names.
static NON_NAME_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "In", "On", "At", "For", "From", "With",
    "And", "But", "Or", "If", "When", "While", "After", "Before", "During", "Our", "We",
    "It", "Its", "A", "An", "Table", "Figure", "Section", "Chapter", "Introduction",
    "Conclusion", "Abstract", "Summary", "Results", "Methods", "Discussion", "Monday",
    "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

/// Rule-based recognizer with no model dependency.
#[derive(Debug, Default)]
pub struct PatternNer;

impl PatternNer {
    pub fn new() -> Self {
        Self
    }
}

impl NerBackend for PatternNer {
    fn name(&self) -> &str {
        "pattern"
    }

    fn recognize(&self, text: &str) -> Vec<Entity> {
        // (start, end, entity) so results can be returned in document order
        let mut found: Vec<(usize, usize, Entity)> = Vec::new();

        for m in ORG_SUFFIX_RE.find_iter(text).chain(ORG_PREFIX_RE.find_iter(text)) {
            let trimmed = trim_leading_non_names(m.as_str());
            let start = m.end() - trimmed.len();
            claim(&mut found, start, m.end(), Entity::new(trimmed, EntityLabel::Org));
        }

        for m in DATE_RE.find_iter(text) {
            claim(&mut found, m.start(), m.end(), Entity::new(m.as_str(), EntityLabel::Date));
        }

        for m in GAZETTEER_RE.find_iter(text) {
            claim(&mut found, m.start(), m.end(), Entity::new(m.as_str(), EntityLabel::Gpe));
        }

        for cap in HONORIFIC_RE.captures_iter(text) {
            if let Some(name) = cap.get(1) {
                claim(
                    &mut found,
                    name.start(),
                    name.end(),
                    Entity::new(name.as_str(), EntityLabel::Person),
                );
            }
        }

        for m in CAPITALIZED_RUN_RE.find_iter(text) {
            let candidate = trim_leading_non_names(m.as_str());
            let words: Vec<&str> = candidate.split_whitespace().collect();
            if words.len() < 2 || words.iter().any(|w| is_non_name(w)) {
                continue;
            }
            let start = m.end() - candidate.len();
            claim(&mut found, start, m.end(), Entity::new(candidate, EntityLabel::Person));
        }

        found.sort_by_key(|(start, _, _)| *start);
        found.into_iter().map(|(_, _, entity)| entity).collect()
    }
}

/// Record a span unless an earlier, higher-priority pattern already covers it.
fn claim(found: &mut Vec<(usize, usize, Entity)>, start: usize, end: usize, entity: Entity) {
    if found.iter().all(|(s, e, _)| end <= *s || start >= *e) {
        found.push((start, end, entity));
    }
}

fn is_non_name(word: &str) -> bool {
    NON_NAME_WORDS.contains(&word) || MONTHS.contains(&word)
}

/// Drop sentence-start words like "The" from the front of a capitalised run.
fn trim_leading_non_names(span: &str) -> &str {
    let mut rest = span;
    loop {
        let mut parts = rest.splitn(2, |c: char| c == ' ' || c == '\t');
        let first = parts.next().unwrap_or("");
        match parts.next() {
            Some(tail) if is_non_name(first) => rest = tail.trim_start(),
            _ => return rest,
        }
    }
}
