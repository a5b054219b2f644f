//! Named-entity selection for the metadata record.

use std::collections::HashSet;

use docmeta_infer::{EntityLabel, NerBackend};
use tracing::warn;

/// Labels reported in the record.
const KEPT_LABELS: &[EntityLabel] = &[
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Gpe,
    EntityLabel::Date,
];

/// Distinct entity strings in first-occurrence order.
///
/// Only person, organisation, place and date entities spanning
/// `min_words..=max_words` words are kept.
pub fn extract_entities(
    text: &str,
    ner: Option<&dyn NerBackend>,
    min_words: usize,
    max_words: usize,
) -> Vec<String> {
    let Some(ner) = ner else {
        warn!("NER model unavailable, returning no entities");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    ner.recognize(text)
        .into_iter()
        .filter(|e| KEPT_LABELS.contains(&e.label))
        .map(|e| e.text)
        .filter(|t| (min_words..=max_words).contains(&t.split_whitespace().count()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
