//! Summary generation: abstractive when a summarizer is loaded, lead words otherwise.

use docmeta_core::HeuristicParams;
use docmeta_infer::{SummarizerBackend, SummaryBounds};
use tracing::{debug, warn};

use crate::chunking::{chunk_words, lead_words, word_count};

/// Returned when the text has no words at all.
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available";

/// Summarize word-capped text. Never returns an empty string.
///
/// The text is split into fixed-size word chunks and only the first few
/// are sent to the summarizer; chunks that are too short to summarize are
/// skipped. Chunk summaries are joined with a space.
pub fn summarize(
    text: &str,
    summarizer: Option<&dyn SummarizerBackend>,
    params: &HeuristicParams,
) -> String {
    let Some(summarizer) = summarizer else {
        debug!("No summarizer loaded, using lead words");
        return fallback_summary(text, params);
    };

    let bounds = SummaryBounds {
        max_tokens: params.summary_max_tokens,
        min_tokens: params.summary_min_tokens,
    };

    let mut parts: Vec<String> = Vec::new();
    for chunk in chunk_words(text, params.summary_chunk_words)
        .iter()
        .take(params.summary_max_chunks)
    {
        if word_count(chunk) < params.summary_min_chunk_words {
            continue;
        }
        match summarizer.summarize(chunk, bounds) {
            Ok(part) if !part.trim().is_empty() => parts.push(part.trim().to_string()),
            Ok(_) => {}
            Err(e) => {
                warn!("Summarization failed: {}", e);
                return fallback_summary(text, params);
            }
        }
    }

    let summary = parts.join(" ");
    if summary.is_empty() {
        warn!("Empty result from summarizer, using fallback.");
        return fallback_summary(text, params);
    }
    summary
}

/// The first `fallback_summary_words` words plus "...".
pub fn fallback_summary(text: &str, params: &HeuristicParams) -> String {
    let lead = lead_words(text, params.fallback_summary_words);
    if lead.is_empty() {
        SUMMARY_UNAVAILABLE.to_string()
    } else {
        format!("{}...", lead)
    }
}
