//! Whitespace word utilities: capping, lead words, fixed-size word chunks.
//!
//! Words are whitespace-delimited tokens. Every function here rejoins words
//! with a single space, so line structure is not preserved.

/// Number of whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep at most `max_words` words.
pub fn cap_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `n` words, used for lead-sentence fallbacks.
pub fn lead_words(text: &str, n: usize) -> String {
    cap_words(text, n)
}

/// Split into consecutive chunks of `chunk_size` words. The last chunk may be shorter.
pub fn chunk_words(text: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words.chunks(chunk_size).map(|chunk| chunk.join(" ")).collect()
}
