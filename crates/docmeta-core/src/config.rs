//! Configuration: tunable heuristic parameters and environment overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds used by the title, keyword, summary, language and entity stages.
///
/// Defaults reproduce the reference behaviour exactly; changing them changes
/// output, so treat them as tuning knobs rather than invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicParams {
    /// Number of leading lines scanned for a title.
    pub title_scan_lines: usize,
    /// Title candidates must be strictly longer than this (chars).
    pub title_min_len: usize,
    /// Title candidates must be strictly shorter than this (chars).
    pub title_max_len: usize,
    /// Maximum title length in the output record (chars, ellipsis included).
    pub title_max_output: usize,
    /// Lines whose stopword share reaches this ratio are rejected.
    pub title_stopword_ratio: f64,
    /// Keyword tokens must be strictly longer than this (chars).
    pub keyword_min_len: usize,
    /// Size of the most-frequent candidate pool.
    pub keyword_candidates: usize,
    /// Maximum number of keywords in the output record.
    pub keyword_limit: usize,
    /// Word cap applied to text before summarization and NER.
    pub word_cap: usize,
    /// Words per summarization chunk.
    pub summary_chunk_words: usize,
    /// Maximum number of chunks sent to the summarizer.
    pub summary_max_chunks: usize,
    /// Chunks shorter than this (words) are skipped.
    pub summary_min_chunk_words: usize,
    /// Upper length bound passed to the summarizer (tokens).
    pub summary_max_tokens: usize,
    /// Lower length bound passed to the summarizer (tokens).
    pub summary_min_tokens: usize,
    /// Leading words used by the fallback summary.
    pub fallback_summary_words: usize,
    /// Characters sampled for language detection.
    pub language_sample_chars: usize,
    /// Shortest entity span kept (words).
    pub entity_min_words: usize,
    /// Longest entity span kept (words).
    pub entity_max_words: usize,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        Self {
            title_scan_lines: 40,
            title_min_len: 10,
            title_max_len: 120,
            title_max_output: 80,
            title_stopword_ratio: 0.5,
            keyword_min_len: 4,
            keyword_candidates: 30,
            keyword_limit: 10,
            word_cap: 3000,
            summary_chunk_words: 500,
            summary_max_chunks: 2,
            summary_min_chunk_words: 50,
            summary_max_tokens: 130,
            summary_min_tokens: 40,
            fallback_summary_words: 60,
            language_sample_chars: 1000,
            entity_min_words: 2,
            entity_max_words: 6,
        }
    }
}

/// OCR fallback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrSettings {
    pub enabled: bool,
    /// Rasterization resolution for scanned pages.
    pub dpi: u32,
    /// Tesseract language pack (e.g. "eng").
    pub language: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dpi: 200,
            language: "eng".to_string(),
        }
    }
}

pub const DEFAULT_SUMMARIZER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SUMMARIZER_URL: &str = "https://api.openai.com/v1";

/// Abstractive summarizer endpoint (OpenAI-compatible chat completions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizerSettings {
    pub base_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl SummarizerSettings {
    /// The summarizer is only loaded when an endpoint or key was supplied.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() || self.api_key.is_some()
    }

    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_SUMMARIZER_URL)
    }
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: DEFAULT_SUMMARIZER_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Top-level DocMeta configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMetaConfig {
    /// HTTP server port.
    pub port: u16,
    /// Multipart upload limit in bytes.
    pub max_upload_bytes: usize,
    /// Whether the NER stage is loaded.
    pub ner_enabled: bool,
    pub ocr: OcrSettings,
    pub summarizer: SummarizerSettings,
    pub heuristics: HeuristicParams,
}

impl Default for DocMetaConfig {
    fn default() -> Self {
        Self {
            port: 3004,
            max_upload_bytes: 25 * 1024 * 1024,
            ner_enabled: true,
            ocr: OcrSettings::default(),
            summarizer: SummarizerSettings::default(),
            heuristics: HeuristicParams::default(),
        }
    }
}

impl DocMetaConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = parse_var(&lookup, "PORT")? {
            config.port = port;
        }
        if let Some(mb) = parse_var::<usize, _>(&lookup, "DOCMETA_MAX_UPLOAD_MB")? {
            config.max_upload_bytes = mb.checked_mul(1024 * 1024).ok_or_else(|| {
                Error::Config(format!("DOCMETA_MAX_UPLOAD_MB is too large: {}", mb))
            })?;
        }
        if let Some(enabled) = parse_switch(&lookup, "DOCMETA_NER")? {
            config.ner_enabled = enabled;
        }

        if let Some(enabled) = parse_switch(&lookup, "DOCMETA_OCR")? {
            config.ocr.enabled = enabled;
        }
        if let Some(dpi) = parse_var(&lookup, "DOCMETA_OCR_DPI")? {
            config.ocr.dpi = dpi;
        }
        if let Some(lang) = non_empty(&lookup, "DOCMETA_OCR_LANG") {
            config.ocr.language = lang;
        }

        config.summarizer.base_url = non_empty(&lookup, "DOCMETA_SUMMARIZER_URL");
        config.summarizer.api_key = non_empty(&lookup, "DOCMETA_SUMMARIZER_API_KEY");
        if let Some(model) = non_empty(&lookup, "DOCMETA_SUMMARIZER_MODEL") {
            config.summarizer.model = model;
        }
        if let Some(timeout) = parse_var(&lookup, "DOCMETA_SUMMARIZER_TIMEOUT_SECS")? {
            config.summarizer.timeout_secs = timeout;
        }

        Ok(config)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(None),
    }
}

fn parse_switch<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, key).map(|v| v.to_lowercase()) {
        Some(v) => match v.as_str() {
            "1" | "on" | "true" | "yes" => Ok(Some(true)),
            "0" | "off" | "false" | "no" => Ok(Some(false)),
            _ => Err(Error::Config(format!("{} must be on or off, got {}", key, v))),
        },
        None => Ok(None),
    }
}
