//! Metadata pipeline: document → text → metadata record.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use docmeta_core::{DocMetaConfig, FileType, HeuristicParams, MetadataRecord, Result};
use docmeta_infer::ModelCapabilities;
use tracing::info;

use crate::chunking::{cap_words, word_count};
use crate::extract;
use crate::file::{Document, ExtractedText, TextExtractor};
use crate::ocr::OcrBackend;

/// Runs extraction and every metadata stage for one document at a time.
///
/// Holds only read-only state, so one instance can be shared across
/// requests behind an `Arc`.
#[derive(Clone)]
pub struct Ingester {
    extractor: TextExtractor,
    capabilities: ModelCapabilities,
    params: HeuristicParams,
}

impl Ingester {
    pub fn new(
        config: &DocMetaConfig,
        capabilities: ModelCapabilities,
        ocr: Option<Arc<dyn OcrBackend>>,
    ) -> Self {
        Self {
            extractor: TextExtractor::new(ocr, config.ocr.dpi),
            capabilities,
            params: config.heuristics.clone(),
        }
    }

    pub fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    pub fn has_ocr(&self) -> bool {
        self.extractor.has_ocr()
    }

    /// Extract raw text only.
    pub fn extract(&self, doc: &Document) -> Result<ExtractedText> {
        self.extractor.extract(doc)
    }

    /// Extract text and build the metadata record.
    ///
    /// Only unsupported types and extraction failures are errors; every
    /// later stage degrades to its fallback.
    pub fn ingest_document(&self, doc: &Document) -> Result<MetadataRecord> {
        let extracted = self.extractor.extract(doc)?;
        Ok(self.ingest_text(
            &extracted.text,
            &doc.filename,
            doc.file_type,
            extracted.page_count,
        ))
    }

    /// Build the metadata record for a file on disk.
    pub fn ingest_file(&self, path: &Path) -> Result<MetadataRecord> {
        let doc = Document::from_path(path)?;
        self.ingest_document(&doc)
    }

    /// Build the metadata record for already-extracted text.
    pub fn ingest_text(
        &self,
        text: &str,
        filename: &str,
        file_type: FileType,
        page_count: Option<usize>,
    ) -> MetadataRecord {
        let params = &self.params;
        let capped = cap_words(text, params.word_cap);

        let title = extract::extract_title(text, filename, params);
        let summary = extract::summarize(&capped, self.capabilities.summarizer.as_deref(), params);
        let keywords = extract::extract_keywords(text, params);
        let language = extract::detect_language(
            text,
            self.capabilities.language.as_deref(),
            params.language_sample_chars,
        );
        let entities = extract::extract_entities(
            &capped,
            self.capabilities.ner.as_deref(),
            params.entity_min_words,
            params.entity_max_words,
        );

        let record = MetadataRecord {
            document_id: uuid::Uuid::new_v4().to_string(),
            title,
            summary,
            keywords,
            file_type,
            character_count: text.chars().count(),
            word_count: word_count(text),
            timestamp: Utc::now(),
            filename: filename.to_string(),
            language,
            entities,
            page_count,
        };

        info!(
            "Metadata for {}: {} words, {} keywords, {} entities, language={}",
            record.filename,
            record.word_count,
            record.keywords.len(),
            record.entities.len(),
            record.language
        );

        record
    }
}
