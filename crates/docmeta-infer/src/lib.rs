//! DocMeta Infer — optional model capabilities for the enrichment stages.
//!
//! Each capability is loaded once at startup. A capability that fails to
//! load is left as `None` and the corresponding pipeline stage uses its
//! local fallback instead.

pub mod language;
pub mod ner;
pub mod summarizer;

pub use language::{LanguageDetector, WhatlangDetector};
pub use ner::{Entity, EntityLabel, NerBackend, PatternNer};
pub use summarizer::{LlmSummarizer, SummarizerBackend, SummaryBounds};

use std::sync::Arc;

use docmeta_core::DocMetaConfig;
use serde::Serialize;

/// Loaded model capabilities, shared read-only by every pipeline run.
#[derive(Clone, Default)]
pub struct ModelCapabilities {
    pub summarizer: Option<Arc<dyn SummarizerBackend>>,
    pub ner: Option<Arc<dyn NerBackend>>,
    pub language: Option<Arc<dyn LanguageDetector>>,
}

/// Serializable view of which capabilities are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatus {
    pub summarizer: Option<String>,
    pub ner: Option<String>,
    pub language: Option<String>,
}

impl ModelCapabilities {
    /// No capabilities: every stage runs its fallback.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn SummarizerBackend>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_ner(mut self, ner: Arc<dyn NerBackend>) -> Self {
        self.ner = Some(ner);
        self
    }

    pub fn with_language(mut self, language: Arc<dyn LanguageDetector>) -> Self {
        self.language = Some(language);
        self
    }

    pub fn status(&self) -> CapabilityStatus {
        CapabilityStatus {
            summarizer: self.summarizer.as_ref().map(|s| s.name().to_string()),
            ner: self.ner.as_ref().map(|n| n.name().to_string()),
            language: self.language.as_ref().map(|l| l.name().to_string()),
        }
    }
}

impl std::fmt::Debug for ModelCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCapabilities")
            .field("status", &self.status())
            .finish()
    }
}

/// Load every capability the configuration allows.
///
/// Must be called outside an async context: the summarizer owns a
/// blocking HTTP client.
pub fn load_capabilities(config: &DocMetaConfig) -> ModelCapabilities {
    let mut caps = ModelCapabilities::none().with_language(Arc::new(WhatlangDetector::new()));

    if config.summarizer.is_configured() {
        match LlmSummarizer::from_settings(&config.summarizer) {
            Ok(summarizer) => {
                tracing::info!(
                    "Summarizer loaded: model={} endpoint={}",
                    config.summarizer.model,
                    config.summarizer.endpoint()
                );
                caps = caps.with_summarizer(Arc::new(summarizer));
            }
            Err(e) => {
                tracing::warn!("Summarizer unavailable: {}. Using lead-words fallback.", e);
            }
        }
    } else {
        tracing::info!("No summarizer endpoint configured. Using lead-words fallback.");
    }

    if config.ner_enabled {
        caps = caps.with_ner(Arc::new(PatternNer::new()));
    } else {
        tracing::warn!("NER disabled. Entities will be empty.");
    }

    caps
}
