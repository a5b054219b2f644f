//! Abstractive summarization backends.
//!
//! The `SummarizerBackend` trait abstracts over the model call. The only
//! bundled implementation, `LlmSummarizer`, talks to an OpenAI-compatible
//! chat completions endpoint (OpenAI, Groq, Ollama, vLLM, ...).

use std::time::Duration;

use docmeta_core::{Error, Result, SummarizerSettings};
use serde_json::{json, Value};
use tracing::debug;

/// Output length bounds for one summarization call, in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub max_tokens: usize,
    pub min_tokens: usize,
}

/// Trait for abstractive summarizers.
pub trait SummarizerBackend: Send + Sync {
    /// Backend identifier (e.g. "llm:gpt-4o-mini").
    fn name(&self) -> &str;

    /// Summarize one chunk of text.
    fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String>;
}

const SYSTEM_PROMPT: &str = "You are a summarization model. Write a concise abstractive \
summary of the user's text in plain prose. Do not add headings, lists, or commentary.";

/// Summarizer backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct LlmSummarizer {
    client: reqwest::blocking::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    name: String,
}

impl LlmSummarizer {
    /// Build the HTTP client for the configured endpoint.
    pub fn from_settings(settings: &SummarizerSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}/chat/completions", settings.endpoint().trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            name: format!("llm:{}", settings.model),
        })
    }

    fn request_body(&self, text: &str, bounds: SummaryBounds) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": format!(
                        "Summarize the following text in roughly {} to {} tokens.\n\n{}",
                        bounds.min_tokens, bounds.max_tokens, text
                    ),
                },
            ],
            "temperature": 0,
            "max_tokens": bounds.max_tokens,
            "stream": false,
        })
    }
}

impl SummarizerBackend for LlmSummarizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        debug!("Summarizing {} chars via {}", text.len(), self.url);

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&self.request_body(text, bounds));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request
            .send()
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Inference(format!("API error {}: {}", status, body)));
        }

        let body: Value = response
            .json()
            .map_err(|e| Error::Inference(format!("Invalid response body: {}", e)))?;
        parse_completion(&body)
    }
}

/// Pull `choices[0].message.content` out of a chat completion response.
pub fn parse_completion(body: &Value) -> Result<String> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::Inference("Response has no completion content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "  A short summary. "}}]
        });
        assert_eq!(parse_completion(&body).unwrap(), "A short summary.");
    }

    #[test]
    fn test_parse_completion_missing_content() {
        let body = json!({"error": {"message": "model not found"}});
        assert!(matches!(parse_completion(&body), Err(Error::Inference(_))));
    }

    #[test]
    fn test_request_body_uses_bounds() {
        let settings = SummarizerSettings {
            base_url: Some("http://localhost:11434/v1/".to_string()),
            ..SummarizerSettings::default()
        };
        let summarizer = LlmSummarizer::from_settings(&settings).unwrap();
        assert_eq!(summarizer.url, "http://localhost:11434/v1/chat/completions");
        assert_eq!(summarizer.name(), "llm:gpt-4o-mini");

        let body = summarizer.request_body(
            "Some text",
            SummaryBounds {
                max_tokens: 130,
                min_tokens: 40,
            },
        );
        assert_eq!(body["max_tokens"], 130);
        assert_eq!(body["temperature"], 0);
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("40 to 130"));
        assert!(prompt.ends_with("Some text"));
    }
}
