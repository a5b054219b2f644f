//! Document file types and the generated metadata record.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PDF: &str = "application/pdf";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "txt")]
    PlainText,
    #[serde(rename = "docx")]
    Docx,
    #[serde(rename = "pdf")]
    Pdf,
}

impl FileType {
    /// Resolve a declared MIME type. Parameters (`; charset=...`) are ignored.
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PLAIN_TEXT => Ok(Self::PlainText),
            MIME_DOCX => Ok(Self::Docx),
            MIME_PDF => Ok(Self::Pdf),
            _ => Err(Error::UnsupportedFileType(mime.to_string())),
        }
    }

    /// Resolve a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Ok(Self::PlainText),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            other => Err(Error::UnsupportedFileType(format!(".{}", other))),
        }
    }

    /// Resolve from a filename's extension.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let ext = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFileType(filename.to_string()))?;
        Self::from_extension(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata generated for one document.
///
/// `title` is at most 80 characters and `keywords` holds at most 10
/// distinct entries; both are enforced by the pipeline that builds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub document_id: String,
    pub title: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub file_type: FileType,
    pub character_count: usize,
    pub word_count: usize,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub language: String,
    pub entities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
}

impl MetadataRecord {
    /// Serialize as the pretty-printed `metadata.json` download.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Entities compare as a set; every other field compares exactly.
impl PartialEq for MetadataRecord {
    fn eq(&self, other: &Self) -> bool {
        let entities: HashSet<&String> = self.entities.iter().collect();
        let other_entities: HashSet<&String> = other.entities.iter().collect();

        self.document_id == other.document_id
            && self.title == other.title
            && self.summary == other.summary
            && self.keywords == other.keywords
            && self.file_type == other.file_type
            && self.character_count == other.character_count
            && self.word_count == other.word_count
            && self.timestamp == other.timestamp
            && self.filename == other.filename
            && self.language == other.language
            && entities == other_entities
            && self.page_count == other.page_count
    }
}
