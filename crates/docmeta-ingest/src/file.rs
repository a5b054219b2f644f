//! Text extraction for uploaded documents.
//!
//! Plain text is decoded as UTF-8, DOCX paragraphs are joined with
//! newlines, and PDFs use their embedded text layer. A PDF whose text
//! layer is missing, empty or unreadable falls back to OCR; an OCR
//! failure yields empty text instead of an error.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docmeta_core::{Error, FileType, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::docx;
use crate::ocr::{OcrBackend, OcrOutput};
use crate::pdf;

/// MIME type browsers send when they do not know the format.
const GENERIC_MIME: &str = "application/octet-stream";

/// An uploaded document. Discarded once its text has been extracted.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
    /// On-disk location, when the document already lives in a file.
    pub path: Option<PathBuf>,
}

impl Document {
    pub fn from_bytes(filename: impl Into<String>, file_type: FileType, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            file_type,
            bytes,
            path: None,
        }
    }

    /// Resolve the type from the declared MIME type, or from the filename
    /// extension when no specific type was declared.
    pub fn from_upload(filename: &str, declared_mime: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let file_type = match declared_mime.map(str::trim) {
            Some(mime) if !mime.is_empty() && !mime.eq_ignore_ascii_case(GENERIC_MIME) => {
                FileType::from_mime(mime)?
            }
            _ => FileType::from_filename(filename)?,
        };
        Ok(Self::from_bytes(filename, file_type, bytes))
    }

    /// Read a document from disk, typed by its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let file_type = FileType::from_filename(&filename)?;
        let bytes = std::fs::read(path)?;
        Ok(Self {
            filename,
            file_type,
            bytes,
            path: Some(path.to_path_buf()),
        })
    }
}

/// How the text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Plain,
    Docx,
    PdfText,
    Ocr,
}

/// Raw text of one document. Never mutated after extraction.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    /// Page count, PDFs only.
    pub page_count: Option<usize>,
    pub method: ExtractionMethod,
}

/// Runs the extraction fallback chain for each supported format.
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Option<Arc<dyn OcrBackend>>,
    ocr_dpi: u32,
}

impl TextExtractor {
    pub fn new(ocr: Option<Arc<dyn OcrBackend>>, ocr_dpi: u32) -> Self {
        Self { ocr, ocr_dpi }
    }

    /// Extractor without an OCR fallback.
    pub fn without_ocr() -> Self {
        Self::new(None, 200)
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Extract raw text from a document.
    pub fn extract(&self, doc: &Document) -> Result<ExtractedText> {
        let extracted = match doc.file_type {
            FileType::PlainText => ExtractedText {
                text: decode_plain_text(&doc.bytes)?,
                page_count: None,
                method: ExtractionMethod::Plain,
            },
            FileType::Docx => ExtractedText {
                text: docx::extract_docx_text(&doc.bytes)?,
                page_count: None,
                method: ExtractionMethod::Docx,
            },
            FileType::Pdf => self.extract_pdf(doc),
        };

        info!(
            "Extracted {} chars from {} via {:?}",
            extracted.text.chars().count(),
            doc.filename,
            extracted.method
        );
        Ok(extracted)
    }

    fn extract_pdf(&self, doc: &Document) -> ExtractedText {
        let layer_pages = match pdf::extract_pdf_text(&doc.bytes) {
            Ok(layer) if !layer.is_empty() => {
                return ExtractedText {
                    text: layer.text,
                    page_count: Some(layer.page_count),
                    method: ExtractionMethod::PdfText,
                };
            }
            Ok(layer) => {
                info!(
                    "{} has no text layer ({} pages), using OCR",
                    doc.filename, layer.page_count
                );
                Some(layer.page_count)
            }
            Err(e) => {
                warn!("Standard extraction failed for {}: {}. Using OCR.", doc.filename, e);
                None
            }
        };

        match self.run_ocr(doc) {
            Ok(output) => {
                info!(
                    "OCR recognized {} pages of {} in {}ms",
                    output.pages.saturating_sub(output.failed_pages),
                    doc.filename,
                    output.processing_time_ms
                );
                if output.failed_pages > 0 {
                    warn!(
                        "OCR returned partial text for {}: {} of {} pages failed",
                        doc.filename, output.failed_pages, output.pages
                    );
                }
                ExtractedText {
                    text: output.text,
                    page_count: Some(output.pages).or(layer_pages),
                    method: ExtractionMethod::Ocr,
                }
            }
            Err(e) => {
                warn!("OCR failed for {}: {}. Continuing with empty text.", doc.filename, e);
                ExtractedText {
                    text: String::new(),
                    page_count: layer_pages,
                    method: ExtractionMethod::Ocr,
                }
            }
        }
    }

    /// OCR works on a file path. Documents held only in memory are written
    /// to a temporary file that is removed when this call returns.
    fn run_ocr(&self, doc: &Document) -> Result<OcrOutput> {
        let backend = self
            .ocr
            .as_ref()
            .ok_or_else(|| Error::Ocr("no OCR backend available".to_string()))?;

        if let Some(path) = &doc.path {
            return backend.ocr_pdf(path, self.ocr_dpi);
        }

        let mut temp = tempfile::Builder::new()
            .prefix("docmeta-")
            .suffix(".pdf")
            .tempfile()?;
        temp.write_all(&doc.bytes)?;
        temp.flush()?;
        backend.ocr_pdf(temp.path(), self.ocr_dpi)
    }
}

/// Decode plain text as UTF-8, dropping a leading byte-order mark.
fn decode_plain_text(bytes: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::Extraction(format!("Invalid UTF-8 content: {}", e)))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::docx::tests::build_docx;
    use crate::pdf::tests::build_pdf;

    /// OCR stub that records the paths it was given.
    pub(crate) struct StubOcr {
        pub(crate) text: Option<String>,
        pub(crate) seen: Mutex<Vec<PathBuf>>,
    }

    impl StubOcr {
        pub(crate) fn returning(text: &str) -> Self {
            Self {
                text: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                text: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl OcrBackend for StubOcr {
        fn name(&self) -> &str {
            "stub"
        }

        fn run_ocr(&self, _image_path: &Path) -> Result<String> {
            unreachable!("ocr_pdf is overridden")
        }

        fn ocr_pdf(&self, pdf_path: &Path, _dpi: u32) -> Result<OcrOutput> {
            assert!(pdf_path.exists(), "OCR input must exist on disk");
            self.seen.lock().unwrap().push(pdf_path.to_path_buf());
            match &self.text {
                Some(text) => Ok(OcrOutput {
                    text: text.clone(),
                    pages: 2,
                    ..OcrOutput::default()
                }),
                None => Err(Error::Ocr("engine crashed".to_string())),
            }
        }
    }

    #[test]
    fn test_plain_text() {
        let doc = Document::from_bytes("a.txt", FileType::PlainText, b"\xef\xbb\xbfHello\nWorld".to_vec());
        let out = TextExtractor::without_ocr().extract(&doc).unwrap();
        assert_eq!(out.text, "Hello\nWorld");
        assert_eq!(out.method, ExtractionMethod::Plain);
        assert!(out.page_count.is_none());
    }

    #[test]
    fn test_invalid_utf8_is_extraction_error() {
        let doc = Document::from_bytes("a.txt", FileType::PlainText, vec![0xff, 0xfe, 0x00]);
        let err = TextExtractor::without_ocr().extract(&doc).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_docx() {
        let doc = Document::from_bytes("a.docx", FileType::Docx, build_docx(&["One", "Two"]));
        let out = TextExtractor::without_ocr().extract(&doc).unwrap();
        assert_eq!(out.text, "One\nTwo");
        assert_eq!(out.method, ExtractionMethod::Docx);
    }

    #[test]
    fn test_pdf_text_layer_skips_ocr() {
        let stub = Arc::new(StubOcr::returning("ocr text"));
        let extractor = TextExtractor::new(Some(stub.clone()), 200);
        let doc = Document::from_bytes("a.pdf", FileType::Pdf, build_pdf(&[Some("Native text")]));

        let out = extractor.extract(&doc).unwrap();
        assert!(out.text.contains("Native"));
        assert_eq!(out.method, ExtractionMethod::PdfText);
        assert_eq!(out.page_count, Some(1));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_broken_pdf_falls_back_to_ocr() {
        let stub = Arc::new(StubOcr::returning("Recovered by OCR"));
        let extractor = TextExtractor::new(Some(stub.clone()), 200);
        let doc = Document::from_bytes("scan.pdf", FileType::Pdf, b"not really a pdf".to_vec());

        let out = extractor.extract(&doc).unwrap();
        assert_eq!(out.text, "Recovered by OCR");
        assert_eq!(out.method, ExtractionMethod::Ocr);
        assert_eq!(out.page_count, Some(2));

        // The temporary copy handed to OCR is gone once extraction returns
        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(!seen[0].exists());
    }

    #[test]
    fn test_empty_text_layer_falls_back_to_ocr() {
        let stub = Arc::new(StubOcr::returning("Scanned words"));
        let extractor = TextExtractor::new(Some(stub.clone()), 200);
        let doc = Document::from_bytes("scan.pdf", FileType::Pdf, build_pdf(&[None]));

        let out = extractor.extract(&doc).unwrap();
        assert_eq!(out.text, "Scanned words");
        assert_eq!(out.method, ExtractionMethod::Ocr);
    }

    #[test]
    fn test_ocr_failure_yields_empty_text() {
        let extractor = TextExtractor::new(Some(Arc::new(StubOcr::failing())), 200);
        let doc = Document::from_bytes("scan.pdf", FileType::Pdf, build_pdf(&[None, None]));

        let out = extractor.extract(&doc).unwrap();
        assert!(out.text.is_empty());
        assert_eq!(out.page_count, Some(2));
    }

    #[test]
    fn test_no_ocr_backend_yields_empty_text() {
        let doc = Document::from_bytes("scan.pdf", FileType::Pdf, b"garbage".to_vec());
        let out = TextExtractor::without_ocr().extract(&doc).unwrap();
        assert!(out.text.is_empty());
        assert!(out.page_count.is_none());
    }

    #[test]
    fn test_on_disk_pdf_is_passed_directly() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"garbage").unwrap();

        let stub = Arc::new(StubOcr::returning("text"));
        let extractor = TextExtractor::new(Some(stub.clone()), 200);
        let doc = Document::from_path(&path).unwrap();
        extractor.extract(&doc).unwrap();

        assert_eq!(stub.seen.lock().unwrap().as_slice(), &[path]);
    }

    #[test]
    fn test_from_upload_type_resolution() {
        let doc = Document::from_upload("r.pdf", Some("application/pdf"), vec![]).unwrap();
        assert_eq!(doc.file_type, FileType::Pdf);

        let doc = Document::from_upload("notes.txt", Some("application/octet-stream"), vec![]).unwrap();
        assert_eq!(doc.file_type, FileType::PlainText);

        let doc = Document::from_upload("notes.docx", None, vec![]).unwrap();
        assert_eq!(doc.file_type, FileType::Docx);

        let err = Document::from_upload("img.png", Some("image/png"), vec![]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }
}
