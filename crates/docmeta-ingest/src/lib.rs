//! DocMeta Ingest — text extraction, OCR fallback, heuristic metadata generation.

pub mod chunking;
pub mod docx;
pub mod extract;
pub mod file;
pub mod ingest;
pub mod ocr;
pub mod pdf;

pub use file::{Document, ExtractedText, ExtractionMethod, TextExtractor};
pub use ingest::Ingester;
pub use ocr::{create_ocr_backend, OcrBackend, OcrOutput, TesseractBackend};
