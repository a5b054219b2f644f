//! OCR backend abstraction.

use std::path::Path;
use std::time::Instant;

use docmeta_core::{Error, Result};
use tempfile::TempDir;
use tracing::{debug, warn};

use super::rasterize;

/// Text recognized from a rasterized PDF.
#[derive(Debug, Clone, Default)]
pub struct OcrOutput {
    /// Page texts joined in page order.
    pub text: String,
    /// Number of rasterized pages.
    pub pages: usize,
    /// Pages whose recognition failed and contributed no text.
    pub failed_pages: usize,
    pub processing_time_ms: u64,
}

/// Trait for OCR backends.
pub trait OcrBackend: Send + Sync {
    /// Backend identifier (e.g. "tesseract").
    fn name(&self) -> &str;

    /// Core OCR: extract text from one image file.
    fn run_ocr(&self, image_path: &Path) -> Result<String>;

    /// Rasterize every page of a PDF and recognize each one in page order.
    ///
    /// A page that fails is logged and skipped so the remaining pages still
    /// contribute text; the call only errors if rasterization fails or no
    /// page could be recognized.
    fn ocr_pdf(&self, pdf_path: &Path, dpi: u32) -> Result<OcrOutput> {
        let start = Instant::now();
        let temp_dir = TempDir::new()?;
        let images = rasterize::pdf_to_images(pdf_path, dpi, temp_dir.path())?;

        let mut texts = Vec::with_capacity(images.len());
        let mut failed_pages = 0;
        let mut last_error = None;
        for (index, image) in images.iter().enumerate() {
            match self.run_ocr(image) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!("OCR failed on page {}: {}", index + 1, e);
                    failed_pages += 1;
                    last_error = Some(e);
                }
            }
        }

        if texts.is_empty() {
            return Err(last_error
                .unwrap_or_else(|| Error::Ocr("no pages recognized".to_string())));
        }

        debug!(
            "OCR recognized {}/{} pages of {}",
            texts.len(),
            images.len(),
            pdf_path.display()
        );

        Ok(OcrOutput {
            text: texts.join("\n"),
            pages: images.len(),
            failed_pages,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
