//! Direct PDF text-layer extraction using lopdf.

use docmeta_core::{Error, Result};
use lopdf::Document;
use tracing::{debug, warn};

/// Text layer of a PDF, one entry per page in page order.
#[derive(Debug, Clone)]
pub struct PdfTextLayer {
    pub text: String,
    pub page_count: usize,
}

impl PdfTextLayer {
    /// A layer with no printable text (typically a scanned document).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extract the embedded text of every page, joined with newlines.
///
/// Pages whose text cannot be decoded are skipped; if none can, the layer
/// is empty and the caller falls back to OCR.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<PdfTextLayer> {
    let document = Document::load_mem(bytes)
        .map_err(|e| Error::Extraction(format!("Failed to parse PDF: {}", e)))?;

    // BTreeMap keyed by 1-based page number, so iteration is page order
    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    let mut unreadable = 0;
    for &page_number in pages.keys() {
        match document.extract_text(&[page_number]) {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!("Failed to read text of page {}: {}", page_number, e);
                unreadable += 1;
            }
        }
    }

    debug!(
        "PDF text layer: {} pages, {} unreadable",
        pages.len(),
        unreadable
    );

    Ok(PdfTextLayer {
        text: texts.join("\n"),
        page_count: pages.len(),
    })
}
