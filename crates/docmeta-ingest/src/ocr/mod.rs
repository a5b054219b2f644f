//! OCR fallback for PDFs without a usable text layer.
//!
//! Pages are rasterized with `pdftoppm` (Poppler) and recognized with
//! `tesseract`. Both run as subprocesses; the `OcrBackend` trait keeps
//! the recognizer swappable.

pub mod backend;
pub mod rasterize;
pub mod tesseract;

pub use backend::{OcrBackend, OcrOutput};
pub use tesseract::TesseractBackend;

use std::sync::Arc;

use docmeta_core::{OcrSettings, ToolCapabilities};

/// Create the OCR backend if the configuration and installed tools allow it.
pub fn create_ocr_backend(
    settings: &OcrSettings,
    tools: &ToolCapabilities,
) -> Option<Arc<dyn OcrBackend>> {
    if !settings.enabled {
        tracing::info!("OCR fallback disabled by configuration.");
        return None;
    }
    if !tools.ocr_available() {
        tracing::warn!("OCR fallback unavailable: {}", tools.ocr_hint());
        return None;
    }
    tracing::info!(
        "Using tesseract OCR fallback (lang={}, dpi={})",
        settings.language,
        settings.dpi
    );
    Some(Arc::new(TesseractBackend::new(&settings.language)))
}
