//! Tesseract OCR backend.
//!
//! Runs the `tesseract` command-line tool on each page image.

use std::path::Path;
use std::process::Command;

use docmeta_core::capabilities::OCR_BINARY;
use docmeta_core::{Error, Result};

use super::backend::OcrBackend;

/// Tesseract OCR backend.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    language: String,
}

impl TesseractBackend {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &str {
        OCR_BINARY
    }

    fn run_ocr(&self, image_path: &Path) -> Result<String> {
        let output = Command::new(OCR_BINARY)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => Err(Error::Ocr(format!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Ocr(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
