//! External tool discovery for the OCR fallback path.

use serde::{Deserialize, Serialize};

/// Binary used to rasterize PDF pages.
pub const RASTERIZER_BINARY: &str = "pdftoppm";
/// Binary used for optical character recognition.
pub const OCR_BINARY: &str = "tesseract";

/// External tools found on `PATH` at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCapabilities {
    /// Whether `pdftoppm` (Poppler) is installed.
    pub has_rasterizer: bool,
    /// Whether `tesseract` is installed.
    pub has_ocr_engine: bool,
}

impl ToolCapabilities {
    /// Discover which external tools are installed.
    pub fn discover() -> Self {
        let caps = Self {
            has_rasterizer: Self::check_binary(RASTERIZER_BINARY),
            has_ocr_engine: Self::check_binary(OCR_BINARY),
        };
        if !caps.ocr_available() {
            tracing::warn!("{}", caps.ocr_hint());
        }
        caps
    }

    /// OCR needs both the rasterizer and the recognizer.
    pub fn ocr_available(&self) -> bool {
        self.has_rasterizer && self.has_ocr_engine
    }

    /// Describe what is missing for OCR.
    pub fn ocr_hint(&self) -> String {
        match (self.has_rasterizer, self.has_ocr_engine) {
            (true, true) => "OCR is available".to_string(),
            (false, true) => {
                "pdftoppm not found (install poppler-utils); scanned PDFs will yield empty text"
                    .to_string()
            }
            (true, false) => {
                "tesseract not found (install tesseract-ocr); scanned PDFs will yield empty text"
                    .to_string()
            }
            (false, false) => {
                "pdftoppm and tesseract not found; scanned PDFs will yield empty text".to_string()
            }
        }
    }

    fn check_binary(name: &str) -> bool {
        which::which(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_requires_both_tools() {
        let caps = ToolCapabilities {
            has_rasterizer: true,
            has_ocr_engine: false,
        };
        assert!(!caps.ocr_available());
        assert!(caps.ocr_hint().contains("tesseract"));

        let caps = ToolCapabilities {
            has_rasterizer: true,
            has_ocr_engine: true,
        };
        assert!(caps.ocr_available());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ToolCapabilities::default()).unwrap();
        assert_eq!(json["hasRasterizer"], false);
        assert_eq!(json["hasOcrEngine"], false);
    }
}
