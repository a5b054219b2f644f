//! PDF-to-image conversion for OCR.

use std::path::{Path, PathBuf};
use std::process::Command;

use docmeta_core::capabilities::RASTERIZER_BINARY;
use docmeta_core::{Error, Result};

/// Output file prefix passed to pdftoppm.
const PAGE_PREFIX: &str = "page";

/// Rasterize every page of a PDF into PNG files inside `output_dir`.
///
/// Returns the image paths in page order.
pub fn pdf_to_images(pdf_path: &Path, dpi: u32, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let output = Command::new(RASTERIZER_BINARY)
        .args(["-png", "-r", &dpi.to_string()])
        .arg(pdf_path)
        .arg(output_dir.join(PAGE_PREFIX))
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let images = collect_page_images(output_dir)?;
            if images.is_empty() {
                Err(Error::Ocr(format!(
                    "{} produced no images for {}",
                    RASTERIZER_BINARY,
                    pdf_path.display()
                )))
            } else {
                Ok(images)
            }
        }
        Ok(out) => Err(Error::Ocr(format!(
            "{} failed: {}",
            RASTERIZER_BINARY,
            String::from_utf8_lossy(&out.stderr).trim()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Ocr(format!(
            "{} not found (install poppler-utils)",
            RASTERIZER_BINARY
        ))),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Find `page-N.png` files and sort them numerically.
///
/// pdftoppm zero-pads page numbers to the width of the page count
/// (page-1.png, page-01.png, page-001.png), so sort on the parsed number.
pub fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let number = page_number(&path)?;
            Some((number, path))
        })
        .collect();
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_sorts_numerically() {
        let temp = TempDir::new().unwrap();
        for name in ["page-10.png", "page-02.png", "page-1.png", "notes.txt", "page-x.png"] {
            std::fs::write(temp.path().join(name), b"fake png").unwrap();
        }

        let images = collect_page_images(temp.path()).unwrap();
        let names: Vec<String> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-02.png", "page-10.png"]);
    }

    #[test]
    fn test_collect_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(collect_page_images(temp.path()).unwrap().is_empty());
    }
}
