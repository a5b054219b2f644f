//! DOCX text extraction: paragraphs of `word/document.xml` in document order.

use std::io::{Cursor, Read};

use docmeta_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from a DOCX container, one paragraph per line.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("Not a DOCX container: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| Error::Extraction(format!("{} missing: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Extraction(format!("Unreadable {}: {}", DOCUMENT_PART, e)))?;

    paragraphs_from_xml(&xml)
}

/// Walk WordprocessingML, collecting `<w:t>` runs per `<w:p>` paragraph.
///
/// Paragraphs can nest (text boxes inside a run). Each paragraph takes its
/// slot when it opens, and text goes to the innermost open paragraph, so
/// output follows the order in which paragraphs start.
fn paragraphs_from_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_text(&mut paragraphs, &open, "\t"),
                b"w:br" | b"w:cr" => push_text(&mut paragraphs, &open, "\n"),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    open.pop();
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| Error::Extraction(format!("Bad text run: {}", e)))?;
                push_text(&mut paragraphs, &open, &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Extraction(format!(
                    "Malformed {} at byte {}: {}",
                    DOCUMENT_PART,
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Append to the innermost open paragraph; text outside any paragraph is dropped.
fn push_text(paragraphs: &mut [String], open: &[usize], text: &str) {
    if let Some(&current) = open.last() {
        paragraphs[current].push_str(text);
    }
}
