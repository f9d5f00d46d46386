use tracing::{debug, warn};

use crate::resume::ResumeError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts the text layer of a PDF and flattens it to a single line.
///
/// Scanned PDFs without a text layer yield `NoText`; OCR is out of scope.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ResumeError> {
    if bytes.is_empty() {
        return Err(ResumeError::Empty);
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ResumeError::NotPdf);
    }

    let raw = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!("PDF extraction failed: {e}");
        ResumeError::Extraction(e.to_string())
    })?;

    let text = flatten_text(&raw);
    if text.is_empty() {
        return Err(ResumeError::NoText);
    }

    debug!("Extracted {} chars of resume text", text.len());
    Ok(text)
}

/// Newlines become spaces and the ends are trimmed.
pub fn flatten_text(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}
