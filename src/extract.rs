//! Text extraction collaborators: turn source bytes into statement text.

use crate::errors::{Result, StatementError};
use tracing::{debug, warn};

/// Anything that can produce statement text from raw bytes.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Pulls the embedded text layer out of a PDF via `pdf-extract`.
///
/// Scanned PDFs without a text layer come back (nearly) empty; that is not an
/// extraction error, the pipeline rejects them as unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(StatementError::Extraction("no PDF received".into()));
        }
        match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => {
                debug!(bytes = bytes.len(), chars = text.chars().count(), "pdf text extracted");
                Ok(text)
            }
            Err(e) => {
                warn!(bytes = bytes.len(), %e, "pdf extraction failed");
                Err(StatementError::Extraction(e.to_string()))
            }
        }
    }
}

/// Passthrough for input that is already text (e.g. `pdftotext` output).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(StatementError::Extraction("no text received".into()));
        }
        String::from_utf8(bytes.to_vec())
            .map_err(|e| StatementError::Extraction(format!("input is not UTF-8: {e}")))
    }
}
