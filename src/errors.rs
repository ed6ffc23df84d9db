//! Error kinds a parse request can end with, plus a `Result` alias.
//!
//! Both variants are terminal for the request. Malformed statement lines are
//! never errors; they are dropped by the classifier.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// No text could be obtained from the source bytes.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Text was obtained but is too short to hold a statement table
    /// (typically a scanned PDF with no text layer).
    #[error("PDF text not readable or scanned ({chars} chars, need at least {min})")]
    UnreadableSource { chars: usize, min: usize },
}

pub type Result<T> = std::result::Result<T, StatementError>;
