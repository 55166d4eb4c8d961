//! Document text extraction
//!
//! Turns an uploaded file into raw text. Recognizes `.pdf` and `.txt` by
//! extension; anything else is rejected with a fixed, user-facing message
//! before any task graph is built.

use std::path::Path;

/// Fixed message for unrecognized file extensions
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file format. Please upload PDF or TXT.";

/// Document extraction failure
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Extension is neither `.pdf` nor `.txt`
    #[error("{UNSUPPORTED_FORMAT_MESSAGE}")]
    UnsupportedFormat,

    /// File could not be read
    #[error("error reading document: {0}")]
    Io(#[from] std::io::Error),

    /// PDF content could not be decoded
    #[error("error extracting document: {0}")]
    Pdf(String),
}

/// Extract raw text from a document on disk
///
/// # Errors
/// Returns [`ExtractError::UnsupportedFormat`] for unrecognized extensions,
/// and [`ExtractError::Io`] / [`ExtractError::Pdf`] for read failures.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string())),
        Some("txt") => Ok(std::fs::read_to_string(path)?),
        _ => Err(ExtractError::UnsupportedFormat),
    }
}
