mod docx;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Prefix used by extractors that report failures in-band
pub const ERROR_SENTINEL: &str = "Error";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
}

/// Document formats that can be turned into plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the kind from a file name extension, case-insensitively
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
        }
    }
}

/// Turns raw document bytes into plain text.
///
/// Implementations must be shareable across blocking worker threads.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, DocumentError>;
}

/// Default extractor: `pdf-extract` for PDF, the DOCX body XML for DOCX
#[derive(Debug, Clone, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, DocumentError> {
        debug!("Extracting text from {} ({} bytes)", kind, bytes.len());
        match kind {
            DocumentKind::Pdf => extract_pdf(bytes),
            DocumentKind::Docx => docx::extract_text(bytes),
        }
    }
}

// pdf-extract panics on some malformed fonts and streams
fn extract_pdf(bytes: &[u8]) -> Result<String, DocumentError> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(result) => result.map_err(|e| DocumentError::Pdf(e.to_string())),
        Err(_) => Err(DocumentError::Pdf("decoder panicked".to_string())),
    }
}

/// True when extracted text carries an in-band error instead of content
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_SENTINEL)
}

/// Text usable for scoring: non-empty and not an error sentinel
pub fn usable_text(text: String) -> Option<String> {
    if text.is_empty() || is_error_text(&text) {
        None
    } else {
        Some(text)
    }
}
