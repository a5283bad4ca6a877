use thiserror::Error;

use crate::ner::TaxonomyError;
use crate::similarity::VectorizeError;

/// Errors surfaced to the caller of a scan or analysis.
///
/// Per-document failures are not errors: those documents are skipped and
/// counted. Only input that leaves nothing to score is reported.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Job description is required")]
    EmptyJobDescription,

    #[error("Resume text is required")]
    EmptyResume,

    #[error("No resume files uploaded")]
    NoDocuments,

    #[error("No valid resumes could be processed ({skipped} skipped)")]
    NoValidResumes { skipped: usize },

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    #[error("Invalid scoring configuration: {0}")]
    InvalidScoring(#[from] VectorizeError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
