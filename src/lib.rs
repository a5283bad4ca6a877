//! Resume scanning: skill, contact and experience extraction plus
//! TF-IDF similarity ranking of resumes against a job description.

pub mod config;
pub mod document;
pub mod error;
pub mod ner;
pub mod ranking;
pub mod scanner;
pub mod similarity;
pub mod text;

pub use error::ScanError;
pub use ranking::{Candidate, CandidateRanker};
pub use scanner::{AnalysisReport, ResumeScanner, ScanReport, Upload};
pub use similarity::SimilarityScorer;
