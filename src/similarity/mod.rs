mod stop_words;
mod tfidf;

pub use stop_words::is_stop_word;
pub use tfidf::{TfidfModel, TfidfParams, VectorizeError};

use tracing::debug;

use crate::text;

/// Scores a resume against a job description with TF-IDF cosine similarity.
///
/// The vector space is fitted on exactly the two documents being compared,
/// so IDF weights come from a two-document universe and scores are only
/// comparable within one job description.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    params: TfidfParams,
}

impl SimilarityScorer {
    pub fn new(params: TfidfParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TfidfParams {
        &self.params
    }

    /// Similarity in [0, 1]. Degenerate input scores 0.0.
    pub fn score(&self, resume_text: &str, job_description: &str) -> f64 {
        let resume = text::normalize(resume_text);
        let job = text::normalize(job_description);

        if resume.is_empty() || job.is_empty() {
            debug!("Empty document after normalization, scoring 0.0");
            return 0.0;
        }

        match TfidfModel::fit_transform(&[resume.as_str(), job.as_str()], &self.params) {
            Ok(model) => model.cosine(0, 1),
            Err(e) => {
                debug!("Vectorization failed ({}), scoring 0.0", e);
                0.0
            }
        }
    }
}

/// Score with the default vectorizer parameters
pub fn score(resume_text: &str, job_description: &str) -> f64 {
    SimilarityScorer::default().score(resume_text, job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Backend engineer: Rust, Tokio, PostgreSQL. Build distributed services.";

    #[test]
    fn test_empty_documents_score_zero() {
        assert_eq!(score("", JOB), 0.0);
        assert_eq!(score(JOB, ""), 0.0);
        assert_eq!(score("!!!", "???"), 0.0);
    }

    #[test]
    fn test_stop_words_only_score_zero() {
        assert_eq!(score("the and of", "which whereas"), 0.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        assert_eq!(score("rust tokio axum", "watercolor painting gallery"), 0.0);
    }

    #[test]
    fn test_self_similarity_is_maximal() {
        let same = score(JOB, JOB);
        assert!((same - 1.0).abs() < 1e-9);

        let unrelated = score(JOB, "watercolor painting gallery curator");
        assert!(same >= unrelated);
    }

    #[test]
    fn test_related_text_scores_between() {
        let s = score(
            "Rust developer with Tokio and PostgreSQL experience",
            JOB,
        );
        assert!(s > 0.0 && s < 1.0, "score was {}", s);
    }

    #[test]
    fn test_closer_resume_scores_higher() {
        let close = score("Rust Tokio PostgreSQL distributed services engineer", JOB);
        let far = score("Rust hobbyist, mostly gardening", JOB);
        assert!(close > far);
    }

    #[test]
    fn test_is_case_and_punctuation_insensitive() {
        let a = score("RUST, Tokio!", "rust tokio");
        assert!((a - 1.0).abs() < 1e-9);
    }
}
