use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::ner::{ContactInfo, ExtractedSkills, ResumeSignals};
use crate::similarity::SimilarityScorer;

/// One resume in a ranking batch.
///
/// The resume text is kept only for scoring and is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub filename: String,
    #[serde(skip)]
    pub resume_text: String,
    pub skills: ExtractedSkills,
    pub contact_info: ContactInfo,
    pub experience_years: u32,
    pub similarity_score: f64,
    pub percentage_match: f64,
}

impl Candidate {
    pub fn new(
        filename: impl Into<String>,
        resume_text: impl Into<String>,
        signals: ResumeSignals,
    ) -> Self {
        Self {
            filename: filename.into(),
            resume_text: resume_text.into(),
            skills: signals.skills,
            contact_info: signals.contact_info,
            experience_years: signals.experience_years,
            similarity_score: 0.0,
            percentage_match: 0.0,
        }
    }

    fn set_score(&mut self, score: f64) {
        self.similarity_score = score;
        self.percentage_match = percentage(score);
    }
}

/// `score * 100`, rounded to two decimals
pub fn percentage(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

/// Scores candidates against one job description and orders them
#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    scorer: SimilarityScorer,
}

impl CandidateRanker {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Score every candidate and sort by similarity, best first.
    /// Equal scores keep their input order.
    pub fn rank(&self, mut candidates: Vec<Candidate>, job_description: &str) -> Vec<Candidate> {
        for candidate in candidates.iter_mut() {
            let score = self.scorer.score(&candidate.resume_text, job_description);
            debug!("Scored {}: {:.4}", candidate.filename, score);
            candidate.set_score(score);
        }

        sort_by_score(&mut candidates);

        if let Some(top) = candidates.first() {
            info!(
                "Ranked {} candidates, top match {} ({}%)",
                candidates.len(),
                top.filename,
                top.percentage_match
            );
        }

        candidates
    }
}

/// Stable descending sort on `similarity_score`
pub fn sort_by_score(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// Rank with default scoring parameters
pub fn rank(candidates: Vec<Candidate>, job_description: &str) -> Vec<Candidate> {
    CandidateRanker::default().rank(candidates, job_description)
}
