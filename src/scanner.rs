use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::{self, DocumentError, DocumentKind, DocumentTextExtractor, TextExtractor};
use crate::error::{Result, ScanError};
use crate::ner::{self, ContactInfo, ExtractedSkills, SkillTaxonomy};
use crate::ranking::{self, Candidate, CandidateRanker};
use crate::similarity::SimilarityScorer;

/// A named document handed to the scanner
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of ranking a batch of resumes
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub ranked_candidates: Vec<Candidate>,
    pub total_candidates: usize,
    pub processed_files: usize,
    pub skipped_files: usize,
}

/// Result of analyzing one resume text
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub similarity_score: f64,
    pub percentage_match: f64,
    pub skills: ExtractedSkills,
    pub contact_info: ContactInfo,
    pub experience_years: u32,
}

/// Why a single upload did not become a candidate
#[derive(Debug)]
enum Skip {
    Unsupported,
    Failed(DocumentError),
    NoText,
}

pub struct ResumeScanner {
    taxonomy: Arc<SkillTaxonomy>,
    extractor: Arc<dyn TextExtractor>,
    ranker: CandidateRanker,
    scorer: SimilarityScorer,
    max_file_bytes: usize,
}

impl Default for ResumeScanner {
    fn default() -> Self {
        Self::new(
            SkillTaxonomy::shared_default(),
            Arc::new(DocumentTextExtractor),
            SimilarityScorer::default(),
        )
    }
}

impl ResumeScanner {
    pub fn new(
        taxonomy: Arc<SkillTaxonomy>,
        extractor: Arc<dyn TextExtractor>,
        scorer: SimilarityScorer,
    ) -> Self {
        Self {
            taxonomy,
            extractor,
            ranker: CandidateRanker::new(scorer),
            scorer,
            max_file_bytes: usize::MAX,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let taxonomy = config.skill_taxonomy()?;
        let scorer = SimilarityScorer::new(config.scoring.tfidf_params());
        Ok(Self::new(taxonomy, Arc::new(DocumentTextExtractor), scorer)
            .with_max_file_bytes(config.documents.max_file_bytes))
    }

    pub fn with_max_file_bytes(mut self, limit: usize) -> Self {
        self.max_file_bytes = limit;
        self
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Extract, score and rank a batch of uploaded resumes.
    ///
    /// Each upload is decoded on the blocking pool. Unsupported or unreadable
    /// documents are skipped; the scan fails only when nothing is left.
    pub async fn scan(&self, uploads: Vec<Upload>, job_description: &str) -> Result<ScanReport> {
        if job_description.trim().is_empty() {
            return Err(ScanError::EmptyJobDescription);
        }
        if uploads.is_empty() {
            return Err(ScanError::NoDocuments);
        }

        let start = Instant::now();
        let total = uploads.len();
        info!("Scanning {} uploaded files", total);

        let tasks = uploads.into_iter().map(|upload| {
            let taxonomy = Arc::clone(&self.taxonomy);
            let extractor = Arc::clone(&self.extractor);
            let limit = self.max_file_bytes;
            let filename = upload.filename.clone();
            let handle = tokio::task::spawn_blocking(move || {
                build_candidate(upload, extractor.as_ref(), &taxonomy, limit)
            });
            async move { (filename, handle.await) }
        });

        // join_all keeps upload order regardless of completion order
        let mut candidates = Vec::with_capacity(total);
        for (filename, joined) in futures::future::join_all(tasks).await {
            let built = match joined {
                Ok(built) => built,
                Err(e) => {
                    warn!("Skipping {}: extraction task failed: {}", filename, e);
                    continue;
                }
            };
            match built {
                Ok(candidate) => candidates.push(candidate),
                Err(Skip::Unsupported) => debug!("Skipping unsupported file {}", filename),
                Err(Skip::Failed(e)) => warn!("Skipping {}: {}", filename, e),
                Err(Skip::NoText) => warn!("Skipping {}: no usable text", filename),
            }
        }

        let processed_files = candidates.len();
        let skipped_files = total - processed_files;
        if candidates.is_empty() {
            return Err(ScanError::NoValidResumes {
                skipped: skipped_files,
            });
        }

        let ranked_candidates = self.ranker.rank(candidates, job_description);

        info!(
            "Scan complete: {} processed, {} skipped in {:?}",
            processed_files,
            skipped_files,
            start.elapsed()
        );

        Ok(ScanReport {
            total_candidates: ranked_candidates.len(),
            ranked_candidates,
            processed_files,
            skipped_files,
        })
    }

    /// Score already-extracted resume texts, skipping empty or error texts
    pub fn scan_texts(
        &self,
        resumes: Vec<(String, String)>,
        job_description: &str,
    ) -> Result<ScanReport> {
        if job_description.trim().is_empty() {
            return Err(ScanError::EmptyJobDescription);
        }
        if resumes.is_empty() {
            return Err(ScanError::NoDocuments);
        }

        let total = resumes.len();
        let candidates: Vec<Candidate> = resumes
            .into_iter()
            .filter_map(|(filename, text)| {
                let text = document::usable_text(text)?;
                let signals = ner::extract_signals(&text, &self.taxonomy);
                Some(Candidate::new(filename, text, signals))
            })
            .collect();

        let processed_files = candidates.len();
        if candidates.is_empty() {
            return Err(ScanError::NoValidResumes { skipped: total });
        }

        let ranked_candidates = self.ranker.rank(candidates, job_description);
        Ok(ScanReport {
            total_candidates: ranked_candidates.len(),
            ranked_candidates,
            processed_files,
            skipped_files: total - processed_files,
        })
    }

    /// Analyze a single resume text against a job description, without ranking
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> Result<AnalysisReport> {
        if job_description.trim().is_empty() {
            return Err(ScanError::EmptyJobDescription);
        }
        if resume_text.trim().is_empty() {
            return Err(ScanError::EmptyResume);
        }

        let signals = ner::extract_signals(resume_text, &self.taxonomy);
        let similarity_score = self.scorer.score(resume_text, job_description);

        Ok(AnalysisReport {
            similarity_score,
            percentage_match: ranking::percentage(similarity_score),
            skills: signals.skills,
            contact_info: signals.contact_info,
            experience_years: signals.experience_years,
        })
    }
}

fn build_candidate(
    upload: Upload,
    extractor: &dyn TextExtractor,
    taxonomy: &SkillTaxonomy,
    max_file_bytes: usize,
) -> std::result::Result<Candidate, Skip> {
    let kind = DocumentKind::from_filename(&upload.filename).ok_or(Skip::Unsupported)?;

    if upload.bytes.len() > max_file_bytes {
        return Err(Skip::Failed(DocumentError::TooLarge {
            size: upload.bytes.len(),
            limit: max_file_bytes,
        }));
    }

    let text = extractor
        .extract(&upload.bytes, kind)
        .map_err(Skip::Failed)?;
    let text = document::usable_text(text).ok_or(Skip::NoText)?;

    let signals = ner::extract_signals(&text, taxonomy);
    Ok(Candidate::new(upload.filename, text, signals))
}
