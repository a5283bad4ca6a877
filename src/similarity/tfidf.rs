use ndarray::Array1;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use super::stop_words::is_stop_word;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("empty vocabulary; documents contain only stop words or nothing at all")]
    EmptyVocabulary,

    #[error("invalid n-gram range ({0}, {1})")]
    InvalidNgramRange(usize, usize),

    #[error("max_features must be at least 1")]
    NoFeatures,
}

/// Vectorizer parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfidfParams {
    /// Keep only the most frequent terms across the corpus
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_features: 1000,
            ngram_range: (1, 2),
        }
    }
}

/// TF-IDF model fitted over a small in-memory corpus.
///
/// Rows are L2-normalized so the cosine of two rows is their dot product.
#[derive(Debug)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
    rows: Vec<Array1<f64>>,
}

impl TfidfParams {
    /// n-grams need `1 <= min <= max` and at least one kept term
    pub fn validate(&self) -> Result<(), VectorizeError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(VectorizeError::InvalidNgramRange(min_n, max_n));
        }
        if self.max_features == 0 {
            return Err(VectorizeError::NoFeatures);
        }
        Ok(())
    }
}

impl TfidfModel {
    pub fn fit_transform(
        documents: &[&str],
        params: &TfidfParams,
    ) -> Result<Self, VectorizeError> {
        params.validate()?;
        let (min_n, max_n) = params.ngram_range;

        let term_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| count_terms(doc, min_n, max_n))
            .collect();

        let vocabulary = build_vocabulary(&term_counts, params.max_features);
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        // smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len() as f64;
        let mut idf = Array1::<f64>::zeros(vocabulary.len());
        for (term, &index) in &vocabulary {
            let df = term_counts.iter().filter(|c| c.contains_key(term)).count() as f64;
            idf[index] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }

        let rows = term_counts
            .iter()
            .map(|counts| {
                let mut row = Array1::<f64>::zeros(vocabulary.len());
                for (term, &count) in counts {
                    if let Some(&index) = vocabulary.get(term) {
                        row[index] = count as f64;
                    }
                }
                row *= &idf;
                l2_normalize(&mut row);
                row
            })
            .collect();

        debug!(
            "Fitted TF-IDF over {} documents ({} terms)",
            documents.len(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary,
            idf,
            rows,
        })
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    pub fn row(&self, index: usize) -> Option<&Array1<f64>> {
        self.rows.get(index)
    }

    /// Cosine similarity between two fitted rows; 0.0 when either is all zeros
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        match (self.rows.get(a), self.rows.get(b)) {
            (Some(a), Some(b)) => a.dot(b).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

/// Whitespace tokens of two or more characters, stop words removed
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .collect()
}

fn count_terms(text: &str, min_n: usize, max_n: usize) -> HashMap<String, usize> {
    let tokens = tokenize(text);
    let mut counts = HashMap::new();

    for n in min_n..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }

    counts
}

/// Keep the `max_features` terms with the highest corpus count.
/// Ties go to the alphabetically smaller term; indices are assigned
/// in alphabetical order.
fn build_vocabulary(
    term_counts: &[HashMap<String, usize>],
    max_features: usize,
) -> BTreeMap<String, usize> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for counts in term_counts {
        for (term, &count) in counts {
            *totals.entry(term.as_str()).or_insert(0) += count;
        }
    }

    let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
    // stable sort keeps alphabetical order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(max_features);

    let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
    kept.sort_unstable();

    kept.into_iter()
        .enumerate()
        .map(|(index, term)| (term.to_string(), index))
        .collect()
}

fn l2_normalize(row: &mut Array1<f64>) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.mapv_inplace(|x| x / norm);
    }
}
