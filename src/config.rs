use serde::Deserialize;
use std::sync::Arc;

use crate::ner::{SkillTaxonomy, TaxonomyError};
use crate::similarity::{TfidfParams, VectorizeError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub max_features: usize,
    pub min_ngram: usize,
    pub max_ngram: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    pub max_file_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxonomyConfig {
    /// JSON file replacing the built-in taxonomy
    pub path: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let params = TfidfParams::default();
        Self {
            max_features: params.max_features,
            min_ngram: params.ngram_range.0,
            max_ngram: params.ngram_range.1,
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let config = config::Config::builder()
            .set_default("scoring.max_features", defaults.scoring.max_features as u64)?
            .set_default("scoring.min_ngram", defaults.scoring.min_ngram as u64)?
            .set_default("scoring.max_ngram", defaults.scoring.max_ngram as u64)?
            .set_default(
                "documents.max_file_bytes",
                defaults.documents.max_file_bytes as u64,
            )?
            // Load from environment
            .add_source(
                config::Environment::default()
                    .prefix("SCANNER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("scoring: {}", e)))?;
        Ok(config)
    }

    /// Reject settings that would silently score every resume 0
    pub fn validate(&self) -> Result<(), VectorizeError> {
        self.scoring.tfidf_params().validate()
    }

    /// Load the configured taxonomy, or share the built-in one
    pub fn skill_taxonomy(&self) -> Result<Arc<SkillTaxonomy>, TaxonomyError> {
        match &self.taxonomy.path {
            Some(path) => Ok(Arc::new(SkillTaxonomy::from_file(path)?)),
            None => Ok(SkillTaxonomy::shared_default()),
        }
    }
}

impl ScoringConfig {
    pub fn tfidf_params(&self) -> TfidfParams {
        TfidfParams {
            max_features: self.max_features,
            ngram_range: (self.min_ngram, self.max_ngram),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.tfidf_params(), TfidfParams::default());
        assert_eq!(config.documents.max_file_bytes, 16 * 1024 * 1024);
        assert!(config.taxonomy.path.is_none());
    }

    #[test]
    fn test_validate_scoring() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scoring.min_ngram = 0;
        assert_eq!(
            config.validate(),
            Err(VectorizeError::InvalidNgramRange(0, 2))
        );

        config.scoring.min_ngram = 3;
        assert_eq!(
            config.validate(),
            Err(VectorizeError::InvalidNgramRange(3, 2))
        );

        config.scoring.min_ngram = 1;
        config.scoring.max_features = 0;
        assert_eq!(config.validate(), Err(VectorizeError::NoFeatures));
    }

    #[test]
    fn test_default_taxonomy_is_shared() {
        let config = Config::default();
        let a = config.skill_taxonomy().unwrap();
        let b = config.skill_taxonomy().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_missing_taxonomy_file() {
        let config = Config {
            taxonomy: TaxonomyConfig {
                path: Some("/nonexistent/taxonomy.json".to_string()),
            },
            ..Config::default()
        };
        assert!(matches!(config.skill_taxonomy(), Err(TaxonomyError::Io(_))));
    }
}
