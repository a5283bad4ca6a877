use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::debug;

use super::taxonomy::SkillTaxonomy;
use crate::text;

/// Matched skills per taxonomy category, in taxonomy order.
///
/// Always holds one entry per taxonomy category, empty when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSkills {
    categories: Vec<(String, Vec<String>)>,
}

impl ExtractedSkills {
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    /// Total number of matched keywords across all categories
    pub fn total(&self) -> usize {
        self.categories.iter().map(|(_, skills)| skills.len()).sum()
    }
}

impl Serialize for ExtractedSkills {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, skills) in &self.categories {
            map.serialize_entry(name, skills)?;
        }
        map.end()
    }
}

/// Skill extractor using substring matching against a static taxonomy
pub struct SkillExtractor {
    taxonomy: Arc<SkillTaxonomy>,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(SkillTaxonomy::shared_default())
    }
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Extract skills from raw resume text
    pub fn extract(&self, raw_text: &str) -> ExtractedSkills {
        extract_skills(raw_text, &self.taxonomy)
    }
}

/// Match every taxonomy keyword against the normalized text.
///
/// Matching is a plain substring test, so "java" is also found inside
/// "javascript". Keywords carrying punctuation ("c++", "asp.net") never match
/// because normalization strips it from the text.
pub fn extract_skills(raw_text: &str, taxonomy: &SkillTaxonomy) -> ExtractedSkills {
    let normalized = text::normalize(raw_text);
    debug!("Extracting skills from text ({} chars)", normalized.len());

    let categories: Vec<(String, Vec<String>)> = taxonomy
        .categories()
        .iter()
        .map(|category| {
            let found = category
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(keyword.to_lowercase().as_str()))
                .cloned()
                .collect();
            (category.name.clone(), found)
        })
        .collect();

    let result = ExtractedSkills { categories };
    debug!(
        "Extracted {} skills across {} categories",
        result.total(),
        taxonomy.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills_in(skills: &ExtractedSkills, category: &str) -> Vec<String> {
        skills.get(category).unwrap().to_vec()
    }

    #[test]
    fn test_extract_programming_languages() {
        let extractor = SkillExtractor::default();
        let skills = extractor.extract("5+ years experience in Python and Java development");

        let programming = skills_in(&skills, "programming");
        assert!(programming.contains(&"python".to_string()));
        assert!(programming.contains(&"java".to_string()));
    }

    #[test]
    fn test_substring_match_is_not_token_bounded() {
        let extractor = SkillExtractor::default();
        let skills = extractor.extract("Frontend work in JavaScript only");

        let programming = skills_in(&skills, "programming");
        assert!(programming.contains(&"javascript".to_string()));
        assert!(programming.contains(&"java".to_string()));
    }

    #[test]
    fn test_punctuated_keywords_never_match() {
        let extractor = SkillExtractor::default();
        let skills = extractor.extract("C++ and ASP.NET with scikit-learn");

        assert!(!skills_in(&skills, "programming").contains(&"c++".to_string()));
        assert!(!skills_in(&skills, "frameworks").contains(&"asp.net".to_string()));
        assert!(!skills_in(&skills, "data_science").contains(&"scikit-learn".to_string()));
    }

    #[test]
    fn test_multi_word_keywords() {
        let extractor = SkillExtractor::default();
        let skills = extractor.extract("Dashboards in Power-BI; strong Problem Solving.");

        assert_eq!(skills_in(&skills, "data_science"), vec!["power bi"]);
        assert!(skills_in(&skills, "soft_skills").contains(&"problem solving".to_string()));
    }

    #[test]
    fn test_results_follow_taxonomy_order() {
        let extractor = SkillExtractor::default();
        let skills = extractor.extract("Redis, MongoDB and MySQL");

        assert_eq!(
            skills_in(&skills, "databases"),
            vec!["mysql", "mongodb", "redis"]
        );
    }

    #[test]
    fn test_empty_text_has_every_category() {
        let taxonomy = SkillTaxonomy::default();
        let skills = extract_skills("", &taxonomy);

        let names: Vec<_> = skills.categories().collect();
        let expected: Vec<_> = taxonomy.category_names().collect();
        assert_eq!(names, expected);
        assert_eq!(skills.total(), 0);
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = SkillTaxonomy::new(vec![
            ("systems".to_string(), vec!["rust".to_string(), "zig".to_string()]),
            ("empty".to_string(), vec![]),
        ]);
        let skills = extract_skills("Trusted RUST engineer", &taxonomy);

        assert_eq!(skills_in(&skills, "systems"), vec!["rust"]);
        assert!(skills_in(&skills, "empty").is_empty());
    }

    #[test]
    fn test_serializes_in_taxonomy_order() {
        let taxonomy = SkillTaxonomy::new(vec![
            ("zeta".to_string(), vec!["rust".to_string()]),
            ("alpha".to_string(), vec!["go".to_string()]),
        ]);
        let skills = extract_skills("rust", &taxonomy);

        let json = serde_json::to_string(&skills).unwrap();
        assert_eq!(json, r#"{"zeta":["rust"],"alpha":[]}"#);
    }
}
