use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Taxonomy has no categories")]
    Empty,

    #[error("Duplicate taxonomy category: {0}")]
    DuplicateCategory(String),
}

/// A skill category and its keywords, in lookup order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Immutable category -> keywords lookup table used for skill detection.
///
/// Categories and keywords keep their declaration order; that order is also
/// the order of every [`super::ExtractedSkills`] built from this taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
}

static PROGRAMMING: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "php", "ruby", "go",
    "swift", "kotlin", "scala", "r", "matlab", "sql", "html", "css",
    "typescript", "dart", "perl", "bash", "powershell",
];

static FRAMEWORKS: &[&str] = &[
    "react", "angular", "vue", "django", "flask", "spring", "nodejs",
    "express", "laravel", "rails", "asp.net", "tensorflow", "pytorch",
    "keras", "fastapi", "nextjs", "nuxt", "svelte", "bootstrap",
];

static DATABASES: &[&str] = &[
    "mysql", "postgresql", "mongodb", "redis", "elasticsearch",
    "oracle", "sqlite", "cassandra", "dynamodb", "firebase",
    "mariadb", "neo4j", "influxdb", "couchdb",
];

static CLOUD_TOOLS: &[&str] = &[
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins",
    "git", "github", "gitlab", "bitbucket", "terraform", "ansible",
    "vagrant", "circleci", "travis", "heroku", "netlify",
];

static OPERATING_SYSTEMS: &[&str] = &[
    "linux", "ubuntu", "centos", "redhat", "windows", "macos",
    "unix", "debian", "fedora", "arch",
];

static DATA_SCIENCE: &[&str] = &[
    "pandas", "numpy", "scikit-learn", "matplotlib", "seaborn",
    "plotly", "jupyter", "tableau", "power bi", "spark", "hadoop",
    "kafka", "airflow", "mlflow",
];

static SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving",
    "analytical", "creative", "adaptable", "organized", "management",
    "collaboration", "presentation", "negotiation", "mentoring",
];

static DEFAULT_TAXONOMY: Lazy<Arc<SkillTaxonomy>> = Lazy::new(|| {
    let categories: [(&str, &[&str]); 7] = [
        ("programming", PROGRAMMING),
        ("frameworks", FRAMEWORKS),
        ("databases", DATABASES),
        ("cloud_tools", CLOUD_TOOLS),
        ("operating_systems", OPERATING_SYSTEMS),
        ("data_science", DATA_SCIENCE),
        ("soft_skills", SOFT_SKILLS),
    ];

    Arc::new(SkillTaxonomy::new(categories.iter().map(|(name, keywords)| {
        (
            name.to_string(),
            keywords.iter().map(|k| k.to_string()).collect(),
        )
    })))
});

impl Default for SkillTaxonomy {
    fn default() -> Self {
        DEFAULT_TAXONOMY.as_ref().clone()
    }
}

impl SkillTaxonomy {
    pub fn new<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, keywords)| SkillCategory { name, keywords })
                .collect(),
        }
    }

    /// Shared handle to the built-in taxonomy
    pub fn shared_default() -> Arc<SkillTaxonomy> {
        Arc::clone(&DEFAULT_TAXONOMY)
    }

    /// Load a taxonomy from a JSON object of `category -> [keywords]`.
    /// Categories keep the order they appear in the file.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let raw: OrderedCategories = serde_json::from_str(json)?;
        if raw.0.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        let mut seen = HashSet::new();
        if let Some((name, _)) = raw.0.iter().find(|(name, _)| !seen.insert(name.as_str())) {
            return Err(TaxonomyError::DuplicateCategory(name.clone()));
        }
        Ok(Self::new(raw.0))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let taxonomy = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            "Loaded skill taxonomy from {:?} ({} categories)",
            path,
            taxonomy.categories.len()
        );
        Ok(taxonomy)
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// JSON object deserialized as a list so that key order survives
struct OrderedCategories(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for OrderedCategories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = OrderedCategories;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object mapping category names to keyword lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut categories = Vec::new();
                while let Some((name, keywords)) = map.next_entry::<String, Vec<String>>()? {
                    categories.push((name, keywords));
                }
                Ok(OrderedCategories(categories))
            }
        }

        deserializer.deserialize_map(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let taxonomy = SkillTaxonomy::default();
        let names: Vec<_> = taxonomy.category_names().collect();
        assert_eq!(
            names,
            vec![
                "programming",
                "frameworks",
                "databases",
                "cloud_tools",
                "operating_systems",
                "data_science",
                "soft_skills",
            ]
        );
        assert_eq!(taxonomy.categories()[0].keywords[0], "python");
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let taxonomy =
            SkillTaxonomy::from_json(r#"{"zeta": ["rust"], "alpha": ["go", "elixir"]}"#).unwrap();
        let names: Vec<_> = taxonomy.category_names().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(taxonomy.categories()[1].keywords, vec!["go", "elixir"]);
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(matches!(
            SkillTaxonomy::from_json("{}"),
            Err(TaxonomyError::Empty)
        ));
        assert!(matches!(
            SkillTaxonomy::from_json("[1, 2]"),
            Err(TaxonomyError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicate_category() {
        let json = r#"{"lang": ["rust"], "tools": ["git"], "lang": ["go"]}"#;
        match SkillTaxonomy::from_json(json) {
            Err(TaxonomyError::DuplicateCategory(name)) => assert_eq!(name, "lang"),
            other => panic!("expected duplicate category error, got {:?}", other),
        }
    }
}
