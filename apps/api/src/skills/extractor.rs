//! Résumé skill extraction — pluggable, trait-based.
//!
//! Default: `KeywordSkillExtractor`, which scans text for a catalog of known
//! skill labels. `AppState` holds an `Arc<dyn SkillExtractor>`, so a model-based
//! extractor can replace it without touching handlers.

use crate::models::skill::{Skill, SkillSet};

pub trait SkillExtractor: Send + Sync {
    fn extract(&self, text: &str) -> SkillSet;
}

/// Canonical labels recognised by the default extractor.
const DEFAULT_CATALOG: &[&str] = &[
    // Languages
    "Python",
    "JavaScript",
    "TypeScript",
    "Java",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "Kotlin",
    "Swift",
    "Scala",
    "SQL",
    // Frameworks & runtimes
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Flask",
    "FastAPI",
    "Spring",
    "TensorFlow",
    "PyTorch",
    "scikit-learn",
    "Pandas",
    "Apache Spark",
    // Data stores
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    // Tooling & platforms
    "Git",
    "Docker",
    "Kubernetes",
    "Terraform",
    "AWS",
    "Azure",
    "GCP",
    "Linux",
    "MLOps",
    // Practices
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "Data Visualization",
    "NLP",
    "Statistics",
    "Agile",
    // Soft skills
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Project Management",
];

/// Labels that double as everyday English words. These only match with the
/// catalog's exact capitalisation ("Go", not "go live").
const CASE_SENSITIVE_LABELS: &[&str] = &["Go", "Rust", "Swift", "Spring"];

/// Matches catalog labels on term boundaries.
///
/// A label matches when it appears in the text and the characters on either
/// side (if any) are not alphanumeric, so "Java" does not fire inside
/// "JavaScript" and "Go" does not fire inside "Google". Matching ignores case
/// except for `CASE_SENSITIVE_LABELS`. Output follows catalog order and
/// uses the catalog's spelling.
pub struct KeywordSkillExtractor {
    catalog: Vec<CatalogEntry>,
}

struct CatalogEntry {
    skill: Skill,
    case_sensitive: bool,
}

impl Default for KeywordSkillExtractor {
    fn default() -> Self {
        Self::with_catalog(DEFAULT_CATALOG.iter().copied())
    }
}

impl KeywordSkillExtractor {
    pub fn with_catalog<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = labels
            .into_iter()
            .map(|label| {
                let skill = Skill::new(label);
                let case_sensitive = CASE_SENSITIVE_LABELS.contains(&skill.as_str());
                CatalogEntry {
                    skill,
                    case_sensitive,
                }
            })
            .collect();
        Self { catalog }
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }
}

impl SkillExtractor for KeywordSkillExtractor {
    fn extract(&self, text: &str) -> SkillSet {
        let lowered = text.to_lowercase();
        self.catalog
            .iter()
            .filter(|entry| {
                if entry.case_sensitive {
                    contains_term(text, entry.skill.as_str())
                } else {
                    contains_term(&lowered, &entry.skill.as_str().to_lowercase())
                }
            })
            .map(|entry| entry.skill.clone())
            .collect()
    }
}

/// `haystack` and `term` must share the same casing.
fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_canonical_labels_case_insensitively() {
        let extractor = KeywordSkillExtractor::default();
        let skills = extractor.extract("Built pipelines in PYTHON with docker and sql.");
        assert_eq!(skills.labels(), vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_respects_term_boundaries() {
        let extractor = KeywordSkillExtractor::default();
        let skills = extractor.extract("Senior JavaScript developer, ex-Google.");
        assert_eq!(skills.labels(), vec!["JavaScript"]);
    }

    #[test]
    fn test_symbolic_labels_match() {
        let extractor = KeywordSkillExtractor::default();
        let skills = extractor.extract("Services in Node.js and C++; some C# tooling.");
        assert_eq!(skills.labels(), vec!["C++", "C#", "Node.js"]);
    }

    #[test]
    fn test_multi_word_labels_match() {
        let extractor = KeywordSkillExtractor::default();
        let skills =
            extractor.extract("Strong problem solving and machine learning background");
        assert_eq!(skills.labels(), vec!["Machine Learning", "Problem Solving"]);
    }

    #[test]
    fn test_common_words_do_not_match() {
        let extractor = KeywordSkillExtractor::default();
        let skills = extractor.extract(
            "Ready to go live in spring; led R&D to rust-proof a swift rollout.",
        );
        assert!(skills.is_empty(), "{:?}", skills.labels());
    }

    #[test]
    fn test_capitalised_short_labels_still_match() {
        let extractor = KeywordSkillExtractor::default();
        let skills = extractor.extract("Backend services in Go and Rust, iOS apps in Swift.");
        assert_eq!(skills.labels(), vec!["Go", "Rust", "Swift"]);
    }

    #[test]
    fn test_no_matches_yields_empty_set() {
        let extractor = KeywordSkillExtractor::default();
        assert!(extractor.extract("Enjoys hiking and woodworking").is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        let extractor = KeywordSkillExtractor::with_catalog(["Elixir", "Phoenix"]);
        assert_eq!(extractor.catalog_len(), 2);
        assert_eq!(
            extractor.extract("phoenix LiveView on elixir").labels(),
            vec!["Elixir", "Phoenix"]
        );
    }
}
