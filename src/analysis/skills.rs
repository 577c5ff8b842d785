//! Skill extraction against the fixed taxonomy
//!
//! Each taxonomy category owns an ordered token list. A token matches when it
//! appears in the JD as a whole word, ignoring case.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skills emitted when the JD matches nothing in the taxonomy
pub const FALLBACK_SKILLS: [&str; 4] = [
    "Communication",
    "Problem solving",
    "Basic coding",
    "Projects",
];

/// Category of the skill taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkillCategory {
    CoreCs,
    Languages,
    Web,
    Data,
    Cloud,
    Testing,
    /// Fallback bucket, never matched against text
    Other,
}

impl SkillCategory {
    /// Every category in declaration order
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
        SkillCategory::Other,
    ];

    /// Categories that take part in text matching
    pub const TAXONOMY: [SkillCategory; 6] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
    ];

    /// Canonical tokens for this category, in declared order
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            SkillCategory::CoreCs => &["DSA", "OOP", "DBMS", "OS", "Networks"],
            SkillCategory::Languages => &[
                "Java",
                "Python",
                "JavaScript",
                "TypeScript",
                "C",
                "C++",
                "C#",
                "Go",
            ],
            SkillCategory::Web => &["React", "Next.js", "Node.js", "Express", "REST", "GraphQL"],
            SkillCategory::Data => &["SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis"],
            SkillCategory::Cloud => &[
                "AWS",
                "Azure",
                "GCP",
                "Docker",
                "Kubernetes",
                "CI/CD",
                "Linux",
            ],
            SkillCategory::Testing => &["Selenium", "Cypress", "Playwright", "JUnit", "Pytest"],
            SkillCategory::Other => &[],
        }
    }

    /// Key used in persisted records
    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "coreCS",
            SkillCategory::Languages => "languages",
            SkillCategory::Web => "web",
            SkillCategory::Data => "data",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Testing => "testing",
            SkillCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::Cloud => "Cloud/DevOps",
            SkillCategory::Testing => "Testing",
            SkillCategory::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Skills found in a JD, grouped by category
///
/// Categories with no skills are left out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    #[serde(rename = "coreCS", default, skip_serializing_if = "Vec::is_empty")]
    pub core_cs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cloud: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub testing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

impl ExtractedSkills {
    /// Skills recorded for a category
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::CoreCs => &self.core_cs,
            SkillCategory::Languages => &self.languages,
            SkillCategory::Web => &self.web,
            SkillCategory::Data => &self.data,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Testing => &self.testing,
            SkillCategory::Other => &self.other,
        }
    }

    fn slot_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::CoreCs => &mut self.core_cs,
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Web => &mut self.web,
            SkillCategory::Data => &mut self.data,
            SkillCategory::Cloud => &mut self.cloud,
            SkillCategory::Testing => &mut self.testing,
            SkillCategory::Other => &mut self.other,
        }
    }

    /// Non-empty categories with their skills, in declaration order
    pub fn non_empty(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        SkillCategory::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, skills)| !skills.is_empty())
    }

    /// Every skill, category by category
    pub fn flatten(&self) -> Vec<&str> {
        self.non_empty()
            .flat_map(|(_, skills)| skills.iter().map(String::as_str))
            .collect()
    }

    /// Check whether no category holds a skill
    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }
}

/// Result of running the extractor over a JD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillExtraction {
    pub skills: ExtractedSkills,
    /// Taxonomy categories with at least one match (the fallback never counts)
    pub detected_categories: usize,
}

struct TokenMatcher {
    category: SkillCategory,
    token: &'static str,
    pattern: Regex,
}

static MATCHERS: Lazy<Vec<TokenMatcher>> = Lazy::new(|| {
    SkillCategory::TAXONOMY
        .into_iter()
        .flat_map(|category| {
            category.tokens().iter().filter_map(move |&token| {
                let source = format!(r"(?i)\b{}\b", regex::escape(token));
                match Regex::new(&source) {
                    Ok(pattern) => Some(TokenMatcher {
                        category,
                        token,
                        pattern,
                    }),
                    Err(e) => {
                        tracing::warn!("Skipping taxonomy token {:?}: {}", token, e);
                        None
                    }
                }
            })
        })
        .collect()
});

/// Classify JD text against the skill taxonomy
pub fn extract_skills(jd_text: &str) -> SkillExtraction {
    let mut skills = ExtractedSkills::default();

    for matcher in MATCHERS.iter() {
        if matcher.pattern.is_match(jd_text) {
            skills
                .slot_mut(matcher.category)
                .push(matcher.token.to_string());
        }
    }

    let detected_categories = SkillCategory::TAXONOMY
        .iter()
        .filter(|c| !skills.get(**c).is_empty())
        .count();

    if skills.is_empty() {
        skills.other = FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    tracing::debug!(
        "Extracted {} skills across {} categories",
        skills.flatten().len(),
        detected_categories
    );

    SkillExtraction {
        skills,
        detected_categories,
    }
}
