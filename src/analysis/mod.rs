//! Job description analysis engine
//!
//! This module turns a submitted (company, role, JD) triple into a complete
//! analysis record:
//! - Skill extraction against the fixed taxonomy
//! - Company profile heuristics
//! - Interview rounds, seven-day plan and question bank
//! - Readiness scoring

mod company;
mod plan;
mod questions;
mod score;
mod skills;

pub use company::{is_enterprise, profile_company, CompanyIntel, ENTERPRISE_COMPANIES};
pub use plan::{
    derive_checklist, generate_rounds, generate_seven_day_plan, InterviewRound, PlanDay,
    RoundChecklist,
};
pub use questions::{generate_questions, question_for, MAX_QUESTIONS};
pub use score::{
    base_score, final_score, toggle_confidence, Confidence, ConfidenceMap, MAX_SCORE, MIN_SCORE,
};
pub use skills::{extract_skills, ExtractedSkills, SkillCategory, SkillExtraction, FALLBACK_SKILLS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default length below which a JD is flagged as too short to analyse well
pub const DEFAULT_SHORT_JD_THRESHOLD: usize = 200;

/// Number of weak skills surfaced as the next focus
const WEAK_SKILL_HINTS: usize = 3;

/// A complete analysis of one submitted job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Unique identifier
    pub id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Changes only when confidence is toggled
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    pub jd_text: String,
    #[serde(default)]
    pub extracted_skills: ExtractedSkills,
    #[serde(default)]
    pub round_mapping: Vec<InterviewRound>,
    /// Derived from `round_mapping` at creation
    #[serde(default)]
    pub checklist: Vec<RoundChecklist>,
    #[serde(default, rename = "plan7Days")]
    pub plan_7_days: Vec<PlanDay>,
    #[serde(default)]
    pub questions: Vec<String>,
    /// Never changes after creation
    #[serde(default)]
    pub base_score: u32,
    #[serde(default)]
    pub final_score: u32,
    #[serde(default)]
    pub skill_confidence_map: ConfidenceMap,
    #[serde(default)]
    pub company_intel: CompanyIntel,
}

impl AnalysisRecord {
    /// Flip one skill's confidence and recompute the final score
    pub fn toggle_skill(&mut self, skill: &str) -> Confidence {
        self.final_score =
            toggle_confidence(self.base_score, &mut self.skill_confidence_map, skill);
        self.confidence_of(skill)
    }

    /// Confidence recorded for a skill (`practice` when absent)
    pub fn confidence_of(&self, skill: &str) -> Confidence {
        self.skill_confidence_map
            .get(skill)
            .copied()
            .unwrap_or_default()
    }

    /// First few extracted skills still marked for practice
    pub fn weak_skills(&self) -> Vec<&str> {
        self.extracted_skills
            .flatten()
            .into_iter()
            .filter(|s| self.skill_confidence_map.get(*s) == Some(&Confidence::Practice))
            .take(WEAK_SKILL_HINTS)
            .collect()
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(map) = patch.skill_confidence_map {
            self.skill_confidence_map = map;
        }
        if let Some(score) = patch.final_score {
            self.final_score = score;
        }
    }
}

/// The fields that may change after a record is created
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub skill_confidence_map: Option<ConfidenceMap>,
    pub final_score: Option<u32>,
}

impl RecordPatch {
    /// Patch carrying a record's current confidence state
    pub fn confidence_from(record: &AnalysisRecord) -> Self {
        Self {
            skill_confidence_map: Some(record.skill_confidence_map.clone()),
            final_score: Some(record.final_score),
        }
    }
}

/// Reasons a JD submission is refused before analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("job description is required")]
    EmptyJd,
}

/// Non-blocking remarks about a JD submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWarning {
    /// The JD is shorter than the threshold
    ShortJd { length: usize, threshold: usize },
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputWarning::ShortJd { length, threshold } => write!(
                f,
                "This JD is too short to analyze deeply ({} chars, {} recommended). \
                 Paste the full JD for better output.",
                length, threshold
            ),
        }
    }
}

/// Check a JD before it is submitted
pub fn check_jd_input(
    jd_text: &str,
    short_threshold: usize,
) -> Result<Option<InputWarning>, InputError> {
    if jd_text.trim().is_empty() {
        return Err(InputError::EmptyJd);
    }

    let length = jd_text.chars().count();
    if length < short_threshold {
        return Ok(Some(InputWarning::ShortJd {
            length,
            threshold: short_threshold,
        }));
    }

    Ok(None)
}

/// Analyse a job description
///
/// Pure apart from the generated id and timestamps: the same inputs always give
/// the same skills, profile, rounds, plan, questions and scores.
pub fn analyze_jd(company: &str, role: &str, jd_text: &str) -> AnalysisRecord {
    let SkillExtraction {
        skills,
        detected_categories,
    } = extract_skills(jd_text);

    let skill_confidence_map: ConfidenceMap = skills
        .flatten()
        .into_iter()
        .map(|s| (s.to_string(), Confidence::Practice))
        .collect();

    let company_intel = profile_company(company, jd_text);
    let round_mapping = generate_rounds(company_intel.is_enterprise, &skills);
    let checklist = derive_checklist(&round_mapping);
    let plan_7_days = generate_seven_day_plan(&skills);
    let questions = generate_questions(skills.flatten());
    let base = base_score(detected_categories, company, role, jd_text);

    tracing::debug!(
        "Analysed JD for {:?} / {:?}: {} categories, base score {}",
        company,
        role,
        detected_categories,
        base
    );

    let now = Utc::now();
    AnalysisRecord {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: now,
        updated_at: now,
        company: company.to_string(),
        role: role.to_string(),
        jd_text: jd_text.to_string(),
        extracted_skills: skills,
        round_mapping,
        checklist,
        plan_7_days,
        questions,
        base_score: base,
        final_score: base,
        skill_confidence_map,
        company_intel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_enterprise_example() {
        let record = analyze_jd("Infosys", "SDE", "We use React and SQL daily.");
        assert_eq!(record.extracted_skills.web, vec!["React"]);
        assert_eq!(record.extracted_skills.data, vec!["SQL"]);
        assert!(record.company_intel.is_enterprise);
        assert_eq!(record.base_score, 65);
        assert_eq!(record.final_score, 65);
        assert_eq!(record.round_mapping.len(), 4);
    }

    #[test]
    fn test_fallback_example() {
        let record = analyze_jd("", "", "We need a hustler");
        assert_eq!(record.extracted_skills.other, FALLBACK_SKILLS.to_vec());
        assert_eq!(record.base_score, 35);
        assert_eq!(record.skill_confidence_map.len(), 4);
        assert!(record
            .skill_confidence_map
            .values()
            .all(|c| *c == Confidence::Practice));
    }

    #[test]
    fn test_deterministic_apart_from_identity() {
        let jd = "Backend role: Java, Spring, PostgreSQL, Docker and Kubernetes in a fintech bank.";
        let a = analyze_jd("Acme", "Backend Engineer", jd);
        let b = analyze_jd("Acme", "Backend Engineer", jd);
        assert_ne!(a.id, b.id);
        assert_eq!(a.extracted_skills, b.extracted_skills);
        assert_eq!(a.company_intel, b.company_intel);
        assert_eq!(a.round_mapping, b.round_mapping);
        assert_eq!(a.plan_7_days, b.plan_7_days);
        assert_eq!(a.questions, b.questions);
        assert_eq!(a.base_score, b.base_score);
    }

    #[test]
    fn test_scores_bounded_and_questions_unique() {
        let long_jd = "React ".repeat(300);
        let inputs = [
            ("", "", ""),
            ("Google", "SWE", "DSA OOP DBMS OS Networks Java Python React SQL AWS Selenium"),
            ("x", "y", long_jd.as_str()),
        ];
        for (company, role, jd) in inputs {
            let record = analyze_jd(company, role, jd);
            assert!(record.base_score <= MAX_SCORE);
            assert!(record.final_score <= MAX_SCORE);
            assert!(record.questions.len() <= MAX_QUESTIONS);
            let unique: HashSet<_> = record.questions.iter().collect();
            assert_eq!(unique.len(), record.questions.len());
        }
    }

    #[test]
    fn test_toggle_skill_keeps_invariant() {
        let mut record = analyze_jd("Infosys", "SDE", "React and SQL");
        assert_eq!(record.toggle_skill("React"), Confidence::Know);
        assert_eq!(
            record.final_score,
            final_score(record.base_score, &record.skill_confidence_map)
        );
        assert_eq!(record.final_score, 65);
        record.toggle_skill("React");
        assert_eq!(record.final_score, 61);
    }

    #[test]
    fn test_weak_skills() {
        let mut record = analyze_jd("", "", "DSA, Java, Python, React");
        assert_eq!(record.weak_skills(), vec!["DSA", "Java", "Python"]);
        record.toggle_skill("Java");
        assert_eq!(record.weak_skills(), vec!["DSA", "Python", "React"]);
    }

    #[test]
    fn test_record_json_shape() {
        let record = analyze_jd("Infosys", "SDE", "React and SQL");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("jdText").is_some());
        assert!(json.get("plan7Days").is_some());
        assert!(json.get("skillConfidenceMap").is_some());
        assert_eq!(json["skillConfidenceMap"]["React"], "practice");
        assert_eq!(json["companyIntel"]["isEnterprise"], true);
        assert_eq!(json["checklist"][0]["roundTitle"], "Round 1: OA & Aptitude");
    }

    #[test]
    fn test_check_jd_input() {
        assert_eq!(check_jd_input("   ", 200), Err(InputError::EmptyJd));
        assert_eq!(
            check_jd_input("hello", 200),
            Ok(Some(InputWarning::ShortJd {
                length: 5,
                threshold: 200
            }))
        );
        assert_eq!(check_jd_input(&"a".repeat(200), 200), Ok(None));
    }
}
