//! Readiness scoring
//!
//! The base score is fixed when a record is created. The final score is always
//! recomputed from the whole confidence map, never adjusted incrementally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower bound for any readiness score
pub const MIN_SCORE: u32 = 0;
/// Upper bound for any readiness score
pub const MAX_SCORE: u32 = 100;

const BASELINE: i64 = 35;
const PER_CATEGORY: i64 = 5;
const CATEGORY_CAP: i64 = 30;
const INPUT_BONUS: i64 = 10;
const LONG_JD_CHARS: usize = 800;
const CONFIDENCE_STEP: i64 = 2;

/// Self-reported confidence for one skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    #[default]
    Practice,
}

impl Confidence {
    /// The other state
    pub fn toggled(self) -> Self {
        match self {
            Confidence::Know => Confidence::Practice,
            Confidence::Practice => Confidence::Know,
        }
    }

    fn adjustment(self) -> i64 {
        match self {
            Confidence::Know => CONFIDENCE_STEP,
            Confidence::Practice => -CONFIDENCE_STEP,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Know => write!(f, "know"),
            Confidence::Practice => write!(f, "practice"),
        }
    }
}

/// Per-skill confidence map
pub type ConfidenceMap = BTreeMap<String, Confidence>;

fn clamp_score(raw: i64) -> u32 {
    raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32
}

/// Compute the base readiness score
pub fn base_score(detected_categories: usize, company: &str, role: &str, jd_text: &str) -> u32 {
    let categories = i64::try_from(detected_categories).unwrap_or(i64::MAX);
    let mut score = BASELINE + categories.saturating_mul(PER_CATEGORY).min(CATEGORY_CAP);

    if !company.trim().is_empty() {
        score += INPUT_BONUS;
    }
    if !role.trim().is_empty() {
        score += INPUT_BONUS;
    }
    if jd_text.chars().count() > LONG_JD_CHARS {
        score += INPUT_BONUS;
    }

    clamp_score(score)
}

/// Compute the final score from the base score and the full confidence map
pub fn final_score(base_score: u32, confidence: &ConfidenceMap) -> u32 {
    let adjustment: i64 = confidence.values().map(|c| c.adjustment()).sum();
    clamp_score(base_score as i64 + adjustment)
}

/// Flip one skill's confidence and return the recomputed final score
///
/// A skill missing from the map is treated as `practice`, so it becomes `know`.
pub fn toggle_confidence(base_score: u32, confidence: &mut ConfidenceMap, skill: &str) -> u32 {
    let current = confidence.get(skill).copied().unwrap_or_default();
    confidence.insert(skill.to_string(), current.toggled());
    final_score(base_score, confidence)
}
