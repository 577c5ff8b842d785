//! ATS readiness scoring for the résumé draft
//!
//! Eleven independent checks run in a fixed order. A passing check adds its
//! points, a failing one yields a suggestion. Only the first four failures are
//! reported, in evaluation order, whatever their point value.

use super::ResumeProfile;
use serde::{Deserialize, Serialize};

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 4;

/// Verbs that count as action language (matched as case-insensitive substrings)
pub const ACTION_VERBS: [&str; 10] = [
    "built",
    "led",
    "designed",
    "improved",
    "developed",
    "optimized",
    "automated",
    "implemented",
    "created",
    "launched",
];

const MAX_SCORE: u32 = 100;
const MIN_SUMMARY_CHARS: usize = 50;
const MIN_DESCRIPTION_CHARS: usize = 20;
const MIN_SKILLS: usize = 5;

/// Improvement hint for a failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub points: u32,
}

/// Readiness score with the top suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAssessment {
    pub score: u32,
    pub suggestions: Vec<Suggestion>,
}

struct ResumeCheck {
    points: u32,
    suggestion: &'static str,
    passes: fn(&ResumeProfile) -> bool,
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn uses_action_verb(text: &str) -> bool {
    let text = text.to_lowercase();
    ACTION_VERBS.iter().any(|verb| text.contains(verb))
}

const CHECKS: [ResumeCheck; 11] = [
    ResumeCheck {
        points: 10,
        suggestion: "Add your full name.",
        passes: |p| present(&p.personal_info.name),
    },
    ResumeCheck {
        points: 10,
        suggestion: "Add a professional email address.",
        passes: |p| present(&p.personal_info.email),
    },
    ResumeCheck {
        points: 10,
        suggestion: "Write a summary longer than 50 characters.",
        passes: |p| p.summary.chars().count() > MIN_SUMMARY_CHARS,
    },
    ResumeCheck {
        points: 15,
        suggestion: "Add at least one experience entry with a detailed description.",
        passes: |p| {
            p.experience
                .iter()
                .any(|e| e.description.chars().count() > MIN_DESCRIPTION_CHARS)
        },
    },
    ResumeCheck {
        points: 10,
        suggestion: "Add your education.",
        passes: |p| !p.education.is_empty(),
    },
    ResumeCheck {
        points: 10,
        suggestion: "List at least 5 skills.",
        passes: |p| p.skills.total() >= MIN_SKILLS,
    },
    ResumeCheck {
        points: 10,
        suggestion: "Add at least one project.",
        passes: |p| !p.projects.is_empty(),
    },
    ResumeCheck {
        points: 5,
        suggestion: "Add a phone number.",
        passes: |p| present(&p.personal_info.phone),
    },
    ResumeCheck {
        points: 5,
        suggestion: "Add your LinkedIn profile.",
        passes: |p| present(&p.links.linkedin),
    },
    ResumeCheck {
        points: 5,
        suggestion: "Add your GitHub profile.",
        passes: |p| present(&p.links.github),
    },
    ResumeCheck {
        points: 10,
        suggestion: "Start bullets with action verbs (built, led, designed, improved...).",
        passes: |p| {
            uses_action_verb(&p.summary)
                || p.experience.iter().any(|e| uses_action_verb(&e.description))
        },
    },
];

/// Score a résumé draft
pub fn score_resume(profile: &ResumeProfile) -> ResumeAssessment {
    let mut score = 0;
    let mut suggestions = Vec::new();

    for check in &CHECKS {
        if (check.passes)(profile) {
            score += check.points;
        } else {
            suggestions.push(Suggestion {
                text: check.suggestion.to_string(),
                points: check.points,
            });
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);

    ResumeAssessment {
        score: score.min(MAX_SCORE),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::{Education, Experience, Links, PersonalInfo, Project, SkillSet};

    fn complete_profile() -> ResumeProfile {
        ResumeProfile {
            personal_info: PersonalInfo {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: "12345".into(),
                location: String::new(),
            },
            summary: "Built data pipelines and dashboards for growing retail teams".into(),
            education: vec![Education::default()],
            experience: vec![Experience {
                description: "Cut query latency by 20%".into(),
                ..Experience::default()
            }],
            projects: vec![Project::default()],
            skills: SkillSet {
                technical: vec!["Rust".into(), "SQL".into(), "Go".into()],
                soft: vec!["Mentoring".into()],
                tools: vec!["Git".into(), "Docker".into()],
            },
            links: Links {
                github: "gh".into(),
                linkedin: "li".into(),
            },
        }
    }

    #[test]
    fn test_weights_sum_to_hundred() {
        let total: u32 = CHECKS.iter().map(|c| c.points).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_complete_profile_scores_hundred() {
        let profile = complete_profile();
        assert_eq!(profile.summary.chars().count(), 60);
        let assessment = score_resume(&profile);
        assert_eq!(assessment.score, 100);
        assert!(assessment.suggestions.is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let assessment = score_resume(&ResumeProfile::default());
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.suggestions.len(), MAX_SUGGESTIONS);
        let points: Vec<u32> = assessment.suggestions.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![10, 10, 10, 15]);
        assert_eq!(assessment.suggestions[0].text, "Add your full name.");
    }

    #[test]
    fn test_suggestions_in_evaluation_order() {
        // failing: phone (5), linkedin (5), github (5), action verbs (10)
        let mut profile = complete_profile();
        profile.personal_info.phone.clear();
        profile.links = Links::default();
        profile.summary = "A".repeat(60);
        profile.experience[0].description = "Maintained internal tools for teams".into();
        let assessment = score_resume(&profile);
        assert_eq!(assessment.score, 75);
        let points: Vec<u32> = assessment.suggestions.iter().map(|s| s.points).collect();
        assert_eq!(points, vec![5, 5, 5, 10]);
    }

    #[test]
    fn test_earlier_low_value_beats_later_high_value() {
        // five failures: phone, linkedin, github, education... evaluation order decides
        let mut profile = complete_profile();
        profile.education.clear();
        profile.personal_info.phone.clear();
        profile.links = Links::default();
        profile.summary = "Z".repeat(60);
        profile.experience[0].description = "Maintained internal tools for teams".into();
        let assessment = score_resume(&profile);
        let texts: Vec<&str> = assessment.suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], "Add your education.");
        // the 10-point action verb check is dropped in favour of 5-point checks
        assert!(assessment.suggestions.iter().all(|s| s.text != CHECKS[10].suggestion));
    }

    #[test]
    fn test_action_verb_substring_match() {
        // "led" inside "skilled" still counts
        let mut profile = ResumeProfile::default();
        profile.summary = "Skilled engineer".into();
        assert!((CHECKS[10].passes)(&profile));
    }

    #[test]
    fn test_short_description_does_not_count() {
        let mut profile = complete_profile();
        profile.experience[0].description = "Did things".into();
        let assessment = score_resume(&profile);
        assert_eq!(assessment.score, 85);
        assert_eq!(assessment.suggestions[0].points, 15);
    }
}
