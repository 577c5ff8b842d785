//! Interview round mapping and the seven-day preparation plan

use super::skills::ExtractedSkills;
use serde::{Deserialize, Serialize};

/// One interview round the candidate should expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRound {
    pub round_title: String,
    pub why_it_matters: String,
    pub focus_areas: Vec<String>,
}

/// Checklist projection of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundChecklist {
    pub round_title: String,
    pub items: Vec<String>,
}

/// One block of the preparation plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: String,
    pub focus: String,
    pub tasks: Vec<String>,
}

const PORTFOLIO_FOCUS: &str = "Projects & Portfolio";
const MOCK_DRILLS_FOCUS: &str = "Mock Drills";
const WEB_TASK: &str = "Frontend/Backend Framework revision";
const CLOUD_TASK: &str = "Cloud Infrastructure & CI/CD pipeline basics";

const ENTERPRISE_ROUNDS: [(&str, &str, [&str; 3]); 4] = [
    (
        "Round 1: OA & Aptitude",
        "To filter candidates based on logical reasoning and basic coding speed.",
        ["Speed-coding DSA", "Aptitude MCQs", "Core CS Basics"],
    ),
    (
        "Round 2: Technical Interview I",
        "Deep dive into Data Structures and Algorithm efficiency.",
        ["Array/String Logic", "Tree/Graph Traversal", "Complexity Analysis"],
    ),
    (
        "Round 3: Technical Interview II",
        "Evaluates project knowledge and core engineering principles like DBMS/OS.",
        ["Project Architecture", "System Design Basics", "Core CS (Database/OS)"],
    ),
    (
        "Round 4: Managerial/HR",
        "Assesses cultural fit and alignment with company core values.",
        ["Behavioral (STAR)", "Conflict Resolution", "Salary/Logistics"],
    ),
];

const STARTUP_ROUNDS: [(&str, &str, [&str; 3]); 3] = [
    (
        "Round 1: Machine Coding / Practical",
        "Startups value build speed and your ability to write clean, working code.",
        // first entry is replaced with the "Build a small ..." task
        ["", "API Integration", "State Management"],
    ),
    (
        "Round 2: Technical Discussion",
        "Evaluates depth in chosen stack and architectural thinking.",
        ["Stack-specific deep dive", "Framework internals", "Debugging Skills"],
    ),
    (
        "Round 3: Founder / Culture Round",
        "Ensures you can thrive in a fast-paced, high-ownership environment.",
        ["Vision alignment", "Product thinking", "High-ownership mindset"],
    ),
];

const PLAN_SKELETON: [(&str, &str, [&str; 3]); 5] = [
    (
        "Day 1-2",
        "Core CS Fundamentals",
        [
            "Basics of Programming",
            "Core CS Fundamentals (OS/DBMS)",
            "Aptitude Brush-up",
        ],
    ),
    (
        "Day 3-4",
        "DSA Topic-wise Practice",
        [
            "DSA Topic-wise Practice",
            "Coding Problem Solving (LeetCode)",
            "Algorithm Revision",
        ],
    ),
    (
        "Day 5",
        PORTFOLIO_FOCUS,
        ["Project Review", "Resume Alignment", "Stack Deep-dive"],
    ),
    (
        "Day 6",
        MOCK_DRILLS_FOCUS,
        ["Mock Interview Questions", "Behavioral Prep", "Company Research"],
    ),
    (
        "Day 7",
        "Final Revision",
        ["Full Revision", "Weak Area Focus", "Logistics Check"],
    ),
];

fn build_rounds(table: &[(&str, &str, [&str; 3])]) -> Vec<InterviewRound> {
    table
        .iter()
        .map(|(title, why, focus)| InterviewRound {
            round_title: title.to_string(),
            why_it_matters: why.to_string(),
            focus_areas: focus.iter().map(|f| f.to_string()).collect(),
        })
        .collect()
}

/// Generate the expected interview rounds
///
/// Enterprises get the four-round structured process. Everyone else gets the
/// three-round startup loop, whose machine coding round is themed on the first
/// extracted skill.
pub fn generate_rounds(is_enterprise: bool, skills: &ExtractedSkills) -> Vec<InterviewRound> {
    if is_enterprise {
        return build_rounds(&ENTERPRISE_ROUNDS);
    }

    let mut rounds = build_rounds(&STARTUP_ROUNDS);
    let subject = skills.flatten().first().copied().unwrap_or("Feature");
    if let Some(first) = rounds.first_mut().and_then(|r| r.focus_areas.first_mut()) {
        *first = format!("Build a small {}", subject);
    }
    rounds
}

/// Project rounds into their checklist form
pub fn derive_checklist(rounds: &[InterviewRound]) -> Vec<RoundChecklist> {
    rounds
        .iter()
        .map(|r| RoundChecklist {
            round_title: r.round_title.clone(),
            items: r.focus_areas.clone(),
        })
        .collect()
}

/// Generate the seven-day plan
pub fn generate_seven_day_plan(skills: &ExtractedSkills) -> Vec<PlanDay> {
    let mut plan: Vec<PlanDay> = PLAN_SKELETON
        .iter()
        .map(|(day, focus, tasks)| PlanDay {
            day: day.to_string(),
            focus: focus.to_string(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
        .collect();

    if !skills.web.is_empty() {
        append_task(&mut plan, PORTFOLIO_FOCUS, WEB_TASK);
    }
    if !skills.cloud.is_empty() {
        append_task(&mut plan, MOCK_DRILLS_FOCUS, CLOUD_TASK);
    }

    plan
}

fn append_task(plan: &mut [PlanDay], focus: &str, task: &str) {
    if let Some(day) = plan.iter_mut().find(|d| d.focus == focus) {
        day.tasks.push(task.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;

    #[test]
    fn test_enterprise_rounds() {
        let rounds = generate_rounds(true, &ExtractedSkills::default());
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[0].round_title, "Round 1: OA & Aptitude");
        assert_eq!(rounds[3].round_title, "Round 4: Managerial/HR");
        assert!(rounds.iter().all(|r| r.focus_areas.len() == 3));
    }

    #[test]
    fn test_startup_rounds_use_first_skill() {
        let skills = extract_skills("Python and React").skills;
        let rounds = generate_rounds(false, &skills);
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].focus_areas[0], "Build a small Python");
    }

    #[test]
    fn test_startup_rounds_fallback_subject() {
        let rounds = generate_rounds(false, &ExtractedSkills::default());
        assert_eq!(rounds[0].focus_areas[0], "Build a small Feature");

        // fallback bucket counts as extracted skills
        let skills = extract_skills("nothing relevant").skills;
        let rounds = generate_rounds(false, &skills);
        assert_eq!(rounds[0].focus_areas[0], "Build a small Communication");
    }

    #[test]
    fn test_checklist_is_projection() {
        let rounds = generate_rounds(true, &ExtractedSkills::default());
        let checklist = derive_checklist(&rounds);
        assert_eq!(checklist.len(), rounds.len());
        for (c, r) in checklist.iter().zip(&rounds) {
            assert_eq!(c.round_title, r.round_title);
            assert_eq!(c.items, r.focus_areas);
        }
    }

    #[test]
    fn test_plan_skeleton() {
        let plan = generate_seven_day_plan(&ExtractedSkills::default());
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[0].day, "Day 1-2");
        assert_eq!(plan[4].day, "Day 7");
        assert!(plan.iter().all(|d| d.tasks.len() == 3));
    }

    #[test]
    fn test_plan_conditional_tasks() {
        let skills = extract_skills("React on AWS").skills;
        let plan = generate_seven_day_plan(&skills);
        assert_eq!(plan[2].tasks.last().unwrap(), WEB_TASK);
        assert_eq!(plan[3].tasks.last().unwrap(), CLOUD_TASK);
        assert_eq!(plan[0].tasks.len(), 3);
    }
}
