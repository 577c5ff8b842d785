//! Plain-text exports
//!
//! Renders analysis results and the résumé draft as text suitable for copying
//! or saving to a file.

use crate::analysis::AnalysisRecord;
use crate::resume::ResumeProfile;

/// Which part of an analysis to export
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportSection {
    Plan,
    Rounds,
    Questions,
    Full,
}

/// Render one section of an analysis
pub fn render_section(record: &AnalysisRecord, section: ExportSection) -> String {
    match section {
        ExportSection::Plan => plan_text(record),
        ExportSection::Rounds => rounds_text(record),
        ExportSection::Questions => questions_text(record),
        ExportSection::Full => full_report_text(record),
    }
}

fn numbered(questions: &[String]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}", i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn plan_text(record: &AnalysisRecord) -> String {
    let days: Vec<String> = record
        .plan_7_days
        .iter()
        .map(|p| format!("{} ({}): {}", p.day, p.focus, p.tasks.join(", ")))
        .collect();
    format!("7-DAY INTENSIVE PLAN\n\n{}", days.join("\n"))
}

pub fn rounds_text(record: &AnalysisRecord) -> String {
    let rounds: Vec<String> = record
        .round_mapping
        .iter()
        .map(|r| {
            format!(
                "{}\nWhy it matters: {}\n{}",
                r.round_title,
                r.why_it_matters,
                bullets(&r.focus_areas)
            )
        })
        .collect();
    format!("INTERVIEW ROUND MAPPING\n\n{}", rounds.join("\n\n"))
}

pub fn questions_text(record: &AnalysisRecord) -> String {
    format!("TOP 10 INTERVIEW QUESTIONS\n\n{}", numbered(&record.questions))
}

/// The complete report written by `export --section full`
pub fn full_report_text(record: &AnalysisRecord) -> String {
    let intel = &record.company_intel;

    let skills: Vec<String> = record
        .extracted_skills
        .non_empty()
        .map(|(category, skills)| format!("{}: {}", category.key(), skills.join(", ")))
        .collect();

    let rounds: Vec<String> = record
        .round_mapping
        .iter()
        .map(|r| format!("{}\n{}", r.round_title, bullets(&r.focus_areas)))
        .collect();

    let days: Vec<String> = record
        .plan_7_days
        .iter()
        .map(|p| format!("{}: {}", p.day, p.tasks.join(", ")))
        .collect();

    format!(
        "PLACEMENT READINESS ANALYSIS - {role} @ {company}\n\
         Score: {score}%\n\n\
         COMPANY INTEL:\nIndustry: {industry}\nSize: {size}\nFocus: {focus}\n\n\
         EXTRACTED SKILLS:\n{skills}\n\n\
         ROUND MAPPING:\n{rounds}\n\n\
         7-DAY PLAN:\n{days}\n\n\
         INTERVIEW QUESTIONS:\n{questions}",
        role = record.role,
        company = record.company,
        score = record.final_score,
        industry = intel.industry,
        size = intel.size,
        focus = intel.hiring_focus,
        skills = skills.join("\n"),
        rounds = rounds.join("\n\n"),
        days = days.join("\n"),
        questions = numbered(&record.questions),
    )
}

/// File name for a saved full report
pub fn report_file_name(record: &AnalysisRecord) -> String {
    format!("Placement_Prep_{}_{}.txt", record.company, record.role)
}

fn joined_present<'a>(parts: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    parts
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Plain-text rendering of the résumé draft
pub fn resume_plain_text(profile: &ResumeProfile) -> String {
    let info = &profile.personal_info;
    let mut text = String::new();

    let name = if info.name.is_empty() { "YOUR NAME" } else { info.name.as_str() };
    text.push_str(name);
    text.push('\n');
    text.push_str(&joined_present([
        ("Email", info.email.as_str()),
        ("Phone", info.phone.as_str()),
        ("Location", info.location.as_str()),
    ]));
    text.push('\n');

    let links = joined_present([
        ("GitHub", profile.links.github.as_str()),
        ("LinkedIn", profile.links.linkedin.as_str()),
    ]);
    if !links.is_empty() {
        text.push_str(&links);
        text.push('\n');
    }

    text.push('\n');
    text.push_str(&"=".repeat(40));
    text.push_str("\n\n");

    if !profile.summary.is_empty() {
        text.push_str(&format!("SUMMARY\n{}\n\n", profile.summary));
    }

    if !profile.experience.is_empty() {
        text.push_str("EXPERIENCE\n");
        for exp in &profile.experience {
            text.push_str(&format!("{} | {} | {}\n", exp.role, exp.company, exp.duration));
            if !exp.description.is_empty() {
                text.push_str(&exp.description);
                text.push('\n');
            }
            text.push('\n');
        }
    }

    if !profile.projects.is_empty() {
        text.push_str("PROJECTS\n");
        for project in &profile.projects {
            text.push_str(&project.title);
            text.push('\n');
            if !project.description.is_empty() {
                text.push_str(&project.description);
                text.push('\n');
            }
            text.push('\n');
        }
    }

    if !profile.education.is_empty() {
        text.push_str("EDUCATION\n");
        for edu in &profile.education {
            text.push_str(&format!("{} | {} | {}\n", edu.degree, edu.school, edu.year));
        }
        text.push('\n');
    }

    let skills = &profile.skills;
    if skills.total() > 0 {
        text.push_str("TECHNICAL SKILLS\n");
        for (label, list) in [
            ("Technical", &skills.technical),
            ("Soft Skills", &skills.soft),
            ("Tools", &skills.tools),
        ] {
            if !list.is_empty() {
                text.push_str(&format!("{}: {}\n", label, list.join(", ")));
            }
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_jd;

    fn numbered_lines(text: &str) -> usize {
        text.lines()
            .filter(|l| {
                let digits = l.chars().take_while(|c| c.is_ascii_digit()).count();
                digits > 0 && l[digits..].starts_with(". ")
            })
            .count()
    }

    #[test]
    fn test_questions_numbered() {
        let record = analyze_jd("Infosys", "SDE", "React and SQL");
        let text = questions_text(&record);
        assert!(text.starts_with("TOP 10 INTERVIEW QUESTIONS\n\n1. "));
        assert_eq!(numbered_lines(&text), record.questions.len());
    }

    #[test]
    fn test_questions_numbered_to_ten() {
        let jd = "SQL, React, DSA, Java, Python, Node.js, Networks, DBMS";
        let record = analyze_jd("Infosys", "SDE", jd);
        let text = questions_text(&record);
        assert_eq!(record.questions.len(), 10);
        assert_eq!(numbered_lines(&text), 10);
        assert_eq!(text.lines().filter(|l| l.starts_with("10. ")).count(), 1);
    }

    #[test]
    fn test_plan_lists_seven_days() {
        let record = analyze_jd("", "", "React");
        let text = plan_text(&record);
        assert!(text.contains("Day 1-2 (Core CS Fundamentals): "));
        assert!(text.contains("Day 7 (Final Revision): Full Revision"));
    }

    #[test]
    fn test_rounds_for_enterprise() {
        let record = analyze_jd("Infosys", "SDE", "React");
        let text = rounds_text(&record);
        assert!(text.contains("Round 1: OA & Aptitude\nWhy it matters: "));
        assert!(text.contains("- Speed-coding DSA"));
        assert!(text.contains("Round 4: Managerial/HR"));
    }

    #[test]
    fn test_full_report() {
        let record = analyze_jd("Infosys", "SDE", "React and SQL");
        let text = full_report_text(&record);
        assert!(text.starts_with("PLACEMENT READINESS ANALYSIS - SDE @ Infosys\nScore: 65%"));
        assert!(text.contains("web: React"));
        assert!(text.contains("data: SQL"));
        assert!(text.contains("INTERVIEW QUESTIONS:\n1. "));
        assert_eq!(report_file_name(&record), "Placement_Prep_Infosys_SDE.txt");
    }

    #[test]
    fn test_resume_plain_text_sample() {
        let text = resume_plain_text(&ResumeProfile::sample());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Rahul Coder"));
        assert_eq!(
            lines.next(),
            Some("Email: rahul@example.com | Phone: +91 98765 43210 | Location: Bangalore, India")
        );
        assert!(
            text.contains("EXPERIENCE\nFrontend Developer | Tech Solutions | 2023 - Present\n")
        );
        assert!(
            text.contains("EDUCATION\nB.Tech in Computer Science | KodNest University | 2019-2023")
        );
        assert!(text.ends_with("Tools: Git"));
    }

    #[test]
    fn test_resume_plain_text_empty() {
        let text = resume_plain_text(&ResumeProfile::default());
        assert_eq!(text, format!("YOUR NAME\n\n\n{}", "=".repeat(40)));
    }
}
