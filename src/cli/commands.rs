//! Command implementations

use super::{
    AnalyzeArgs, ChecklistCommand, ConfigArgs, ExportArgs, OutputFormat, ResumeAddCommand,
    ResumeCommand, ResumeSection,
};
use crate::analysis::{analyze_jd, check_jd_input, AnalysisRecord, Confidence, SkillCategory};
use crate::checklist::{ChecklistItem, ChecklistStore};
use crate::config::AppConfig;
use crate::export::{render_section, report_file_name, resume_plain_text};
use crate::resume::{Education, Experience, Project, ResumeAssessment, ResumeProfileStore};
use crate::storage::{HistoryStore, KeyValueStore};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn write_or_print(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            println!("✓ Wrote {:?}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn display_or(value: &str, fallback: &'static str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Analyze a job description and save the result to history
pub fn analyze(
    kv: &dyn KeyValueStore,
    config: &AppConfig,
    args: &AnalyzeArgs,
    format: OutputFormat,
) -> Result<AnalysisRecord> {
    let jd_text = match (&args.jd, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description from {:?}", path))?,
        (None, None) => String::new(),
    };

    if let Some(warning) = check_jd_input(&jd_text, config.short_jd_threshold)? {
        eprintln!("⚠ {}", warning);
    }

    let record = analyze_jd(&args.company, &args.role, &jd_text);
    HistoryStore::new(kv).save(&record)?;

    match format {
        OutputFormat::Json => print_json(&record)?,
        OutputFormat::Text => print_record_text(&record),
    }

    Ok(record)
}

fn report_corrupted(corrupted: bool) {
    if corrupted {
        eprintln!("⚠ One saved entry couldn't be loaded. Create a new analysis.");
    }
}

/// JSON shape of `history`, mirroring `HistoryLoad`
#[derive(Debug, Serialize)]
struct HistoryOutput<'a> {
    list: Vec<&'a AnalysisRecord>,
    corrupted: bool,
}

/// List saved analyses
pub fn history(
    kv: &dyn KeyValueStore,
    config: &AppConfig,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let load = HistoryStore::new(kv).load()?;
    report_corrupted(load.corrupted);

    let shown: Vec<&AnalysisRecord> = if all {
        load.list.iter().collect()
    } else {
        load.list.iter().take(config.history_preview_len).collect()
    };

    if format == OutputFormat::Json {
        return print_json(&HistoryOutput {
            list: shown,
            corrupted: load.corrupted,
        });
    }

    if shown.is_empty() {
        println!("No analyses yet. Run 'placement-prep analyze' to create one.");
        return Ok(());
    }

    println!("Analysis History");
    println!("================\n");

    for record in &shown {
        println!(
            "{}  {:>3}%  {} @ {}",
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.final_score,
            display_or(&record.role, "Unknown role"),
            display_or(&record.company, "Unknown company"),
        );
        println!("   ID: {}", record.id);
    }

    if shown.len() < load.list.len() {
        println!("\n({} more, use --all to list them)", load.list.len() - shown.len());
    }

    Ok(())
}

fn resolve_record(store: &HistoryStore<'_>, id: Option<&str>) -> Result<AnalysisRecord> {
    match id {
        Some(id) => store
            .get_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("Analysis not found: {}", id)),
        None => store
            .latest()?
            .ok_or_else(|| anyhow::anyhow!("No analyses yet. Run 'placement-prep analyze' first.")),
    }
}

/// Show one saved analysis
pub fn show(kv: &dyn KeyValueStore, id: Option<&str>, format: OutputFormat) -> Result<()> {
    let store = HistoryStore::new(kv);
    let record = resolve_record(&store, id)?;

    match format {
        OutputFormat::Json => print_json(&record)?,
        OutputFormat::Text => print_record_text(&record),
    }
    Ok(())
}

/// Flip one skill's confidence on a saved analysis
pub fn toggle(
    kv: &dyn KeyValueStore,
    skill: &str,
    id: Option<&str>,
    format: OutputFormat,
) -> Result<AnalysisRecord> {
    let store = HistoryStore::new(kv);
    let record = resolve_record(&store, id)?;

    if !record.extracted_skills.flatten().contains(&skill) {
        anyhow::bail!(
            "Skill {:?} was not extracted for this analysis. Extracted: {}",
            skill,
            record.extracted_skills.flatten().join(", ")
        );
    }

    let updated = store
        .toggle_skill(&record.id, skill)?
        .ok_or_else(|| anyhow::anyhow!("Analysis not found: {}", record.id))?;

    match format {
        OutputFormat::Json => print_json(&updated)?,
        OutputFormat::Text => {
            println!(
                "✓ {} marked as \"{}\"",
                skill,
                updated.confidence_of(skill)
            );
            println!("  Readiness score: {}%", updated.final_score);
        }
    }

    Ok(updated)
}

/// Export an analysis as plain text
pub fn export(kv: &dyn KeyValueStore, args: &ExportArgs) -> Result<()> {
    let store = HistoryStore::new(kv);
    let record = resolve_record(&store, args.id.as_deref())?;
    let text = render_section(&record, args.section);

    if args.save {
        let file_name = report_file_name(&record);
        return write_or_print(&text, Some(Path::new(&file_name)));
    }

    write_or_print(&text, args.output.as_deref())
}

/// Print an analysis in text format
pub fn print_record_text(record: &AnalysisRecord) {
    println!(
        "{} @ {}",
        display_or(&record.role, "Unknown role"),
        display_or(&record.company, "Unknown company")
    );
    println!("=====================\n");
    println!("ID: {}", record.id);
    println!("Created: {}", record.created_at.format("%Y-%m-%d %H:%M"));
    println!("Readiness score: {}% (base {}%)", record.final_score, record.base_score);

    let intel = &record.company_intel;
    println!("\nCompany Intel:");
    println!("  Industry: {}", intel.industry);
    println!("  Size: {}", intel.size);
    println!("  Hiring focus: {}", intel.hiring_focus);

    println!("\nExtracted Skills:");
    for (category, skills) in record.extracted_skills.non_empty() {
        let marked: Vec<String> = skills
            .iter()
            .map(|s| match record.confidence_of(s) {
                Confidence::Know => format!("✓ {}", s),
                Confidence::Practice => format!("· {}", s),
            })
            .collect();
        let label = if category == SkillCategory::Other {
            "General".to_string()
        } else {
            category.to_string()
        };
        println!("  {}: {}", label, marked.join(", "));
    }

    println!("\nInterview Rounds:");
    for round in &record.round_mapping {
        println!("  {}", round.round_title);
        println!("    Why it matters: {}", round.why_it_matters);
        for area in &round.focus_areas {
            println!("    - {}", area);
        }
    }

    println!("\n7-Day Plan:");
    for day in &record.plan_7_days {
        println!("  {} ({}): {}", day.day, day.focus, day.tasks.join(", "));
    }

    println!("\nLikely Questions:");
    for (i, question) in record.questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question);
    }

    let weak = record.weak_skills();
    println!();
    if weak.is_empty() {
        println!("Next action: every skill is marked as known. Start a mock interview.");
    } else {
        println!("Next action: start Day 1. Focus on: {}", weak.join(", "));
    }
}

fn print_assessment(assessment: &ResumeAssessment) {
    println!("ATS readiness: {}/100", assessment.score);
    if assessment.suggestions.is_empty() {
        println!("✓ No suggestions. Your résumé covers every check.");
        return;
    }
    println!("\nTop suggestions:");
    for suggestion in &assessment.suggestions {
        println!("  - {} (+{})", suggestion.text, suggestion.points);
    }
}

/// Run a résumé subcommand
pub fn resume(kv: &dyn KeyValueStore, action: &ResumeCommand, format: OutputFormat) -> Result<()> {
    let mut store = ResumeProfileStore::open(kv)?;

    match action {
        ResumeCommand::Score => {}
        ResumeCommand::Show => {
            if format == OutputFormat::Json {
                return print_json(store.profile());
            }
            println!("{}", resume_plain_text(store.profile()));
            println!(
                "\nTemplate: {}  Accent: {}",
                store.template()?,
                store.accent_color()?
            );
            return Ok(());
        }
        ResumeCommand::Set { field, value } => store.set_field(*field, value)?,
        ResumeCommand::Add(entry) => match entry {
            ResumeAddCommand::Education { school, degree, year } => {
                store.add_education(Education {
                    school: school.clone(),
                    degree: degree.clone(),
                    year: year.clone(),
                })?
            }
            ResumeAddCommand::Experience {
                company,
                role,
                duration,
                description,
            } => store.add_experience(Experience {
                company: company.clone(),
                role: role.clone(),
                duration: duration.clone(),
                description: description.clone(),
            })?,
            ResumeAddCommand::Project {
                title,
                description,
                tech,
                live_url,
                github_url,
            } => store.add_project(Project {
                title: title.clone(),
                description: description.clone(),
                tech_stack: tech
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                live_url: live_url.clone(),
                github_url: github_url.clone(),
            })?,
            ResumeAddCommand::Skill { bucket, name } => store.add_skill(*bucket, name)?,
        },
        ResumeCommand::Remove { section, position } => {
            let index = position
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("Positions start at 1"))?;
            let removed = match section {
                ResumeSection::Education => store.remove_education(index)?,
                ResumeSection::Experience => store.remove_experience(index)?,
                ResumeSection::Project => store.remove_project(index)?,
            };
            if !removed {
                anyhow::bail!("No {:?} entry at position {}", section, position);
            }
        }
        ResumeCommand::Import { file } => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            store.import_json(&json)?;
        }
        ResumeCommand::Sample => store.load_sample()?,
        ResumeCommand::Template { template } => {
            if let Some(template) = template {
                store.set_template(*template)?;
            }
            println!("Template: {}", store.template()?);
            return Ok(());
        }
        ResumeCommand::Accent { color } => {
            if let Some(color) = color {
                store.set_accent_color(color)?;
            }
            println!("Accent: {}", store.accent_color()?);
            return Ok(());
        }
        ResumeCommand::Export { output } => {
            return write_or_print(&resume_plain_text(store.profile()), output.as_deref());
        }
    }

    let assessment = store.assessment();
    match format {
        OutputFormat::Json => print_json(&assessment)?,
        OutputFormat::Text => print_assessment(&assessment),
    }
    Ok(())
}

fn print_checklist(items: &[ChecklistItem]) {
    for item in items {
        let mark = if item.passed { "x" } else { " " };
        println!("[{}] {:<14} {}", mark, item.id, item.label);
        println!("    {}", item.hint);
    }

    let passed = items.iter().filter(|i| i.passed).count();
    println!("\nTests passed: {}/{}", passed, items.len());
    if passed == items.len() {
        println!("✓ All tests passed. Ready to ship.");
    } else {
        println!("Fix the remaining issues before shipping.");
    }
}

/// Run a checklist subcommand
pub fn checklist(
    kv: &dyn KeyValueStore,
    action: Option<&ChecklistCommand>,
    format: OutputFormat,
) -> Result<()> {
    let store = ChecklistStore::new(kv);

    match action {
        None | Some(ChecklistCommand::Show) => {}
        Some(ChecklistCommand::Pass { id }) | Some(ChecklistCommand::Fail { id }) => {
            let passed = matches!(action, Some(ChecklistCommand::Pass { .. }));
            if !store.set_passed(id, passed)? {
                anyhow::bail!("Unknown checklist item: {}", id);
            }
        }
        Some(ChecklistCommand::Reset) => {
            store.reset()?;
        }
    }

    let items = store.get()?;
    match format {
        OutputFormat::Json => print_json(&items)?,
        OutputFormat::Text => print_checklist(&items),
    }
    Ok(())
}

/// Show or reset configuration
pub fn handle_config(
    path: &Path,
    config: &AppConfig,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<()> {
    if args.reset {
        AppConfig::default().save(path)?;
        println!("✓ Configuration reset to defaults");
        return Ok(());
    }

    if format == OutputFormat::Json {
        return print_json(config);
    }

    println!("Placement Prep Configuration");
    println!("============================\n");
    println!("Config file: {:?}", path);
    println!("Database: {:?}", config.database_path);
    println!("Short JD threshold: {} chars", config.short_jd_threshold);
    println!("History preview: {} entries", config.history_preview_len);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn analyze_args(company: &str, jd: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            company: company.to_string(),
            role: "SDE".to_string(),
            jd: Some(jd.to_string()),
            file: None,
        }
    }

    #[test]
    fn test_analyze_saves_record() {
        let kv = MemoryStore::new();
        let config = AppConfig::default();
        let args = analyze_args("Infosys", "React and SQL");
        let record = analyze(&kv, &config, &args, OutputFormat::Json).unwrap();
        let latest = HistoryStore::new(&kv).latest().unwrap().unwrap();
        assert_eq!(latest.id, record.id);
    }

    #[test]
    fn test_analyze_rejects_blank_jd() {
        let kv = MemoryStore::new();
        let config = AppConfig::default();
        let args = analyze_args("Infosys", "   ");
        let err = analyze(&kv, &config, &args, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("job description is required"));
        assert!(HistoryStore::new(&kv).list().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_latest() {
        let kv = MemoryStore::new();
        let config = AppConfig::default();
        analyze(&kv, &config, &analyze_args("Infosys", "React and SQL"), OutputFormat::Json)
            .unwrap();

        // base 65, React practice (-2), SQL know (+2)
        let updated = toggle(&kv, "SQL", None, OutputFormat::Json).unwrap();
        assert_eq!(updated.confidence_of("SQL"), Confidence::Know);
        assert_eq!(updated.final_score, 65);

        assert!(toggle(&kv, "Kubernetes", None, OutputFormat::Json).is_err());
        assert!(toggle(&kv, "SQL", Some("missing"), OutputFormat::Json).is_err());
    }

    #[test]
    fn test_show_without_history() {
        let kv = MemoryStore::new();
        assert!(show(&kv, None, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_checklist_unknown_item() {
        let kv = MemoryStore::new();
        let action = ChecklistCommand::Pass { id: "nope".into() };
        assert!(checklist(&kv, Some(&action), OutputFormat::Text).is_err());

        let action = ChecklistCommand::Pass { id: "jd-req".into() };
        checklist(&kv, Some(&action), OutputFormat::Json).unwrap();
        assert_eq!(ChecklistStore::new(&kv).summary().unwrap().passed, 1);
    }

    #[test]
    fn test_resume_remove_position() {
        let kv = MemoryStore::new();
        resume(&kv, &ResumeCommand::Sample, OutputFormat::Json).unwrap();

        let remove = |position| ResumeCommand::Remove {
            section: ResumeSection::Experience,
            position,
        };
        assert!(resume(&kv, &remove(0), OutputFormat::Json).is_err());
        assert!(resume(&kv, &remove(3), OutputFormat::Json).is_err());
        resume(&kv, &remove(1), OutputFormat::Json).unwrap();

        let store = ResumeProfileStore::open(&kv).unwrap();
        assert_eq!(store.profile().experience.len(), 1);
        assert_eq!(store.profile().experience[0].company, "Code Crafters");
    }
}
