//! Résumé draft persistence
//!
//! The draft, template name and accent color live under separate keys and are
//! written through on every change. Drafts saved with skills as one
//! comma-separated string are migrated to grouped skills when first read.

use super::{
    score_resume, Education, Experience, Project, ResumeAssessment, ResumeProfile, SkillBucket,
};
use crate::storage::{KeyValueStore, ACCENT_KEY, RESUME_KEY, TEMPLATE_KEY};
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::str::FromStr;

/// Accent color used when none has been chosen
pub const DEFAULT_ACCENT_COLOR: &str = "hsl(168,60%,40%)";

/// Visual template for the rendered résumé
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResumeTemplate {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl std::fmt::Display for ResumeTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeTemplate::Classic => write!(f, "Classic"),
            ResumeTemplate::Modern => write!(f, "Modern"),
            ResumeTemplate::Minimal => write!(f, "Minimal"),
        }
    }
}

impl FromStr for ResumeTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Classic" => Ok(ResumeTemplate::Classic),
            "Modern" => Ok(ResumeTemplate::Modern),
            "Minimal" => Ok(ResumeTemplate::Minimal),
            other => anyhow::bail!("Unknown template: {}", other),
        }
    }
}

/// Scalar fields of the draft that can be set directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    Summary,
    Github,
    Linkedin,
}

/// Rewrite a legacy comma-separated `skills` string into grouped skills
///
/// Returns true when the value was changed.
pub fn migrate_legacy_skills(profile: &mut Value) -> bool {
    let Some(Value::String(legacy)) = profile.get("skills") else {
        return false;
    };

    let technical: Vec<String> = legacy
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    profile["skills"] = json!({
        "technical": technical,
        "soft": [],
        "tools": [],
    });
    true
}

fn modify_at<T>(items: &mut [T], index: usize, f: impl FnOnce(&mut T)) -> bool {
    match items.get_mut(index) {
        Some(item) => {
            f(item);
            true
        }
        None => false,
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

/// Store for the résumé draft and its presentation settings
pub struct ResumeProfileStore<'a> {
    kv: &'a dyn KeyValueStore,
    profile: ResumeProfile,
}

impl<'a> ResumeProfileStore<'a> {
    /// Load the draft from the backend
    pub fn open(kv: &'a dyn KeyValueStore) -> Result<Self> {
        let profile = Self::load_profile(kv)?;
        Ok(Self { kv, profile })
    }

    fn load_profile(kv: &dyn KeyValueStore) -> Result<ResumeProfile> {
        let Some(raw) = kv.get(RESUME_KEY)? else {
            return Ok(ResumeProfile::default());
        };

        let mut value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored résumé is not valid JSON, starting fresh: {}", e);
                return Ok(ResumeProfile::default());
            }
        };

        let migrated = migrate_legacy_skills(&mut value);

        let profile: ResumeProfile = match serde_json::from_value(value) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Stored résumé has an unexpected shape, starting fresh: {}", e);
                return Ok(ResumeProfile::default());
            }
        };

        if migrated {
            tracing::info!(
                "Migrated legacy skills string into {} technical skills",
                profile.skills.technical.len()
            );
            Self::write_profile(kv, &profile)?;
        }

        Ok(profile)
    }

    fn write_profile(kv: &dyn KeyValueStore, profile: &ResumeProfile) -> Result<()> {
        let json = serde_json::to_string(profile).context("Failed to serialize résumé")?;
        kv.set(RESUME_KEY, &json)
    }

    /// Current draft
    pub fn profile(&self) -> &ResumeProfile {
        &self.profile
    }

    /// Readiness assessment of the current draft
    pub fn assessment(&self) -> ResumeAssessment {
        score_resume(&self.profile)
    }

    /// Apply an edit to the draft and persist it
    pub fn edit(&mut self, f: impl FnOnce(&mut ResumeProfile)) -> Result<()> {
        f(&mut self.profile);
        Self::write_profile(self.kv, &self.profile)
    }

    /// Replace the whole draft
    pub fn replace(&mut self, profile: ResumeProfile) -> Result<()> {
        self.edit(|p| *p = profile)
    }

    /// Replace the draft with a JSON document, migrating legacy skills
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let mut value: Value =
            serde_json::from_str(json).context("Résumé file is not valid JSON")?;
        migrate_legacy_skills(&mut value);
        let profile: ResumeProfile =
            serde_json::from_value(value).context("Résumé file has an unexpected shape")?;
        self.replace(profile)
    }

    /// Replace the draft with the sample résumé
    pub fn load_sample(&mut self) -> Result<()> {
        self.replace(ResumeProfile::sample())
    }

    /// Set one scalar field
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<()> {
        let value = value.to_string();
        self.edit(|p| match field {
            ProfileField::Name => p.personal_info.name = value,
            ProfileField::Email => p.personal_info.email = value,
            ProfileField::Phone => p.personal_info.phone = value,
            ProfileField::Location => p.personal_info.location = value,
            ProfileField::Summary => p.summary = value,
            ProfileField::Github => p.links.github = value,
            ProfileField::Linkedin => p.links.linkedin = value,
        })
    }

    pub fn add_education(&mut self, entry: Education) -> Result<()> {
        self.edit(|p| p.education.push(entry))
    }

    /// Returns false when the index is out of range
    pub fn update_education(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Education),
    ) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = modify_at(&mut p.education, index, f))?;
        Ok(changed)
    }

    pub fn remove_education(&mut self, index: usize) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = remove_at(&mut p.education, index))?;
        Ok(changed)
    }

    pub fn add_experience(&mut self, entry: Experience) -> Result<()> {
        self.edit(|p| p.experience.push(entry))
    }

    /// Returns false when the index is out of range
    pub fn update_experience(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Experience),
    ) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = modify_at(&mut p.experience, index, f))?;
        Ok(changed)
    }

    pub fn remove_experience(&mut self, index: usize) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = remove_at(&mut p.experience, index))?;
        Ok(changed)
    }

    pub fn add_project(&mut self, entry: Project) -> Result<()> {
        self.edit(|p| p.projects.push(entry))
    }

    /// Returns false when the index is out of range
    pub fn update_project(&mut self, index: usize, f: impl FnOnce(&mut Project)) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = modify_at(&mut p.projects, index, f))?;
        Ok(changed)
    }

    pub fn remove_project(&mut self, index: usize) -> Result<bool> {
        let mut changed = false;
        self.edit(|p| changed = remove_at(&mut p.projects, index))?;
        Ok(changed)
    }

    /// Add a skill to a bucket unless it is already listed there
    pub fn add_skill(&mut self, bucket: SkillBucket, skill: &str) -> Result<()> {
        let skill = skill.trim().to_string();
        if skill.is_empty() {
            return Ok(());
        }
        self.edit(|p| {
            let list = p.skills.bucket_mut(bucket);
            if !list.contains(&skill) {
                list.push(skill);
            }
        })
    }

    /// Replace the skills of a bucket
    pub fn set_skills(&mut self, bucket: SkillBucket, skills: Vec<String>) -> Result<()> {
        self.edit(|p| *p.skills.bucket_mut(bucket) = skills)
    }

    /// Chosen template (`Classic` when unset or unrecognised)
    pub fn template(&self) -> Result<ResumeTemplate> {
        let template = match self.kv.get(TEMPLATE_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using the default template", e);
                ResumeTemplate::default()
            }),
            None => ResumeTemplate::default(),
        };
        Ok(template)
    }

    pub fn set_template(&self, template: ResumeTemplate) -> Result<()> {
        self.kv.set(TEMPLATE_KEY, &template.to_string())
    }

    /// Chosen accent color
    pub fn accent_color(&self) -> Result<String> {
        Ok(self
            .kv
            .get(ACCENT_KEY)?
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string()))
    }

    pub fn set_accent_color(&self, color: &str) -> Result<()> {
        self.kv.set(ACCENT_KEY, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_store_defaults() {
        let kv = MemoryStore::new();
        let store = ResumeProfileStore::open(&kv).unwrap();
        assert_eq!(store.profile(), &ResumeProfile::default());
        assert_eq!(store.template().unwrap(), ResumeTemplate::Classic);
        assert_eq!(store.accent_color().unwrap(), DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_unparsable_profile_falls_back() {
        let kv = MemoryStore::new();
        kv.set(RESUME_KEY, "{broken").unwrap();
        let store = ResumeProfileStore::open(&kv).unwrap();
        assert_eq!(store.profile(), &ResumeProfile::default());
    }

    #[test]
    fn test_legacy_skills_migrated_and_written_back() {
        let kv = MemoryStore::new();
        kv.set(
            RESUME_KEY,
            r#"{"personalInfo":{"name":"Rahul"},"skills":"React, Javascript , ,Node.js"}"#,
        )
        .unwrap();

        let store = ResumeProfileStore::open(&kv).unwrap();
        assert_eq!(store.profile().personal_info.name, "Rahul");
        assert_eq!(
            store.profile().skills.technical,
            vec!["React", "Javascript", "Node.js"]
        );
        assert!(store.profile().skills.soft.is_empty());

        let stored: Value = serde_json::from_str(&kv.get(RESUME_KEY).unwrap().unwrap()).unwrap();
        assert!(stored["skills"].is_object());
    }

    #[test]
    fn test_grouped_skills_untouched() {
        let mut value = json!({"skills": {"technical": ["Rust"], "soft": [], "tools": []}});
        assert!(!migrate_legacy_skills(&mut value));
        assert_eq!(value["skills"]["technical"][0], "Rust");
    }

    #[test]
    fn test_edits_write_through() {
        let kv = MemoryStore::new();
        {
            let mut store = ResumeProfileStore::open(&kv).unwrap();
            store.set_field(ProfileField::Name, "Asha").unwrap();
            store.set_field(ProfileField::Linkedin, "li/asha").unwrap();
            store
                .add_experience(Experience {
                    company: "Acme".into(),
                    ..Experience::default()
                })
                .unwrap();
            assert!(store
                .update_experience(0, |e| e.description = "Built the billing system".into())
                .unwrap());
            assert!(!store.update_experience(5, |e| e.role = "x".into()).unwrap());
            store.add_skill(SkillBucket::Tools, "Git").unwrap();
            store.add_skill(SkillBucket::Tools, "Git").unwrap();
        }

        let store = ResumeProfileStore::open(&kv).unwrap();
        let profile = store.profile();
        assert_eq!(profile.personal_info.name, "Asha");
        assert_eq!(profile.links.linkedin, "li/asha");
        assert_eq!(profile.experience[0].description, "Built the billing system");
        assert_eq!(profile.skills.tools, vec!["Git"]);
    }

    #[test]
    fn test_remove_entries() {
        let kv = MemoryStore::new();
        let mut store = ResumeProfileStore::open(&kv).unwrap();
        store.load_sample().unwrap();
        assert_eq!(store.profile().projects.len(), 2);
        assert!(store.remove_project(0).unwrap());
        assert_eq!(store.profile().projects[0].title, "Task Manager Pro");
        assert!(!store.remove_education(3).unwrap());
    }

    #[test]
    fn test_import_json() {
        let kv = MemoryStore::new();
        let mut store = ResumeProfileStore::open(&kv).unwrap();
        store
            .import_json(r#"{"summary":"Imported","skills":"Rust, Go"}"#)
            .unwrap();
        assert_eq!(store.profile().summary, "Imported");
        assert_eq!(store.profile().skills.technical, vec!["Rust", "Go"]);

        assert!(store.import_json("[1, 2").is_err());
        assert!(store.import_json(r#"{"education": 3}"#).is_err());
        assert_eq!(store.profile().summary, "Imported");
    }

    #[test]
    fn test_assessment_tracks_edits() {
        let kv = MemoryStore::new();
        let mut store = ResumeProfileStore::open(&kv).unwrap();
        assert_eq!(store.assessment().score, 0);
        store.set_field(ProfileField::Name, "Asha").unwrap();
        assert_eq!(store.assessment().score, 10);
    }

    #[test]
    fn test_template_and_accent() {
        let kv = MemoryStore::new();
        let store = ResumeProfileStore::open(&kv).unwrap();
        store.set_template(ResumeTemplate::Modern).unwrap();
        store.set_accent_color("hsl(0,0%,10%)").unwrap();
        assert_eq!(store.template().unwrap(), ResumeTemplate::Modern);
        assert_eq!(store.accent_color().unwrap(), "hsl(0,0%,10%)");

        kv.set(TEMPLATE_KEY, "Fancy").unwrap();
        assert_eq!(store.template().unwrap(), ResumeTemplate::Classic);
    }
}
