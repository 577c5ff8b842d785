//! Résumé draft model, readiness scoring and persistence
//!
//! The draft is a single mutable profile edited field by field. Its readiness
//! assessment is never stored; it is recomputed from the whole profile.

mod scorer;
mod store;

pub use scorer::{score_resume, ResumeAssessment, Suggestion, ACTION_VERBS, MAX_SUGGESTIONS};
pub use store::{
    migrate_legacy_skills, ProfileField, ResumeProfileStore, ResumeTemplate, DEFAULT_ACCENT_COLOR,
};

use serde::{Deserialize, Serialize};

/// Contact details at the top of the résumé
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub live_url: String,
    pub github_url: String,
}

/// Skills grouped into three buckets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub tools: Vec<String>,
}

impl SkillSet {
    /// Total number of skills across all buckets
    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len() + self.tools.len()
    }

    /// Mutable access to one bucket
    pub fn bucket_mut(&mut self, bucket: SkillBucket) -> &mut Vec<String> {
        match bucket {
            SkillBucket::Technical => &mut self.technical,
            SkillBucket::Soft => &mut self.soft,
            SkillBucket::Tools => &mut self.tools,
        }
    }
}

/// One of the three skill buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SkillBucket {
    Technical,
    Soft,
    Tools,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
}

/// The résumé draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeProfile {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: SkillSet,
    pub links: Links,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ResumeProfile {
    /// A filled-in example draft
    pub fn sample() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "Rahul Coder".to_string(),
                email: "rahul@example.com".to_string(),
                phone: "+91 98765 43210".to_string(),
                location: "Bangalore, India".to_string(),
            },
            summary: "Passionate software developer with 3+ years of experience in building \
                      scalable web applications using React and Node.js. Expertise in \
                      full-stack development and UI/UX design."
                .to_string(),
            education: vec![Education {
                school: "KodNest University".to_string(),
                degree: "B.Tech in Computer Science".to_string(),
                year: "2019-2023".to_string(),
            }],
            experience: vec![
                Experience {
                    company: "Tech Solutions".to_string(),
                    role: "Frontend Developer".to_string(),
                    duration: "2023 - Present".to_string(),
                    description: "Developing premium web interfaces and optimizing performance."
                        .to_string(),
                },
                Experience {
                    company: "Code Crafters".to_string(),
                    role: "Junior Intern".to_string(),
                    duration: "2022-2023".to_string(),
                    description: "Assisted in building responsive dashboards.".to_string(),
                },
            ],
            projects: vec![
                Project {
                    title: "AI Portfolio Builder".to_string(),
                    description: "An automated platform for generating developer portfolios."
                        .to_string(),
                    tech_stack: strings(&["React", "Node.js"]),
                    ..Project::default()
                },
                Project {
                    title: "Task Manager Pro".to_string(),
                    description: "A collaborative tool for team project management.".to_string(),
                    ..Project::default()
                },
            ],
            skills: SkillSet {
                technical: strings(&[
                    "React",
                    "Javascript",
                    "Node.js",
                    "Tailwind CSS",
                    "PostgreSQL",
                ]),
                soft: Vec::new(),
                tools: strings(&["Git"]),
            },
            links: Links {
                github: "https://github.com/rahul-coder".to_string(),
                linkedin: "https://linkedin.com/in/rahul-coder".to_string(),
            },
        }
    }
}
