//! CLI interface using clap
//!
//! Provides the command-line interface for Placement Prep

mod commands;

pub use commands::*;

use crate::export::ExportSection;
use crate::resume::{ProfileField, ResumeTemplate, SkillBucket};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Placement Prep - job description analysis and résumé readiness
#[derive(Parser, Debug)]
#[command(name = "placement-prep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (overrides the configured path)
    #[arg(long, global = true, env = "PLACEMENT_PREP_DB")]
    pub db: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "PLACEMENT_PREP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a job description and save it to history
    Analyze(AnalyzeArgs),

    /// List saved analyses, newest first
    History(HistoryArgs),

    /// Show a saved analysis (the latest by default)
    Show(ShowArgs),

    /// Flip a skill between "practice" and "know"
    Toggle(ToggleArgs),

    /// Export an analysis as plain text
    Export(ExportArgs),

    /// Edit and score the résumé draft
    Resume(ResumeArgs),

    /// Track the release test checklist
    Checklist(ChecklistArgs),

    /// Show or reset configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for analyze command
#[derive(Parser, Debug)]
#[command(group = clap::ArgGroup::new("source").required(true).args(["jd", "file"]))]
pub struct AnalyzeArgs {
    /// Company name
    #[arg(short, long, default_value = "")]
    pub company: String,

    /// Role title
    #[arg(short, long, default_value = "")]
    pub role: String,

    /// Job description text
    #[arg(long)]
    pub jd: Option<String>,

    /// Read the job description from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Arguments for history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// List every entry instead of the most recent few
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Analysis id (defaults to the latest)
    pub id: Option<String>,
}

/// Arguments for toggle command
#[derive(Parser, Debug)]
pub struct ToggleArgs {
    /// Skill to toggle, as extracted
    pub skill: String,

    /// Analysis id (defaults to the latest)
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Section to export
    #[arg(short, long, value_enum, default_value = "full")]
    pub section: ExportSection,

    /// Analysis id (defaults to the latest)
    #[arg(long)]
    pub id: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write to Placement_Prep_<company>_<role>.txt in the current directory
    #[arg(long)]
    pub save: bool,
}

/// Arguments for resume command
#[derive(Args, Debug)]
pub struct ResumeArgs {
    #[command(subcommand)]
    pub action: ResumeCommand,
}

/// Résumé subcommands
#[derive(Subcommand, Debug)]
pub enum ResumeCommand {
    /// Show the ATS readiness score and top suggestions
    Score,

    /// Print the draft
    Show,

    /// Set a single field
    Set {
        #[arg(value_enum)]
        field: ProfileField,
        value: String,
    },

    /// Add an entry or a skill
    #[command(subcommand)]
    Add(ResumeAddCommand),

    /// Remove an entry by its position (starting at 1)
    Remove {
        #[arg(value_enum)]
        section: ResumeSection,
        position: usize,
    },

    /// Replace the draft with a JSON file
    Import { file: PathBuf },

    /// Replace the draft with sample data
    Sample,

    /// Show or set the template
    Template {
        #[arg(value_enum)]
        template: Option<ResumeTemplate>,
    },

    /// Show or set the accent color
    Accent { color: Option<String> },

    /// Print the draft as plain text
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Entries that can be added to the draft
#[derive(Subcommand, Debug)]
pub enum ResumeAddCommand {
    Education {
        #[arg(long)]
        school: String,
        #[arg(long, default_value = "")]
        degree: String,
        #[arg(long, default_value = "")]
        year: String,
    },
    Experience {
        #[arg(long)]
        company: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Project {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated technologies
        #[arg(long, value_delimiter = ',')]
        tech: Vec<String>,
        #[arg(long, default_value = "")]
        live_url: String,
        #[arg(long, default_value = "")]
        github_url: String,
    },
    Skill {
        #[arg(value_enum)]
        bucket: SkillBucket,
        name: String,
    },
}

/// Draft sections holding removable entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResumeSection {
    Education,
    Experience,
    Project,
}

/// Arguments for checklist command
#[derive(Args, Debug)]
pub struct ChecklistArgs {
    #[command(subcommand)]
    pub action: Option<ChecklistCommand>,
}

/// Checklist subcommands
#[derive(Subcommand, Debug)]
pub enum ChecklistCommand {
    /// List every item with its state
    Show,
    /// Mark an item as passed
    Pass { id: String },
    /// Mark an item as not passed
    Fail { id: String },
    /// Clear every item
    Reset,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Reset to defaults
    #[arg(long)]
    pub reset: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
