//! Placement Prep - local-first interview preparation toolkit
//!
//! This library turns a job description into a skill breakdown, interview
//! round mapping, seven-day plan, question bank and readiness score, keeps a
//! history of analyses, and scores a résumé draft for ATS readiness.

pub mod analysis;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod export;
pub mod resume;
pub mod storage;

/// Re-export commonly used types
pub use analysis::{analyze_jd, AnalysisRecord};
pub use config::AppConfig;
pub use resume::{score_resume, ResumeProfile};
pub use storage::{Database, HistoryStore, KeyValueStore};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "placement-prep";
