//! Release test checklist
//!
//! A fixed list of manual verification steps whose pass/fail state is kept
//! under its own storage key.

use crate::storage::{KeyValueStore, CHECKLIST_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One manual verification step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub hint: String,
    #[serde(default)]
    pub passed: bool,
}

/// Count of passed items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub passed: usize,
    pub total: usize,
}

const DEFAULT_ITEMS: [(&str, &str, &str); 10] = [
    ("jd-req", "JD required validation works", "Try analyzing with an empty JD."),
    (
        "short-jd",
        "Short JD warning shows for <200 chars",
        "Analyze \"hello\" and check for the short JD warning.",
    ),
    (
        "skills-group",
        "Skills extraction groups correctly",
        "Ensure React is in \"Web\", Java in \"Languages\".",
    ),
    (
        "round-mapping",
        "Round mapping changes based on company + skills",
        "Compare Enterprise vs Startup mappings.",
    ),
    (
        "score-det",
        "Score calculation is deterministic",
        "Same JD should yield same base score.",
    ),
    (
        "live-score",
        "Skill toggles update score live",
        "Toggle a skill and see the score change by 2.",
    ),
    (
        "persistence",
        "Changes persist after restart",
        "Toggle a skill, run show again, verify state.",
    ),
    (
        "history-res",
        "History saves and loads correctly",
        "Check if the new analysis appears in the history list.",
    ),
    (
        "export-copy",
        "Export produces the correct content",
        "Export each section and compare with the results view.",
    ),
    (
        "no-console",
        "No warnings on core commands",
        "Run with --verbose and check for unexpected warnings.",
    ),
];

/// The checklist with nothing passed
pub fn default_items() -> Vec<ChecklistItem> {
    DEFAULT_ITEMS
        .iter()
        .map(|(id, label, hint)| ChecklistItem {
            id: id.to_string(),
            label: label.to_string(),
            hint: hint.to_string(),
            passed: false,
        })
        .collect()
}

/// Store for the checklist state
pub struct ChecklistStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> ChecklistStore<'a> {
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    /// Current items, or the defaults when nothing usable is stored
    pub fn get(&self) -> Result<Vec<ChecklistItem>> {
        let Some(raw) = self.kv.get(CHECKLIST_KEY)? else {
            return Ok(default_items());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!("Stored checklist is unreadable, using defaults: {}", e);
                Ok(default_items())
            }
        }
    }

    /// Persist the given items
    pub fn update(&self, items: &[ChecklistItem]) -> Result<()> {
        let json = serde_json::to_string(items).context("Failed to serialize checklist")?;
        self.kv.set(CHECKLIST_KEY, &json)
    }

    /// Mark one item passed or failed
    ///
    /// Returns false when no item has that id.
    pub fn set_passed(&self, id: &str, passed: bool) -> Result<bool> {
        let mut items = self.get()?;
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(false);
        };
        item.passed = passed;
        self.update(&items)?;
        Ok(true)
    }

    /// Restore and persist the defaults
    pub fn reset(&self) -> Result<Vec<ChecklistItem>> {
        let items = default_items();
        self.update(&items)?;
        tracing::info!("Checklist reset");
        Ok(items)
    }

    pub fn summary(&self) -> Result<ChecklistSummary> {
        let items = self.get()?;
        Ok(ChecklistSummary {
            passed: items.iter().filter(|i| i.passed).count(),
            total: items.len(),
        })
    }

    pub fn is_complete(&self) -> Result<bool> {
        Ok(self.get()?.iter().all(|i| i.passed))
    }
}
