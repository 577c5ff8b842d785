//! Analysis history persistence
//!
//! History is one JSON array, newest first. Loading validates every element and
//! keeps only the valid ones; dropped entries are reported through the
//! `corrupted` flag and are lost on the next write.

use super::{KeyValueStore, HISTORY_KEY};
use crate::analysis::{AnalysisRecord, RecordPatch, MAX_SCORE};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a persisted history entry was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("entry has no id")]
    MissingId,
    #[error("entry has no jdText")]
    MissingJdText,
    /// Still unreadable after every other field was reset to its default
    #[error("entry is malformed: {0}")]
    Malformed(String),
}

/// Outcome of validating one persisted entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidation {
    Valid(Box<AnalysisRecord>),
    Invalid(InvalidReason),
}

/// Result of loading the history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLoad {
    /// Valid records, newest first
    pub list: Vec<AnalysisRecord>,
    /// Set when the blob was unreadable or any entry was dropped
    pub corrupted: bool,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_text(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

/// Score field written by records saved before base and final scores existed
const LEGACY_SCORE_KEY: &str = "readinessScore";

fn adopt_legacy_score(object: &mut Map<String, Value>) {
    let Some(legacy) = object.get(LEGACY_SCORE_KEY).and_then(Value::as_u64) else {
        return;
    };
    let score = Value::from(legacy.min(u64::from(MAX_SCORE)));
    for key in ["baseScore", "finalScore"] {
        if !object.contains_key(key) {
            object.insert(key.to_string(), score.clone());
        }
    }
}

/// Validate one persisted history entry
///
/// An entry needs a truthy `id` and `jdText`. Every other field falls back to
/// its default when missing or of the wrong type. Non-string ids and JD texts
/// are kept in their JSON text form.
pub fn validate_entry(entry: &Value) -> EntryValidation {
    let Some(object) = entry.as_object() else {
        return EntryValidation::Invalid(InvalidReason::NotAnObject);
    };

    let Some(id) = object.get("id").filter(|v| is_truthy(v)) else {
        return EntryValidation::Invalid(InvalidReason::MissingId);
    };
    let Some(jd_text) = object.get("jdText").filter(|v| is_truthy(v)) else {
        return EntryValidation::Invalid(InvalidReason::MissingJdText);
    };

    let id = as_text(id);
    let jd_text = as_text(jd_text);

    let mut object = object.clone();
    object.insert("id".to_string(), id.clone());
    object.insert("jdText".to_string(), jd_text.clone());
    adopt_legacy_score(&mut object);

    // drop fields that do not fit so they take their defaults
    let keys: Vec<String> = object.keys().cloned().collect();
    for key in keys {
        if key == "id" || key == "jdText" {
            continue;
        }
        let Some(value) = object.get(&key) else {
            continue;
        };
        let mut single = Map::new();
        single.insert("id".to_string(), id.clone());
        single.insert("jdText".to_string(), jd_text.clone());
        single.insert(key.clone(), value.clone());
        if let Err(e) = serde_json::from_value::<AnalysisRecord>(Value::Object(single)) {
            tracing::debug!("Resetting history field {:?} to its default: {}", key, e);
            object.remove(&key);
        }
    }

    match serde_json::from_value::<AnalysisRecord>(Value::Object(object)) {
        Ok(record) => EntryValidation::Valid(Box::new(record)),
        Err(e) => EntryValidation::Invalid(InvalidReason::Malformed(e.to_string())),
    }
}

/// Store for the analysis history
pub struct HistoryStore<'a> {
    kv: &'a dyn KeyValueStore,
}

impl<'a> HistoryStore<'a> {
    /// Create a history store over a key-value backend
    pub fn new(kv: &'a dyn KeyValueStore) -> Self {
        Self { kv }
    }

    /// Load and validate the persisted history
    pub fn load(&self) -> Result<HistoryLoad> {
        let raw = match self.kv.get(HISTORY_KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(HistoryLoad::default()),
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!("Persisted history is not an array, ignoring it");
                return Ok(HistoryLoad {
                    list: Vec::new(),
                    corrupted: true,
                });
            }
            Err(e) => {
                tracing::warn!("Persisted history is not valid JSON: {}", e);
                return Ok(HistoryLoad {
                    list: Vec::new(),
                    corrupted: true,
                });
            }
        };

        let total = entries.len();
        let mut list = Vec::with_capacity(total);
        for (index, entry) in entries.iter().enumerate() {
            match validate_entry(entry) {
                EntryValidation::Valid(record) => list.push(*record),
                EntryValidation::Invalid(reason) => {
                    tracing::warn!("Dropping history entry {}: {}", index, reason);
                }
            }
        }

        let corrupted = list.len() != total;
        Ok(HistoryLoad { list, corrupted })
    }

    /// All valid records, newest first
    pub fn list(&self) -> Result<Vec<AnalysisRecord>> {
        Ok(self.load()?.list)
    }

    fn persist(&self, list: &[AnalysisRecord]) -> Result<()> {
        let json = serde_json::to_string(list).context("Failed to serialize history")?;
        self.kv.set(HISTORY_KEY, &json)
    }

    /// Prepend a record and persist the whole history
    pub fn save(&self, record: &AnalysisRecord) -> Result<()> {
        let mut list = self.load()?.list;
        list.insert(0, record.clone());
        self.persist(&list)?;

        tracing::info!("Saved analysis {} ({} in history)", record.id, list.len());
        Ok(())
    }

    /// Merge a patch into the record with the given id
    ///
    /// Returns `None` when no record has that id.
    pub fn update(&self, id: &str, patch: RecordPatch) -> Result<Option<AnalysisRecord>> {
        let mut list = self.load()?.list;
        let Some(record) = list.iter_mut().find(|r| r.id == id) else {
            tracing::debug!("No analysis with id {}", id);
            return Ok(None);
        };

        record.apply(patch);
        record.updated_at = Utc::now();
        let updated = record.clone();

        self.persist(&list)?;
        Ok(Some(updated))
    }

    /// Find a record by id
    pub fn get_by_id(&self, id: &str) -> Result<Option<AnalysisRecord>> {
        Ok(self.load()?.list.into_iter().find(|r| r.id == id))
    }

    /// Most recent record
    pub fn latest(&self) -> Result<Option<AnalysisRecord>> {
        Ok(self.load()?.list.into_iter().next())
    }

    /// Flip one skill's confidence on a stored record and persist the new score
    pub fn toggle_skill(&self, id: &str, skill: &str) -> Result<Option<AnalysisRecord>> {
        let Some(mut record) = self.get_by_id(id)? else {
            return Ok(None);
        };

        let confidence = record.toggle_skill(skill);
        tracing::info!(
            "Marked {:?} as {} on {} (score {})",
            skill,
            confidence,
            id,
            record.final_score
        );

        self.update(id, RecordPatch::confidence_from(&record))
    }
}
