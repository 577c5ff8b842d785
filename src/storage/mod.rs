//! Persistent storage layer
//!
//! Every piece of state lives under a fixed key as one JSON blob:
//! - Analysis history
//! - Résumé draft, template choice and accent color
//! - Release test checklist
//!
//! Stores talk to a [`KeyValueStore`], so the engine runs the same against
//! SQLite on disk or the in-memory fake used by tests.

mod history;
mod schema;

pub use history::{validate_entry, EntryValidation, HistoryLoad, HistoryStore, InvalidReason};
pub use schema::SCHEMA;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Key holding the analysis history array
pub const HISTORY_KEY: &str = "placement_prep_history";
/// Key holding the résumé draft
pub const RESUME_KEY: &str = "ai_resume_data";
/// Key holding the résumé template name
pub const TEMPLATE_KEY: &str = "ai_resume_template";
/// Key holding the résumé accent color
pub const ACCENT_KEY: &str = "ai_resume_accent";
/// Key holding the release test checklist
pub const CHECKLIST_KEY: &str = "prp_test_checklist";

/// Opaque string storage addressed by key
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store (for testing)
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {:?}", parent))?;
            }
        }

        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open database at {:?}", path.as_ref()))?;

        let db = Self { conn };
        db.initialize()?;

        tracing::debug!("Opened database at {:?}", path.as_ref());
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Get storage statistics
    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let (keys, bytes): (i64, i64) = self
            .conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(LENGTH(value)), 0) FROM kv_store",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .context("Failed to read storage statistics")?;

        Ok(DatabaseStats {
            keys: keys as usize,
            bytes: bytes as usize,
        })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read key {:?}", key))?;

        Ok(result)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))",
                params![key, value],
            )
            .with_context(|| format!("Failed to write key {:?}", key))?;
        Ok(())
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DatabaseStats {
    pub keys: usize,
    pub bytes: usize,
}
