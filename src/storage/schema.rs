//! Database schema definition

/// SQL schema for the placement-prep database
pub const SCHEMA: &str = r#"
-- Key-value store: one JSON blob per fixed key
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
