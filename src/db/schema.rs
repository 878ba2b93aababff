//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `nurses` table (one record per row, `id` is a server-assigned UUID string)
///
/// Listing follows `rowid`, i.e. insertion order.
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Nurse records
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS nurses (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NULL,
    license_number TEXT NULL,
    dob TEXT NULL,
    age TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL  -- RFC3339
);
"#;
