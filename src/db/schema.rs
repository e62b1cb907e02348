//! SQL DDL for initializing the config storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `key` UNIQUE (creates an index implicitly)
/// - `value` stored as text whatever its declared type
/// - `type` defaults to `string`; never validated here
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS configs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "key" TEXT NOT NULL UNIQUE,
    value TEXT NOT NULL,
    type TEXT NOT NULL DEFAULT 'string'
);

CREATE INDEX IF NOT EXISTS idx_configs_key ON configs("key");
"#;
