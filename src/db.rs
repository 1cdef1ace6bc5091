// ==========================================
// Aid Registry - SQLite connection setup
// ==========================================
// Goal:
// - one place for PRAGMA settings of every Connection::open
// - idempotent schema creation (config_kv + entity_record)
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version written by `ensure_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Env var that overrides the default database location
pub const DB_PATH_ENV: &str = "AID_REGISTRY_DB_PATH";

/// Per-connection PRAGMA settings
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection with the shared settings applied
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create tables if missing
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS entity_record (
            id TEXT PRIMARY KEY,
            entity TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entity_record_entity
            ON entity_record (entity, created_at);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Default database path: env override, then the user data dir, then cwd
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let path = dirs::data_dir()
        .map(|dir| dir.join("aid-registry").join("aid_registry.db"))
        .unwrap_or_else(|| PathBuf::from("./aid_registry.db"));

    if let Some(parent) = path.parent() {
        // best effort; Connection::open reports the real failure
        let _ = std::fs::create_dir_all(parent);
    }

    path.to_string_lossy().to_string()
}
