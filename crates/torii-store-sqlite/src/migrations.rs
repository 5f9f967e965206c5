//! Database schema migrations for the token store.

use rusqlite::Connection;
use torii_store::StoreError;

/// Current schema version.
const SCHEMA_VERSION: u32 = 1;

/// Runs all pending migrations on the database.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    let current = get_schema_version(conn)?;

    if current < 1 {
        migrate_v1(conn)?;
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Creates the initial schema (v1).
fn migrate_v1(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS principals (
            username TEXT PRIMARY KEY NOT NULL,
            active   INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS auth_tokens (
            secret       TEXT PRIMARY KEY NOT NULL,
            owner        TEXT NOT NULL REFERENCES principals(username),
            description  TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            last_used_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_auth_tokens_owner ON auth_tokens(owner);",
    )
    .map_err(|e| StoreError::Storage {
        message: format!("migration v1 failed: {e}"),
    })
}

/// Reads the current schema version from PRAGMA user_version.
fn get_schema_version(conn: &Connection) -> Result<u32, StoreError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StoreError::Storage {
            message: format!("failed to read schema version: {e}"),
        })
}

/// Sets the schema version via PRAGMA user_version.
fn set_schema_version(conn: &Connection, version: u32) -> Result<(), StoreError> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| StoreError::Storage {
            message: format!("failed to set schema version: {e}"),
        })
}
