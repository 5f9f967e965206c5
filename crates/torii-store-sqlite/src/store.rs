//! SQLite implementation of `TokenStore`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use torii_store::{generate_secret, AuthToken, Principal, StoreError, TokenStore};

use crate::migrations::run_migrations;

/// Column list shared across token SELECT queries.
const TOKEN_COLS: &str = "secret, owner, description, created_at, last_used_at";

/// SQLite-backed principal and token store.
pub struct SqliteTokenStore {
    conn: Mutex<Connection>,
}

impl SqliteTokenStore {
    /// Opens or creates a SQLite database at the given path and runs
    /// pending migrations.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path).map_err(|e| StoreError::Storage {
            message: e.to_string(),
        })?)
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory().map_err(|e| {
            StoreError::Storage {
                message: e.to_string(),
            }
        })?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|e| StoreError::Storage {
            message: e.to_string(),
        })
    }

    fn find_principal(
        conn: &Connection,
        username: &str,
    ) -> Result<Option<Principal>, StoreError> {
        conn.query_row(
            "SELECT username, active FROM principals WHERE username = ?1",
            params![username],
            row_to_principal,
        )
        .optional()
        .map_err(map_sqlite_err)
    }
}

/// Maps a `rusqlite::Error` to a `StoreError::Storage`.
fn map_sqlite_err(e: rusqlite::Error) -> StoreError {
    StoreError::Storage {
        message: e.to_string(),
    }
}

fn row_to_principal(row: &Row<'_>) -> rusqlite::Result<Principal> {
    Ok(Principal {
        username: row.get(0)?,
        active: row.get::<_, i64>(1)? != 0,
    })
}

fn row_to_token(row: &Row<'_>) -> rusqlite::Result<AuthToken> {
    Ok(AuthToken {
        secret: row.get(0)?,
        owner: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        last_used_at: row.get(4)?,
    })
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn ensure_principal(&self, username: &str) -> Result<Principal, StoreError> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO principals (username, active) VALUES (?1, 1)",
            params![username],
        )
        .map_err(map_sqlite_err)?;
        Self::find_principal(&conn, username)?.ok_or_else(|| StoreError::Storage {
            message: format!("principal vanished after insert: {username}"),
        })
    }

    async fn set_principal_active(
        &self,
        username: &str,
        active: bool,
    ) -> Result<(), StoreError> {
        let conn = self.lock_conn()?;
        let affected = conn
            .execute(
                "UPDATE principals SET active = ?2 WHERE username = ?1",
                params![username, active as i64],
            )
            .map_err(map_sqlite_err)?;
        if affected == 0 {
            return Err(StoreError::UnknownPrincipal {
                username: username.to_string(),
            });
        }
        Ok(())
    }

    async fn create_token(
        &self,
        owner: &str,
        description: &str,
    ) -> Result<AuthToken, StoreError> {
        let conn = self.lock_conn()?;
        if Self::find_principal(&conn, owner)?.is_none() {
            return Err(StoreError::UnknownPrincipal {
                username: owner.to_string(),
            });
        }
        let secret = generate_secret();
        conn.execute(
            "INSERT INTO auth_tokens (secret, owner, description) VALUES (?1, ?2, ?3)",
            params![secret, owner, description],
        )
        .map_err(map_sqlite_err)?;
        let sql = format!("SELECT {TOKEN_COLS} FROM auth_tokens WHERE secret = ?1");
        conn.query_row(&sql, params![secret], row_to_token)
            .map_err(map_sqlite_err)
    }

    async fn list_tokens(&self, owner: Option<&str>) -> Result<Vec<AuthToken>, StoreError> {
        let conn = self.lock_conn()?;
        let (sql, filter) = match owner {
            Some(owner) => (
                format!(
                    "SELECT {TOKEN_COLS} FROM auth_tokens WHERE owner = ?1 ORDER BY created_at"
                ),
                vec![owner],
            ),
            None => (
                format!("SELECT {TOKEN_COLS} FROM auth_tokens ORDER BY created_at"),
                vec![],
            ),
        };
        let mut stmt = conn.prepare(&sql).map_err(map_sqlite_err)?;
        let tokens = stmt
            .query_map(rusqlite::params_from_iter(filter), row_to_token)
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_err)?;
        Ok(tokens)
    }

    async fn revoke_token(&self, secret: &str) -> Result<bool, StoreError> {
        let conn = self.lock_conn()?;
        let affected = conn
            .execute(
                "DELETE FROM auth_tokens WHERE secret = ?1",
                params![secret],
            )
            .map_err(map_sqlite_err)?;
        Ok(affected > 0)
    }

    async fn lookup_principal_by_secret(
        &self,
        secret: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let conn = self.lock_conn()?;
        let principal = conn
            .query_row(
                "SELECT p.username, p.active
                 FROM auth_tokens t
                 JOIN principals p ON p.username = t.owner
                 WHERE t.secret = ?1",
                params![secret],
                row_to_principal,
            )
            .optional()
            .map_err(map_sqlite_err)?;
        if principal.is_some() {
            conn.execute(
                "UPDATE auth_tokens SET last_used_at = datetime('now') WHERE secret = ?1",
                params![secret],
            )
            .map_err(map_sqlite_err)?;
        }
        Ok(principal)
    }
}
