//! SQLite-backed [`TodoStore`] implementation.
//!
//! One database file per server instance, living under the configured
//! `work_dir`. The connection is opened with WAL journal mode, foreign keys
//! on, and a 5 s busy timeout; the schema is guarded by `PRAGMA user_version`
//! so the DDL runs once per database file.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::domain::{Todo, TodoStore};
use crate::error::AppError;

/// Schema version stored in `PRAGMA user_version`.
/// Increment when the DDL changes; add a migration path in [`SqliteTodoStore::open`].
const SCHEMA_VERSION: i64 = 1;

/// Execute the v1 schema DDL on a freshly-opened connection.
///
/// Timestamps are stored as RFC 3339 text; completion state as 0/1.
fn init_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        PRAGMA user_version = 1;
        ",
    )
    .map_err(|e| AppError::Storage(format!("initialize schema: {e}")))
}

/// Open a SQLite connection to `db_path` and apply recommended pragmas.
///
/// Pragmas applied:
/// - `journal_mode = WAL` — allows concurrent readers alongside a writer.
/// - `foreign_keys = ON` — enforce FK constraints.
/// - `busy_timeout = 5000` — wait up to 5 s before returning `SQLITE_BUSY`.
fn open_conn(db_path: &Path) -> Result<Connection, AppError> {
    let conn = Connection::open(db_path)
        .map_err(|e| AppError::Storage(format!("open {}: {e}", db_path.display())))?;

    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| AppError::Storage(format!("set journal_mode WAL: {e}")))?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(|e| AppError::Storage(format!("set foreign_keys ON: {e}")))?;
    conn.pragma_update(None, "busy_timeout", 5000)
        .map_err(|e| AppError::Storage(format!("set busy_timeout: {e}")))?;

    Ok(conn)
}

/// Current UTC time as an RFC 3339 string with second precision, e.g.
/// `"2025-04-01T12:00:00Z"`.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::Storage(format!("bad timestamp '{s}': {e}")))
}

/// Raw row shape before timestamp parsing.
type TodoRow = (String, String, bool, String, String);

fn row_to_todo(row: TodoRow) -> Result<Todo, AppError> {
    let (id, title, is_completed, created_at, updated_at) = row;
    Ok(Todo {
        id,
        title,
        is_completed,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

// ── SqliteTodoStore ───────────────────────────────────────────────────────────

pub struct SqliteTodoStore {
    /// Single shared connection; the API workload is small enough that one
    /// writer behind a mutex is sufficient.
    conn: Mutex<Connection>,
}

impl SqliteTodoStore {
    /// Open (creating if necessary) the database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self, AppError> {
        let conn = open_conn(db_path)?;

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(|e| AppError::Storage(format!("read user_version: {e}")))?;
        if version < SCHEMA_VERSION {
            init_schema(&conn)?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn
            .lock()
            .map_err(|_| AppError::Storage("store mutex poisoned".to_string()))
    }
}

impl TodoStore for SqliteTodoStore {
    fn list(&self) -> Result<Vec<Todo>, AppError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, is_completed, created_at, updated_at
                 FROM todos ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| AppError::Storage(format!("prepare list: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })
            .map_err(|e| AppError::Storage(format!("list todos: {e}")))?
            .collect::<Result<Vec<TodoRow>, _>>()
            .map_err(|e| AppError::Storage(format!("list todos: {e}")))?;

        rows.into_iter().map(row_to_todo).collect()
    }

    fn get(&self, id: &str) -> Result<Option<Todo>, AppError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT id, title, is_completed, created_at, updated_at
                 FROM todos WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| AppError::Storage(format!("get todo: {e}")))?;

        row.map(row_to_todo).transpose()
    }

    fn create(&self, title: &str) -> Result<Todo, AppError> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO todos (id, title, is_completed, created_at, updated_at)
                 VALUES (?1, ?2, 0, ?3, ?3)",
                params![id, title, now],
            )
            .map_err(|e| AppError::Storage(format!("create todo: {e}")))?;
        }

        // Read back so the returned entity always reflects a stored row.
        self.get(&id)?
            .ok_or_else(|| AppError::Storage("created todo not found on read-back".to_string()))
    }

    fn update(
        &self,
        id: &str,
        title: &str,
        is_completed: bool,
    ) -> Result<Option<Todo>, AppError> {
        let affected = {
            let conn = self.conn()?;
            conn.execute(
                "UPDATE todos SET title = ?2, is_completed = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![id, title, is_completed, now_iso8601()],
            )
            .map_err(|e| AppError::Storage(format!("update todo: {e}")))?
        };

        if affected == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    fn delete(&self, id: &str) -> Result<(), AppError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM todos WHERE id = ?1", params![id])
            .map_err(|e| AppError::Storage(format!("delete todo: {e}")))?;
        Ok(())
    }
}
