// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite scan store.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;

use super::{Backend, ScanStore};
use crate::error::{Error, Result};
use crate::scan::{ScanCounts, ScanRecord};

/// SQL schema for the scan database.
///
/// `seq` carries insertion order; `id` is the public identifier.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS scans (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    crate_id TEXT NOT NULL,
    bread_quantity INTEGER NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0,
    error TEXT,
    attempts INTEGER NOT NULL DEFAULT 0,
    quarantined INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_scans_pending ON scans(synced, quarantined, seq);
"#;

const COLUMNS: &str =
    "id, crate_id, bread_quantity, payload, created_at, synced, error, attempts, quarantined";

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(4, format!("invalid timestamp '{value}' in column 'created_at'")))
}

fn parse_payload(value: &str) -> std::result::Result<serde_json::Value, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|e| conversion_error(3, format!("invalid payload json: {e}")))
}

fn row_to_record(row: &Row<'_>) -> std::result::Result<ScanRecord, rusqlite::Error> {
    let payload: String = row.get(3)?;
    let created_at: String = row.get(4)?;
    Ok(ScanRecord {
        id: row.get(0)?,
        crate_id: row.get(1)?,
        bread_quantity: row.get(2)?,
        payload: parse_payload(&payload)?,
        created_at: parse_timestamp(&created_at)?,
        synced: row.get(5)?,
        error: row.get(6)?,
        attempts: row.get(7)?,
        quarantined: row.get(8)?,
    })
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_retry_columns(conn)?;
    Ok(())
}

/// Migration: add retry tracking to databases created before it existed.
fn migrate_add_retry_columns(conn: &Connection) -> Result<()> {
    for column in ["attempts", "quarantined"] {
        let has_column: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('scans') WHERE name = ?1",
            [column],
            |row| row.get(0),
        )?;

        if !has_column {
            let sql = format!("ALTER TABLE scans ADD COLUMN {column} INTEGER NOT NULL DEFAULT 0");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// Scan store backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `path`, creating and migrating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        run_migrations(&conn)?;
        Ok(SqliteStore { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(SqliteStore { conn })
    }

    fn query(&self, sql: &str, limit: Option<usize>) -> Result<Vec<ScanRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match limit {
            Some(limit) => stmt.query_map([limit as i64], row_to_record)?,
            None => stmt.query_map([], row_to_record)?,
        };
        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

impl ScanStore for SqliteStore {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn insert(&mut self, record: &ScanRecord) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO scans (id, crate_id, bread_quantity, payload, created_at,
             synced, error, attempts, quarantined)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.id,
                record.crate_id,
                record.bread_quantity,
                record.payload.to_string(),
                record.created_at.to_rfc3339(),
                record.synced,
                record.error,
                record.attempts,
                record.quarantined,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateScan(record.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, id: &str) -> Result<Option<ScanRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM scans WHERE id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn update(&mut self, record: &ScanRecord) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE scans SET crate_id = ?2, bread_quantity = ?3, payload = ?4,
             created_at = ?5, synced = ?6, error = ?7, attempts = ?8, quarantined = ?9
             WHERE id = ?1",
            params![
                record.id,
                record.crate_id,
                record.bread_quantity,
                record.payload.to_string(),
                record.created_at.to_rfc3339(),
                record.synced,
                record.error,
                record.attempts,
                record.quarantined,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM scans WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn pending(&self) -> Result<Vec<ScanRecord>> {
        self.query(
            &format!(
                "SELECT {COLUMNS} FROM scans WHERE synced = 0 AND quarantined = 0 ORDER BY seq"
            ),
            None,
        )
    }

    fn all(&self) -> Result<Vec<ScanRecord>> {
        self.query(&format!("SELECT {COLUMNS} FROM scans ORDER BY seq"), None)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScanRecord>> {
        self.query(
            &format!("SELECT {COLUMNS} FROM scans ORDER BY seq DESC LIMIT ?1"),
            Some(limit),
        )
    }

    fn prune_synced(&mut self, keep: usize) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM scans WHERE synced = 1 AND seq NOT IN (
                 SELECT seq FROM scans WHERE synced = 1 ORDER BY seq DESC LIMIT ?1
             )",
            params![keep as i64],
        )?;
        Ok(removed)
    }

    fn clear(&mut self, synced_only: bool) -> Result<usize> {
        let sql = if synced_only {
            "DELETE FROM scans WHERE synced = 1"
        } else {
            "DELETE FROM scans"
        };
        Ok(self.conn.execute(sql, [])?)
    }

    fn counts(&self) -> Result<ScanCounts> {
        let counts = self.conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(synced = 0 AND quarantined = 0), 0),
                    COALESCE(SUM(synced = 1), 0),
                    COALESCE(SUM(synced = 0 AND quarantined = 1), 0)
             FROM scans",
            [],
            |row| {
                Ok(ScanCounts {
                    total: row.get::<_, i64>(0)? as usize,
                    pending: row.get::<_, i64>(1)? as usize,
                    synced: row.get::<_, i64>(2)? as usize,
                    quarantined: row.get::<_, i64>(3)? as usize,
                })
            },
        )?;
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
