// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable scan storage.
//!
//! [`ScanStore`] is the narrow interface the queue manager persists through.
//! Two backends implement it: [`SqliteStore`] (indexed, the normal case) and
//! [`JsonlStore`] (a flat list in a JSON Lines file, used when SQLite cannot
//! be opened). The backend is chosen once by [`open_store`].

mod flat;
mod sqlite;

pub use flat::JsonlStore;
pub use sqlite::SqliteStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scan::{ScanCounts, ScanRecord};

/// File name of the SQLite database inside the work directory.
pub const SQLITE_FILE: &str = "scans.db";

/// File name of the JSON Lines fallback inside the work directory.
pub const JSONL_FILE: &str = "scans.jsonl";

/// Persistence operations over scan records.
///
/// Ordering contract: [`pending`](ScanStore::pending) and
/// [`all`](ScanStore::all) return records in insertion order;
/// [`recent`](ScanStore::recent) returns newest first.
pub trait ScanStore: Send {
    /// Which backend this store is.
    fn backend(&self) -> Backend;

    /// Inserts a new record. Fails with [`Error::DuplicateScan`] if the id exists.
    fn insert(&mut self, record: &ScanRecord) -> Result<()>;

    /// Looks up a record by id.
    fn get(&self, id: &str) -> Result<Option<ScanRecord>>;

    /// Replaces the stored record with the same id. Returns false if absent.
    fn update(&mut self, record: &ScanRecord) -> Result<bool>;

    /// Removes a record. Returns false if absent.
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Unsynced, non-quarantined records, oldest first.
    fn pending(&self) -> Result<Vec<ScanRecord>>;

    /// Every record, oldest first.
    fn all(&self) -> Result<Vec<ScanRecord>>;

    /// Up to `limit` records of any state, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<ScanRecord>>;

    /// Deletes synced records beyond the `keep` most recent ones.
    /// Returns the number removed.
    fn prune_synced(&mut self, keep: usize) -> Result<usize>;

    /// Deletes all records, or only synced ones. Returns the number removed.
    fn clear(&mut self, synced_only: bool) -> Result<usize>;

    /// Record counts by state.
    fn counts(&self) -> Result<ScanCounts> {
        Ok(ScanCounts::from_records(&self.all()?))
    }
}

/// Concrete storage backend in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Jsonl,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested storage backend, as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// SQLite, falling back to JSONL if SQLite cannot be opened.
    #[default]
    Auto,
    Sqlite,
    Jsonl,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Auto => "auto",
            StorageKind::Sqlite => "sqlite",
            StorageKind::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StorageKind::Auto),
            "sqlite" => Ok(StorageKind::Sqlite),
            "jsonl" => Ok(StorageKind::Jsonl),
            _ => Err(Error::InvalidStorageKind(s.to_string())),
        }
    }
}

/// Opens the scan store in `dir` using the requested backend.
///
/// `Auto` tries SQLite first and degrades to JSONL. Whenever SQLite opens,
/// records left in a JSONL file by an earlier degraded session are absorbed
/// into it and the file is removed.
pub fn open_store(dir: &Path, kind: StorageKind) -> Result<Box<dyn ScanStore>> {
    let sqlite_path = dir.join(SQLITE_FILE);
    let jsonl_path = dir.join(JSONL_FILE);

    match kind {
        StorageKind::Sqlite => {
            let mut store = SqliteStore::open(&sqlite_path).map_err(Error::storage)?;
            absorb_jsonl(&mut store, &jsonl_path)?;
            Ok(Box::new(store))
        }
        StorageKind::Jsonl => {
            let store = JsonlStore::open(&jsonl_path).map_err(Error::storage)?;
            Ok(Box::new(store))
        }
        StorageKind::Auto => match SqliteStore::open(&sqlite_path) {
            Ok(mut store) => {
                absorb_jsonl(&mut store, &jsonl_path)?;
                Ok(Box::new(store))
            }
            Err(sqlite_err) => {
                tracing::warn!(
                    error = %sqlite_err,
                    "sqlite store unavailable, falling back to jsonl"
                );
                match JsonlStore::open(&jsonl_path) {
                    Ok(store) => Ok(Box::new(store)),
                    Err(jsonl_err) => Err(Error::StorageUnavailable(format!(
                        "sqlite: {sqlite_err}; jsonl: {jsonl_err}"
                    ))),
                }
            }
        },
    }
}

/// Moves records from a leftover JSONL file into `store`. Existing ids win.
fn absorb_jsonl(store: &mut SqliteStore, jsonl_path: &Path) -> Result<usize> {
    if !jsonl_path.is_file() {
        return Ok(0);
    }

    // Held until the file is gone so no writer appends between read and removal.
    let _lock = crate::jsonl::FileLock::exclusive(jsonl_path)?;
    if !jsonl_path.is_file() {
        return Ok(0);
    }
    let records: Vec<ScanRecord> = crate::jsonl::read_all(jsonl_path)?;
    let mut absorbed = 0;
    for record in &records {
        if store.get(&record.id)?.is_none() {
            store.insert(record)?;
            absorbed += 1;
        }
    }
    std::fs::remove_file(jsonl_path)?;

    if absorbed > 0 {
        tracing::info!(absorbed, "moved fallback jsonl records into sqlite");
    }
    Ok(absorbed)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
