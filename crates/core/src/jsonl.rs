// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON Lines file helpers used by the flat-file scan store.
//!
//! Appends are fsynced. Full rewrites go through a sibling temp file and a
//! rename so a crash mid-write leaves either the old or the new list intact.
//! Readers and writers in separate processes coordinate through [`FileLock`]
//! on a sibling `<file>.lock`, which is never deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};

/// Appends one record as a single line and fsyncs the file.
pub fn append<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(record)?;
    writeln!(file, "{line}")?;
    file.sync_all()?;
    Ok(())
}

/// Reads every record in file order.
///
/// A missing file reads as empty. Blank lines are skipped; a line that does
/// not parse is reported with its line number.
pub fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            Error::CorruptedData(format!("{}:{}: {e}", path.display(), index + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Replaces the file contents with `records`, atomically.
pub fn write_all<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let tmp = temp_path(path);
    {
        let mut file = File::create(&tmp)?;
        for record in records {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{line}")?;
        }
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Advisory lock guarding a JSONL file, released when dropped.
///
/// A rewrite replaces the data file, so the lock lives on a separate file
/// that stays in place.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Blocks until no other holder has the lock for `path`.
    pub fn exclusive(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        file.lock_exclusive()?;
        Ok(FileLock { file })
    }

    /// Blocks until no exclusive holder has the lock for `path`.
    pub fn shared(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        file.lock_shared()?;
        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Path of the lock file guarding `path`.
pub fn lock_path(path: &Path) -> PathBuf {
    sibling(path, ".lock")
}

fn open_lock_file(path: &Path) -> Result<File> {
    Ok(OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(path))?)
}

fn temp_path(path: &Path) -> PathBuf {
    sibling(path, ".tmp")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
