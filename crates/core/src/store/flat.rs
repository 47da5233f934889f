// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flat-file scan store.
//!
//! The whole queue lives in one JSON Lines file in insertion order. Every
//! operation rereads the file so separate processes see each other's writes.
//! Mutations hold the exclusive file lock from read to rewrite; reads hold
//! it shared.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use super::{Backend, ScanStore};
use crate::error::{Error, Result};
use crate::jsonl::{self, FileLock};
use crate::scan::ScanRecord;

/// Scan store backed by a JSON Lines file.
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Opens (creating if needed) the file at `path` and checks it parses.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(path)?;
        let _lock = FileLock::shared(path)?;
        jsonl::read_all::<ScanRecord>(path)?;
        Ok(JsonlStore {
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ScanRecord>> {
        jsonl::read_all(&self.path)
    }

    fn read(&self) -> Result<Vec<ScanRecord>> {
        let _lock = FileLock::shared(&self.path)?;
        self.load()
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::exclusive(&self.path)
    }

    fn save(&self, records: &[ScanRecord]) -> Result<()> {
        jsonl::write_all(&self.path, records)
    }
}

impl ScanStore for JsonlStore {
    fn backend(&self) -> Backend {
        Backend::Jsonl
    }

    fn insert(&mut self, record: &ScanRecord) -> Result<()> {
        let _lock = self.lock()?;
        if self.load()?.iter().any(|r| r.id == record.id) {
            return Err(Error::DuplicateScan(record.id.clone()));
        }
        jsonl::append(&self.path, record)
    }

    fn get(&self, id: &str) -> Result<Option<ScanRecord>> {
        Ok(self.read()?.into_iter().find(|r| r.id == id))
    }

    fn update(&mut self, record: &ScanRecord) -> Result<bool> {
        let _lock = self.lock()?;
        let mut records = self.load()?;
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            return Ok(false);
        };
        *slot = record.clone();
        self.save(&records)?;
        Ok(true)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let _lock = self.lock()?;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }

    fn pending(&self) -> Result<Vec<ScanRecord>> {
        let mut records = self.read()?;
        records.retain(ScanRecord::is_pending);
        Ok(records)
    }

    fn all(&self) -> Result<Vec<ScanRecord>> {
        self.read()
    }

    fn recent(&self, limit: usize) -> Result<Vec<ScanRecord>> {
        Ok(self.read()?.into_iter().rev().take(limit).collect())
    }

    fn prune_synced(&mut self, keep: usize) -> Result<usize> {
        let _lock = self.lock()?;
        let records = self.load()?;
        let synced = records.iter().filter(|r| r.synced).count();
        let excess = synced.saturating_sub(keep);
        if excess == 0 {
            return Ok(0);
        }

        // Oldest synced records come first in file order.
        let mut skipped = 0;
        let kept: Vec<ScanRecord> = records
            .into_iter()
            .filter(|r| {
                if r.synced && skipped < excess {
                    skipped += 1;
                    false
                } else {
                    true
                }
            })
            .collect();
        self.save(&kept)?;
        Ok(excess)
    }

    fn clear(&mut self, synced_only: bool) -> Result<usize> {
        let _lock = self.lock()?;
        let mut records = self.load()?;
        let before = records.len();
        if synced_only {
            records.retain(|r| !r.synced);
        } else {
            records.clear();
        }
        let removed = before - records.len();
        if removed > 0 {
            self.save(&records)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "flat_tests.rs"]
mod tests;
