// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-process exclusion for sync passes.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Lock file name inside the work directory.
pub const LOCK_FILE: &str = "sync.lock";

/// Exclusive advisory lock held for the duration of a sync pass.
///
/// Released when dropped.
#[derive(Debug)]
pub struct SyncLock {
    file: File,
    path: PathBuf,
}

impl SyncLock {
    /// Takes the lock without blocking. Fails with [`Error::SyncLocked`] if
    /// another process holds it.
    pub fn try_acquire(work_dir: &Path) -> Result<Self> {
        let path = work_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        file.try_lock_exclusive()
            .map_err(|_| Error::SyncLocked(path.display().to_string()))?;

        Ok(SyncLock { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SyncLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
