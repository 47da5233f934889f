// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Test infrastructure for command testing.
//!
//! `TestContext` initializes a `.breadcrate/` directory in a temp dir and
//! opens a [`Context`] on it, so command logic runs against a real store
//! without touching the current directory or the environment.
//!
//! ```rust,ignore
//! let t = TestContext::new();
//! let record = ScanInput::new("CRATE-1", 30, ScanRefs::default())?
//!     .enqueue(&t.ctx, true)?;
//! ```

use std::path::Path;

use bc_core::{ScanRecord, StorageKind};
use tempfile::TempDir;

use super::Context;
use crate::config::{init_work_dir, Config, RemoteConfig};
use crate::sync::test_helpers::make_record;

/// Initialized work directory plus an open context on it.
pub struct TestContext {
    pub ctx: Context,
    _temp_dir: TempDir, // Keep alive for duration of test
}

impl TestContext {
    /// SQLite-backed context without a remote.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_storage(storage: StorageKind) -> Self {
        Self::with_config(Config {
            storage,
            ..Config::default()
        })
    }

    /// Context whose remote points at `endpoint`, with short timeouts.
    pub fn with_endpoint(endpoint: &str) -> Self {
        let mut remote = RemoteConfig::new(endpoint).unwrap();
        remote.timeout_secs = 2;
        remote.probe_timeout_secs = 1;
        Self::with_config(Config {
            remote: Some(remote),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let work_dir = init_work_dir(temp_dir.path(), &config).unwrap();
        let ctx = Context::open_at(work_dir).unwrap();
        TestContext {
            ctx,
            _temp_dir: temp_dir,
        }
    }

    /// Splits off the context; the temp dir must outlive it.
    pub fn into_parts(self) -> (Context, TempDir) {
        (self.ctx, self._temp_dir)
    }

    pub fn work_dir(&self) -> &Path {
        &self.ctx.work_dir
    }

    /// The configured remote, ignoring environment overrides.
    pub fn remote(&self) -> RemoteConfig {
        self.ctx.config.remote.clone().unwrap()
    }

    /// Enqueue a plain pending scan.
    pub fn add_scan(&self, id: &str, crate_id: &str, quantity: u32) -> ScanRecord {
        let record = make_record(id, crate_id, quantity);
        self.ctx.queue.enqueue(record.clone()).unwrap();
        record
    }

    pub fn get(&self, id: &str) -> Option<ScanRecord> {
        self.ctx.queue.get(id).unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
