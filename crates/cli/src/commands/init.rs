// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use bc_core::{open_store, Backend, StorageKind};

use crate::config::{init_work_dir, Config, RemoteConfig};
use crate::error::Result;

pub fn run(endpoint: Option<String>, storage: Option<StorageKind>) -> Result<()> {
    let target_path = std::env::current_dir()?;
    let (work_dir, backend) = run_impl(&target_path, endpoint.as_deref(), storage)?;
    let config = Config::load(&work_dir)?;

    println!("Initialized scan queue at {}", work_dir.display());
    println!("Storage: {}", backend);
    match config.remote {
        Some(remote) => println!("Remote: {}", remote.endpoint),
        None => println!("Remote: not configured (scans are only queued)"),
    }
    Ok(())
}

/// Writes the config under `target_path` and opens the store once so the
/// backend is created up front. Returns the work dir and the opened backend.
pub(crate) fn run_impl(
    target_path: &Path,
    endpoint: Option<&str>,
    storage: Option<StorageKind>,
) -> Result<(PathBuf, Backend)> {
    let remote = endpoint.map(RemoteConfig::new).transpose()?;
    let config = Config {
        storage: storage.unwrap_or_default(),
        remote,
        ..Config::default()
    };

    let work_dir = init_work_dir(target_path, &config)?;
    let store = open_store(&work_dir, config.storage)?;
    Ok((work_dir, store.backend()))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
