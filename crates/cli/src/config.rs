// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.breadcrate/config.toml` and includes:
//! - `storage`: which scan store backend to open (`auto`, `sqlite`, `jsonl`)
//! - `history_limit` / `max_attempts`: queue retention and retry cap
//! - `[remote]`: the submission endpoint and its timeouts
//!
//! The bearer token is never stored here; it comes from `BREADCRATE_TOKEN`.

use bc_core::StorageKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sync::QueuePolicy;

pub const WORK_DIR_NAME: &str = ".breadcrate";
const CONFIG_FILE_NAME: &str = "config.toml";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.breadcrate/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scan store backend.
    #[serde(default)]
    pub storage: StorageKind,
    /// Synced records kept for display.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Failed attempts before a scan is quarantined (0 = unlimited).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Submission endpoint (optional - if absent, scans are only queued).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

/// Submission endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL; requests go to `{endpoint}/submitCrateDataToZoho`.
    pub endpoint: String,
    /// Per-request timeout for submissions in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Interval between connectivity probes in seconds (default: 15).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
    /// Timeout for one connectivity probe in seconds (default: 5).
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_history_limit() -> usize {
    crate::sync::DEFAULT_HISTORY_LIMIT
}

fn default_max_attempts() -> u32 {
    crate::sync::DEFAULT_MAX_ATTEMPTS
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_probe_interval_secs() -> u64 {
    15
}

fn default_probe_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageKind::default(),
            history_limit: default_history_limit(),
            max_attempts: default_max_attempts(),
            remote: None,
        }
    }
}

impl RemoteConfig {
    pub fn new(endpoint: &str) -> Result<Self> {
        validate_endpoint(endpoint)?;
        Ok(RemoteConfig {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout_secs: default_timeout_secs(),
            probe_interval_secs: default_probe_interval_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Checks that an endpoint is an http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(Error::InvalidEndpoint(endpoint.to_string())),
    }
}

impl Config {
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if let Some(remote) = &config.remote {
            validate_endpoint(&remote.endpoint)?;
        }
        Ok(config)
    }

    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn policy(&self) -> QueuePolicy {
        QueuePolicy {
            history_limit: self.history_limit,
            max_attempts: self.max_attempts,
        }
    }

    /// Remote settings with `BREADCRATE_ENDPOINT` applied.
    pub fn remote(&self) -> Result<Option<RemoteConfig>> {
        self.remote_with_override(env::endpoint())
    }

    /// Remote settings with an explicit endpoint override applied.
    pub fn remote_with_override(&self, endpoint: Option<String>) -> Result<Option<RemoteConfig>> {
        match (endpoint, &self.remote) {
            (Some(endpoint), Some(remote)) => {
                validate_endpoint(&endpoint)?;
                Ok(Some(RemoteConfig {
                    endpoint: endpoint.trim_end_matches('/').to_string(),
                    ..remote.clone()
                }))
            }
            (Some(endpoint), None) => RemoteConfig::new(&endpoint).map(Some),
            (None, remote) => Ok(remote.clone()),
        }
    }
}

/// Locates the work directory: `BREADCRATE_DIR` if set, else the nearest
/// `.breadcrate/` walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    if let Some(dir) = env::work_dir() {
        return if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::NotInitialized)
        };
    }
    find_work_dir_from(&std::env::current_dir()?)
}

/// Walks up from `start` looking for a `.breadcrate/` directory.
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Creates `.breadcrate/` under `path` with the given configuration.
///
/// An existing directory without a config file is reused.
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = "# Local scan queue\nscans.db\nscans.db-*\nscans.jsonl\nscans.jsonl.lock\n\n# Runtime state\nsync.lock\nwatch.log\n";
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
