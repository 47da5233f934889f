// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bcrs - offline-first crate scan queue.
//!
//! This crate provides the functionality behind the `bc` CLI: every crate
//! scan is written to a local store first and submitted to the crate-data
//! endpoint when it is reachable.
//!
//! # Main Components
//!
//! - [`ScanQueue`](sync::ScanQueue) - queue manager and sync passes
//! - [`Submitter`](sync::Submitter) / [`HttpSubmitter`](sync::HttpSubmitter) - remote submission
//! - [`ConnectivityMonitor`](sync::ConnectivityMonitor) - online/offline transitions
//! - [`Config`] - project configuration (storage backend, retry cap, remote)
//! - [`Error`] - error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use bcrs::{find_work_dir, Config};
//! use bcrs::sync::{HttpSubmitter, ScanQueue};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let queue = ScanQueue::new(bc_core::open_store(&work_dir, config.storage)?, config.policy());
//! let report = queue.sync(&submitter).await?;
//! ```

mod cli;
mod commands;
mod display;
mod logging;
pub mod timings;
mod validate;

pub mod config;
pub mod env;
pub mod error;
pub mod id;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat, ScanRefs, DEFAULT_BREAD_QUANTITY};
pub use config::{find_work_dir, init_work_dir, Config, RemoteConfig};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    // The watcher installs its own subscriber with a louder default.
    if !matches!(command, Command::Watch { .. }) {
        logging::setup_logging(logging::DEFAULT_FILTER, None);
    }

    match command {
        Command::Init { endpoint, storage } => commands::init::run(endpoint, storage),
        Command::Scan {
            crate_id,
            quantity,
            refs,
            offline,
            output,
        } => commands::scan::run(&crate_id, quantity, refs, offline, output),
        Command::Pending { all, output } => commands::pending::run(all, output),
        Command::History { limit, output } => commands::pending::history(limit, output),
        Command::Sync { quiet } => commands::sync::run(quiet),
        Command::Retry { id } => commands::sync::retry(&id),
        Command::Delete { id } => commands::delete::run(&id),
        Command::Clear { synced } => commands::delete::clear(synced),
        Command::Status { output } => commands::status::run(output),
        Command::Watch { log_file } => commands::watch::run(log_file),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "bc", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
