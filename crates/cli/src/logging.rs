// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! `RUST_LOG` overrides the default filter. Output goes to stderr, or to a
//! log file when one is given and can be opened.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Default filter for one-shot commands.
pub const DEFAULT_FILTER: &str = "warn";

/// Default filter for the long-running watcher.
pub const WATCH_FILTER: &str = "info";

/// Install the global subscriber. Later calls are ignored.
pub fn setup_logging(default_filter: &str, log_path: Option<&Path>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file = log_path.and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let _ = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}
