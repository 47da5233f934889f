// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bc_core::StorageKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Bread quantity assumed when a scan does not give one.
pub const DEFAULT_BREAD_QUANTITY: u32 = 24;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Scanning:
  scan        Record a crate scan (submits right away when online)
  pending     List scans waiting to be submitted
  history     Show recent scans of any state
  sync        Submit pending scans now
  retry       Return a quarantined scan to the queue and sync
  delete      Delete one scan
  clear       Delete all scans, or only synced ones
  status      Show storage, queue counts and connectivity
  watch       Sync automatically whenever the endpoint comes back

Setup:
  init        Initialize a scan queue in this directory
  completion  Generate shell completions
";

const QUICKSTART_HELP: &str = "\
Get started:
  bc init --endpoint https://api.example.com/prod
  bc scan CRATE-1 -q 30        Record a scan of 30 loaves
  bc pending                   See what is still queued
  bc sync                      Submit queued scans";

#[derive(Parser)]
#[command(name = "bc")]
#[command(version)]
#[command(about = "Offline-first crate scan queue for bread crate tracking")]
#[command(
    long_about = "Offline-first crate scan queue for bread crate tracking.\n\n\
    Every scan is stored locally first and submitted to the crate-data endpoint \
    as soon as it is reachable."
)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Optional references attached to a scan payload.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanRefs {
    /// Where the bread came from (e.g. bakery name)
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Dispatch order reference
    #[arg(long, value_name = "REF")]
    pub order: Option<String>,

    /// Donation batch reference
    #[arg(long, value_name = "REF")]
    pub batch: Option<String>,

    /// Scan location (e.g. "dock 2")
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a crate scan
    #[command(after_help = "Examples:\n  \
        bc scan CRATE-1                   Scan with the default 24 loaves\n  \
        bc scan CRATE-1 -q 30             Scan with an explicit quantity\n  \
        bc scan CRATE-2 --order DO-17     Attach a dispatch order\n  \
        bc scan CRATE-3 --offline         Queue without trying the endpoint")]
    Scan {
        /// Crate identifier from the barcode
        crate_id: String,

        /// Number of loaves in the crate
        #[arg(long, short = 'q', default_value_t = DEFAULT_BREAD_QUANTITY)]
        quantity: u32,

        #[command(flatten)]
        refs: ScanRefs,

        /// Only queue the scan; do not contact the endpoint
        #[arg(long)]
        offline: bool,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List scans waiting to be submitted (oldest first)
    Pending {
        /// Include quarantined scans
        #[arg(long)]
        all: bool,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show recent scans of any state (newest first)
    History {
        /// Maximum number of scans to show
        #[arg(long, short = 'n', default_value_t = 20)]
        limit: usize,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Submit pending scans now
    Sync {
        /// Print nothing when there is nothing to do
        #[arg(long)]
        quiet: bool,
    },

    /// Return a quarantined scan to the queue and run a sync pass
    #[command(arg_required_else_help = true)]
    Retry {
        /// Scan ID
        id: String,
    },

    /// Delete one scan
    #[command(arg_required_else_help = true)]
    Delete {
        /// Scan ID
        id: String,
    },

    /// Delete all scans, or only synced ones
    Clear {
        /// Only delete scans that were already submitted
        #[arg(long)]
        synced: bool,
    },

    /// Show storage backend, queue counts and connectivity
    Status {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Watch connectivity and sync whenever the endpoint comes back
    Watch {
        /// Write logs to .breadcrate/watch.log instead of stderr
        #[arg(long)]
        log_file: bool,
    },

    /// Initialize a scan queue in the current directory
    Init {
        /// Base URL of the crate-data endpoint
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Storage backend (auto, sqlite, jsonl)
        #[arg(long, value_name = "KIND")]
        storage: Option<StorageKind>,
    },

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
