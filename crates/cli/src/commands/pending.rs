// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bc_core::ScanRecord;

use super::Context;
use crate::cli::OutputFormat;
use crate::display::format_scan;
use crate::error::Result;

pub fn run(all: bool, output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let records = pending_records(&ctx, all)?;
    print_records(&records, output, "No pending scans")
}

pub fn history(limit: usize, output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let records = ctx.queue.history(limit)?;
    print_records(&records, output, "No scans recorded")
}

/// Pending scans oldest first; with `all`, quarantined scans are included
/// in their insertion position.
pub fn pending_records(ctx: &Context, all: bool) -> Result<Vec<ScanRecord>> {
    if !all {
        return Ok(ctx.queue.list_pending()?);
    }
    Ok(ctx
        .queue
        .all()?
        .into_iter()
        .filter(|r| !r.synced)
        .collect())
}

fn print_records(records: &[ScanRecord], output: OutputFormat, empty: &str) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Text => {
            if records.is_empty() {
                println!("{}", empty);
            }
            for record in records {
                for line in format_scan(record) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
