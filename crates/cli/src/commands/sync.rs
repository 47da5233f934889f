// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bc_core::ScanRecord;

use super::{locked_sync, runtime, Context};
use crate::config::RemoteConfig;
use crate::display::format_report;
use crate::error::Result;
use crate::sync::SyncReport;

pub fn run(quiet: bool) -> Result<()> {
    let ctx = Context::open()?;
    let remote = ctx.require_remote()?;
    let report = runtime()?.block_on(sync_now(&ctx, &remote))?;
    if !(quiet && report == SyncReport::default()) {
        println!("{}", format_report(&report));
    }
    Ok(())
}

pub fn retry(id: &str) -> Result<()> {
    let ctx = Context::open()?;
    let remote = ctx.require_remote()?;
    let (record, report) = runtime()?.block_on(retry_now(&ctx, &remote, id))?;
    println!("Requeued {}", id);
    println!("{}", format_report(&report));
    if record.synced {
        println!("{} submitted", record.id);
    } else if let Some(error) = &record.error {
        println!("{} still failing: {}", record.id, error);
    }
    Ok(())
}

/// One sync pass under the cross-process lock.
pub async fn sync_now(ctx: &Context, remote: &RemoteConfig) -> Result<SyncReport> {
    locked_sync(ctx, remote).await
}

/// Requeues a record, runs a pass, and returns the record as it ended up.
pub async fn retry_now(
    ctx: &Context,
    remote: &RemoteConfig,
    id: &str,
) -> Result<(ScanRecord, SyncReport)> {
    let requeued = ctx.queue.requeue(id)?;
    let report = locked_sync(ctx, remote).await?;
    let record = ctx.queue.get(id)?.unwrap_or(requeued);
    Ok((record, report))
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
