// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::error::Result;

pub fn run(id: &str) -> Result<()> {
    let ctx = Context::open()?;
    run_impl(&ctx, id)?;
    println!("Deleted {}", id);
    Ok(())
}

pub fn clear(synced_only: bool) -> Result<()> {
    let ctx = Context::open()?;
    let removed = clear_impl(&ctx, synced_only)?;
    if synced_only {
        println!("Cleared {} synced scan(s)", removed);
    } else {
        println!("Cleared {} scan(s)", removed);
    }
    Ok(())
}

pub(crate) fn run_impl(ctx: &Context, id: &str) -> Result<()> {
    ctx.queue.delete(id)?;
    tracing::info!(id, "scan deleted");
    Ok(())
}

pub(crate) fn clear_impl(ctx: &Context, synced_only: bool) -> Result<usize> {
    let removed = ctx.queue.clear(synced_only)?;
    tracing::info!(removed, synced_only, "scans cleared");
    Ok(removed)
}

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;
