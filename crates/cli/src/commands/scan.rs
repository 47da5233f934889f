// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bc_core::{CratePayload, ScanRecord};
use chrono::Utc;
use serde::Serialize;

use super::{locked_sync, probe_once, runtime, Context};
use crate::cli::{OutputFormat, ScanRefs};
use crate::config::RemoteConfig;
use crate::display::format_report;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::sync::{Connectivity, SyncReport};
use crate::validate::{normalize_reference, validate_crate_id};

/// A validated scan, ready to be queued.
#[derive(Debug, Clone)]
pub struct ScanInput {
    crate_id: String,
    quantity: u32,
    refs: ScanRefs,
}

impl ScanInput {
    pub fn new(crate_id: &str, quantity: u32, refs: ScanRefs) -> Result<Self> {
        let crate_id = validate_crate_id(crate_id)?;
        let refs = ScanRefs {
            source: normalize_reference("source", refs.source)?,
            order: normalize_reference("order", refs.order)?,
            batch: normalize_reference("batch", refs.batch)?,
            location: normalize_reference("location", refs.location)?,
        };
        Ok(ScanInput {
            crate_id,
            quantity,
            refs,
        })
    }

    /// Builds the record and its payload and persists it.
    pub fn enqueue(&self, ctx: &Context, offline: bool) -> Result<ScanRecord> {
        let created_at = Utc::now();
        let id = generate_unique_id(&self.crate_id, self.quantity, &created_at, |id| {
            matches!(ctx.queue.get(id), Ok(Some(_)))
        });

        let payload = CratePayload::new(&self.crate_id, self.quantity)
            .with_device_scan_id(&id)
            .offline(offline)
            .with_stock_source(self.refs.source.clone())
            .with_dispatch_order(self.refs.order.clone())
            .with_donation_batch(self.refs.batch.clone())
            .with_location(self.refs.location.clone())
            .to_value()?;

        let record = ScanRecord::new(id, self.crate_id.clone(), self.quantity, payload, created_at);
        ctx.queue.enqueue(record.clone())?;
        tracing::debug!(id = %record.id, crate_id = %record.crate_id, offline, "scan queued");
        Ok(record)
    }
}

/// What happened to a scan right after it was taken.
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub scan: ScanRecord,
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SyncReport>,
}

pub fn run(
    crate_id: &str,
    quantity: u32,
    refs: ScanRefs,
    offline: bool,
    output: OutputFormat,
) -> Result<()> {
    let input = ScanInput::new(crate_id, quantity, refs)?;
    let ctx = Context::open()?;
    let remote = if offline { None } else { ctx.remote()? };

    let outcome = match remote {
        Some(remote) => runtime()?.block_on(scan_online(&ctx, &input, &remote))?,
        None => ScanOutcome {
            scan: input.enqueue(&ctx, true)?,
            online: false,
            report: None,
        },
    };
    print_outcome(&outcome, output)
}

/// Queues the scan, then submits the queue if the endpoint answers.
pub async fn scan_online(
    ctx: &Context,
    input: &ScanInput,
    remote: &RemoteConfig,
) -> Result<ScanOutcome> {
    let online = probe_once(remote).await? == Connectivity::Online;
    let scan = input.enqueue(ctx, !online)?;
    if !online {
        return Ok(ScanOutcome {
            scan,
            online,
            report: None,
        });
    }

    let report = match locked_sync(ctx, remote).await {
        Ok(report) => Some(report),
        Err(Error::SyncLocked(_)) | Err(Error::SyncInProgress) => {
            tracing::info!("another sync is running; scan stays queued");
            None
        }
        Err(e) => return Err(e),
    };
    // The pass may have changed the record; show its current state.
    let scan = ctx.queue.get(&scan.id)?.unwrap_or(scan);
    Ok(ScanOutcome {
        scan,
        online,
        report,
    })
}

fn print_outcome(outcome: &ScanOutcome, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Text => {
            let scan = &outcome.scan;
            println!(
                "Queued {} ({} x{})",
                scan.id, scan.crate_id, scan.bread_quantity
            );
            match &outcome.report {
                Some(report) => println!("{}", format_report(report)),
                None if outcome.online => {
                    println!("Another sync is running; the scan will go out with it or the next one")
                }
                None => println!("Offline: the scan will be submitted once the endpoint is reachable"),
            }
            if let Some(error) = scan.error.as_deref().filter(|_| !scan.synced) {
                println!("  error: {}", error);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
