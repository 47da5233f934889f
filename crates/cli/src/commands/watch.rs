// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `bc watch`: sync whenever the endpoint becomes reachable.
//!
//! The connectivity monitor runs in its own task. Two independent
//! subscribers listen to its transitions: one runs a sync pass on every
//! Online event, the other reports transitions to the terminal.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};

use super::{http_submitter, monitor, runtime, Context};
use crate::error::Result;
use crate::logging::{setup_logging, WATCH_FILTER};
use crate::sync::{ConnectivityEvent, ConnectivityMonitor, Probe, Submitter, SyncError, SyncLock};

/// Log file used by `bc watch --log-file`.
pub const WATCH_LOG_FILE: &str = "watch.log";

pub fn run(log_file: bool) -> Result<()> {
    let ctx = Context::open()?;
    let remote = ctx.require_remote()?;

    let log_path = log_file.then(|| ctx.work_dir.join(WATCH_LOG_FILE));
    setup_logging(WATCH_FILTER, log_path.as_deref());

    let submitter = http_submitter(&remote)?;
    let monitor = monitor(&remote)?;
    println!(
        "Watching {} every {}s (Ctrl-C to stop)",
        remote.endpoint,
        remote.probe_interval().as_secs()
    );

    runtime()?.block_on(watch(
        Arc::new(ctx),
        Arc::new(monitor),
        Arc::new(submitter),
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
        },
    ))
}

/// Runs the monitor and its subscribers until `shutdown` resolves.
pub async fn watch<P, S, F>(
    ctx: Arc<Context>,
    monitor: Arc<ConnectivityMonitor<P>>,
    submitter: Arc<S>,
    shutdown: F,
) -> Result<()>
where
    P: Probe + 'static,
    S: Submitter + 'static,
    F: Future<Output = ()>,
{
    // Subscribe before the first poll so the initial Online is seen.
    let trigger = tokio::spawn(sync_on_online(
        Arc::clone(&ctx),
        submitter,
        monitor.subscribe(),
    ));
    let notifier = tokio::spawn(report_transitions(monitor.subscribe()));

    let runner = {
        let monitor = Arc::clone(&monitor);
        tokio::spawn(async move { monitor.run().await })
    };

    shutdown.await;
    tracing::info!("watch shutting down");
    monitor.cancel_token().cancel();
    let _ = runner.await;

    // Dropping the last monitor handle closes the channel and ends both
    // subscribers.
    drop(monitor);
    let _ = trigger.await;
    let _ = notifier.await;
    Ok(())
}

/// Runs one locked sync pass per Online transition.
async fn sync_on_online<S>(
    ctx: Arc<Context>,
    submitter: Arc<S>,
    mut events: broadcast::Receiver<ConnectivityEvent>,
) where
    S: Submitter + 'static,
{
    loop {
        match events.recv().await {
            Ok(ConnectivityEvent::Online) => sync_pass(&ctx, submitter.as_ref()).await,
            Ok(ConnectivityEvent::Offline) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "sync trigger lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn sync_pass<S: Submitter + ?Sized>(ctx: &Context, submitter: &S) {
    let _lock = match SyncLock::try_acquire(&ctx.work_dir) {
        Ok(lock) => lock,
        Err(e) => {
            tracing::info!(error = %e, "skipping sync");
            return;
        }
    };
    match ctx.queue.sync(submitter).await {
        Ok(report) if report.quarantined > 0 => {
            tracing::warn!(quarantined = report.quarantined, "scans quarantined");
        }
        Ok(_) => {}
        Err(SyncError::InProgress) => tracing::info!("sync already running"),
        Err(e) => tracing::error!(error = %e, "sync pass failed"),
    }
}

async fn report_transitions(mut events: broadcast::Receiver<ConnectivityEvent>) {
    loop {
        match events.recv().await {
            Ok(ConnectivityEvent::Online) => println!("online: submitting queued scans"),
            Ok(ConnectivityEvent::Offline) => println!("offline: new scans will be queued"),
            Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
