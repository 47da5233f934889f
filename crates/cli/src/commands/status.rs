// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use super::{probe_once, runtime, Context};
use crate::cli::OutputFormat;
use crate::config::RemoteConfig;
use crate::display::format_status;
use crate::error::Result;
use crate::sync::{Connectivity, QueueStatus};

/// Queue summary plus the endpoint and whether it answered.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub queue: QueueStatus,
    pub endpoint: Option<String>,
    pub connectivity: Connectivity,
}

pub fn run(output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let remote = ctx.remote()?;
    let report = match &remote {
        Some(remote) => runtime()?.block_on(collect(&ctx, Some(remote)))?,
        None => {
            let queue = ctx.queue.status()?;
            StatusReport {
                queue,
                endpoint: None,
                connectivity: Connectivity::Unknown,
            }
        }
    };

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for line in format_status(&report.queue, report.endpoint.as_deref(), report.connectivity) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Gathers queue counts and, with a remote, probes it once.
pub async fn collect(ctx: &Context, remote: Option<&RemoteConfig>) -> Result<StatusReport> {
    let queue = ctx.queue.status()?;
    let (endpoint, connectivity) = match remote {
        Some(remote) => (Some(remote.endpoint.clone()), probe_once(remote).await?),
        None => (None, Connectivity::Unknown),
    };
    Ok(StatusReport {
        queue,
        endpoint,
        connectivity,
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
