// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod delete;
pub mod init;
pub mod pending;
pub mod scan;
pub mod status;
pub mod sync;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod watch;

use std::path::PathBuf;

use bc_core::open_store;

use crate::config::{find_work_dir, Config, RemoteConfig};
use crate::env;
use crate::error::{Error, Result};
use crate::sync::{
    Connectivity, ConnectivityMonitor, HttpProbe, HttpSubmitter, Probe, ScanQueue, SyncLock,
    SyncReport,
};

/// Everything a command needs: where the queue lives, its config, and the
/// open queue.
pub struct Context {
    pub work_dir: PathBuf,
    pub config: Config,
    pub queue: ScanQueue,
}

impl Context {
    /// Open the queue for the current directory.
    pub fn open() -> Result<Self> {
        let work_dir = find_work_dir()?;
        Self::open_at(work_dir)
    }

    /// Open the queue in a known work directory.
    pub fn open_at(work_dir: PathBuf) -> Result<Self> {
        let config = Config::load(&work_dir)?;
        let store = crate::time_phase!("store::open", { open_store(&work_dir, config.storage)? });
        let queue = ScanQueue::new(store, config.policy());
        Ok(Context {
            work_dir,
            config,
            queue,
        })
    }

    /// Remote settings, with environment overrides applied.
    pub fn remote(&self) -> Result<Option<RemoteConfig>> {
        self.config.remote()
    }

    /// Remote settings, or an error when none are configured.
    pub fn require_remote(&self) -> Result<RemoteConfig> {
        self.remote()?.ok_or(Error::EndpointRequired)
    }
}

/// Build the tokio runtime for commands that talk to the network.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))
}

/// HTTP submitter for the configured endpoint, using `BREADCRATE_TOKEN`.
pub fn http_submitter(remote: &RemoteConfig) -> Result<HttpSubmitter> {
    HttpSubmitter::new(&remote.endpoint, env::token(), remote.timeout())
}

/// Probe the endpoint once.
pub async fn probe_once(remote: &RemoteConfig) -> Result<Connectivity> {
    let probe = HttpProbe::new(&remote.endpoint, remote.probe_timeout())?;
    let online = crate::time_phase!("remote::probe", { probe.probe().await });
    Ok(if online {
        Connectivity::Online
    } else {
        Connectivity::Offline
    })
}

/// Run one sync pass under the cross-process lock.
pub async fn locked_sync(ctx: &Context, remote: &RemoteConfig) -> Result<SyncReport> {
    let _lock = SyncLock::try_acquire(&ctx.work_dir)?;
    let submitter = http_submitter(remote)?;
    let report = crate::time_phase!("sync::pass", { ctx.queue.sync(&submitter).await? });
    Ok(report)
}

/// Monitor for the configured endpoint.
pub fn monitor(remote: &RemoteConfig) -> Result<ConnectivityMonitor<HttpProbe>> {
    let probe = HttpProbe::new(&remote.endpoint, remote.probe_timeout())?;
    Ok(ConnectivityMonitor::new(probe, remote.probe_interval()))
}
