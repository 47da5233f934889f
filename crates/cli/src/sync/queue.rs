// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan queue manager.
//!
//! [`ScanQueue`] owns the store and runs sync passes against a
//! [`Submitter`]. Store access is synchronous behind a mutex that is never
//! held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bc_core::{Backend, Error as CoreError, ScanRecord, ScanStore};
use serde::Serialize;

use super::submit::Submitter;

/// Default number of synced records kept for display.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Default number of failed attempts before a record is quarantined.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retention and retry limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuePolicy {
    /// Synced records kept after pruning.
    pub history_limit: usize,
    /// Failed attempts before quarantine (0 = unlimited).
    pub max_attempts: u32,
}

impl Default for QueuePolicy {
    fn default() -> Self {
        QueuePolicy {
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Error type for sync passes.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The store failed; the pass stopped.
    #[error(transparent)]
    Store(#[from] CoreError),

    /// Another pass is running in this process.
    #[error("a sync pass is already running")]
    InProgress,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Records confirmed by the endpoint during this pass.
    pub synced: usize,
    /// Records whose submission failed during this pass.
    pub failed: usize,
    /// Pending records remaining after the pass.
    pub pending: usize,
    /// Records quarantined by this pass.
    pub quarantined: usize,
}

/// Queue summary for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStatus {
    pub backend: Backend,
    pub total: usize,
    pub pending: usize,
    pub synced: usize,
    pub quarantined: usize,
}

/// Durable queue of crate scans awaiting submission.
pub struct ScanQueue {
    store: Mutex<Box<dyn ScanStore>>,
    policy: QueuePolicy,
    syncing: AtomicBool,
}

/// Clears the in-flight flag when a pass ends, including on early return.
struct PassGuard<'a>(&'a AtomicBool);

impl<'a> PassGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PassGuard(flag))
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ScanQueue {
    pub fn new(store: Box<dyn ScanStore>, policy: QueuePolicy) -> Self {
        ScanQueue {
            store: Mutex::new(store),
            policy,
            syncing: AtomicBool::new(false),
        }
    }

    fn store(&self) -> MutexGuard<'_, Box<dyn ScanStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn backend(&self) -> Backend {
        self.store().backend()
    }

    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    /// Returns true while a sync pass is running in this process.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    /// Persists a new scan. Does not submit it.
    pub fn enqueue(&self, record: ScanRecord) -> bc_core::Result<()> {
        if record.synced {
            return Err(CoreError::InvalidInput(format!(
                "scan {} is already synced",
                record.id
            )));
        }

        let mut store = self.store();
        store.insert(&record).map_err(CoreError::storage)?;
        tracing::debug!(id = %record.id, crate_id = %record.crate_id, "scan enqueued");

        if let Err(e) = store.prune_synced(self.policy.history_limit) {
            tracing::warn!(error = %e, "failed to prune synced history");
        }
        Ok(())
    }

    /// Pending records, oldest first. The returned vec is a snapshot.
    pub fn list_pending(&self) -> bc_core::Result<Vec<ScanRecord>> {
        self.store().pending()
    }

    /// Most recent records of any state, newest first.
    pub fn history(&self, limit: usize) -> bc_core::Result<Vec<ScanRecord>> {
        self.store().recent(limit)
    }

    /// Every record, oldest first.
    pub fn all(&self) -> bc_core::Result<Vec<ScanRecord>> {
        self.store().all()
    }

    pub fn get(&self, id: &str) -> bc_core::Result<Option<ScanRecord>> {
        self.store().get(id)
    }

    /// Marks a record as confirmed. Returns false if nothing changed: the id
    /// is absent, already synced, or was deleted before the write landed.
    pub fn mark_synced(&self, id: &str) -> bc_core::Result<bool> {
        let mut store = self.store();
        let Some(mut record) = store.get(id)? else {
            return Ok(false);
        };
        if record.synced {
            return Ok(false);
        }
        record.synced = true;
        record.error = None;
        store.update(&record)
    }

    /// Records a failed attempt. Returns true if this failure quarantined
    /// the record. Absent or synced ids are a no-op.
    pub fn record_failure(&self, id: &str, reason: &str) -> bc_core::Result<bool> {
        let mut store = self.store();
        let Some(mut record) = store.get(id)? else {
            return Ok(false);
        };
        if record.synced {
            return Ok(false);
        }

        record.error = Some(reason.to_string());
        record.attempts = record.attempts.saturating_add(1);
        let cap = self.policy.max_attempts;
        let newly_quarantined = !record.quarantined && cap > 0 && record.attempts >= cap;
        if newly_quarantined {
            record.quarantined = true;
            tracing::warn!(
                id = %record.id,
                attempts = record.attempts,
                "scan quarantined after repeated failures"
            );
        }
        store.update(&record)?;
        Ok(newly_quarantined)
    }

    /// Submits every pending record once, oldest first.
    ///
    /// The pending set is snapshotted at the start; scans enqueued during the
    /// pass wait for the next one. Per-record failures are recorded and never
    /// abort the pass; only store failures propagate.
    pub async fn sync<S>(&self, submitter: &S) -> Result<SyncReport, SyncError>
    where
        S: Submitter + ?Sized,
    {
        let _guard = PassGuard::acquire(&self.syncing).ok_or(SyncError::InProgress)?;

        let snapshot = self.list_pending()?;
        let mut report = SyncReport::default();

        for record in &snapshot {
            tracing::debug!(id = %record.id, "submitting scan");
            match submitter.submit(record).await {
                Ok(()) => {
                    if self.mark_synced(&record.id)? {
                        report.synced += 1;
                    } else {
                        tracing::debug!(id = %record.id, "scan removed while submitting");
                    }
                }
                Err(e) => {
                    let reason = e.to_string();
                    tracing::warn!(id = %record.id, error = %reason, "scan submission failed");
                    if self.record_failure(&record.id, &reason)? {
                        report.quarantined += 1;
                    }
                    report.failed += 1;
                }
            }
        }

        let mut store = self.store();
        store.prune_synced(self.policy.history_limit)?;
        report.pending = store.counts()?.pending;
        drop(store);

        tracing::info!(
            synced = report.synced,
            failed = report.failed,
            pending = report.pending,
            "sync pass complete"
        );
        Ok(report)
    }

    /// Returns a quarantined record to the pending set with a fresh retry
    /// budget. The last error is kept. Synced records are returned unchanged.
    pub fn requeue(&self, id: &str) -> bc_core::Result<ScanRecord> {
        let mut store = self.store();
        let mut record = store
            .get(id)?
            .ok_or_else(|| CoreError::ScanNotFound(id.to_string()))?;
        if record.synced {
            return Ok(record);
        }
        record.quarantined = false;
        record.attempts = 0;
        store.update(&record)?;
        Ok(record)
    }

    /// Deletes one record.
    pub fn delete(&self, id: &str) -> bc_core::Result<()> {
        if self.store().delete(id)? {
            Ok(())
        } else {
            Err(CoreError::ScanNotFound(id.to_string()))
        }
    }

    /// Deletes all records, or only synced ones. Returns the number removed.
    pub fn clear(&self, synced_only: bool) -> bc_core::Result<usize> {
        self.store().clear(synced_only)
    }

    pub fn status(&self) -> bc_core::Result<QueueStatus> {
        let store = self.store();
        let counts = store.counts()?;
        Ok(QueueStatus {
            backend: store.backend(),
            total: counts.total,
            pending: counts.pending,
            synced: counts.synced,
            quarantined: counts.quarantined,
        })
    }
}
