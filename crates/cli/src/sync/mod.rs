// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline scan queue and sync machinery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ScanQueue  │────►│  Submitter  │────►│  Submission │
//! │  (manager)  │◄────│   (trait)   │◄────│  endpoint   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   ▲
//!        ▼                   │ Online events
//! ┌─────────────┐     ┌─────────────┐
//! │  ScanStore  │     │ Connectivity│
//! │ sqlite/jsonl│     │   Monitor   │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! Scans are always persisted first and submitted later. A sync pass walks a
//! snapshot of the pending set in insertion order; failures stay queued with
//! their reason and are retried on the next pass.

mod connectivity;
mod lock;
mod queue;
mod submit;

pub use connectivity::{Connectivity, ConnectivityEvent, ConnectivityMonitor, HttpProbe, Probe};
pub use lock::SyncLock;
pub use queue::{
    QueuePolicy, QueueStatus, ScanQueue, SyncError, SyncReport, DEFAULT_HISTORY_LIMIT,
    DEFAULT_MAX_ATTEMPTS,
};
pub use submit::{interpret_response, HttpSubmitter, SubmitError, Submitter, SUBMIT_PATH};

#[cfg(test)]
pub(crate) mod test_helpers;
