// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Crate scan records.
//!
//! A [`ScanRecord`] is one observation of a physical crate (identifier plus
//! bread quantity) together with the exact request body that will be sent to
//! the submission endpoint. Records move from pending to synced exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One crate scan awaiting or having completed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Unique identifier, assigned at creation and never reused.
    pub id: String,
    /// The scanned crate identifier.
    pub crate_id: String,
    /// Number of loaves counted in the crate.
    pub bread_quantity: u32,
    /// Request body sent verbatim to the submission endpoint.
    pub payload: serde_json::Value,
    /// When the scan was captured.
    pub created_at: DateTime<Utc>,
    /// True once the endpoint has confirmed the submission.
    #[serde(default)]
    pub synced: bool,
    /// Reason for the last failed submission, cleared on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of failed submission attempts.
    #[serde(default)]
    pub attempts: u32,
    /// Set once `attempts` reaches the retry cap; excluded from sync passes.
    #[serde(default)]
    pub quarantined: bool,
}

impl ScanRecord {
    /// Creates a new unsynced record.
    pub fn new(
        id: String,
        crate_id: String,
        bread_quantity: u32,
        payload: serde_json::Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        ScanRecord {
            id,
            crate_id,
            bread_quantity,
            payload,
            created_at,
            synced: false,
            error: None,
            attempts: 0,
            quarantined: false,
        }
    }

    /// Returns true if the record belongs to the pending set.
    pub fn is_pending(&self) -> bool {
        !self.synced && !self.quarantined
    }

    /// Returns the display state of this record.
    pub fn state(&self) -> ScanState {
        if self.synced {
            ScanState::Synced
        } else if self.quarantined {
            ScanState::Quarantined
        } else if self.error.is_some() {
            ScanState::Failed
        } else {
            ScanState::Pending
        }
    }
}

/// Display state of a scan, derived from its sync flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    /// Waiting for its first submission attempt.
    Pending,
    /// Last attempt failed; will be retried on the next pass.
    Failed,
    /// Retry cap reached; waits for a manual retry.
    Quarantined,
    /// Confirmed by the endpoint.
    Synced,
}

impl ScanState {
    /// Returns the string representation used in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanState::Pending => "pending",
            ScanState::Failed => "failed",
            ScanState::Quarantined => "quarantined",
            ScanState::Synced => "synced",
        }
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record counts by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounts {
    pub total: usize,
    pub pending: usize,
    pub synced: usize,
    pub quarantined: usize,
}

impl ScanCounts {
    /// Tallies counts from a set of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ScanRecord>) -> Self {
        let mut counts = ScanCounts::default();
        for record in records {
            counts.total += 1;
            if record.synced {
                counts.synced += 1;
            } else if record.quarantined {
                counts.quarantined += 1;
            } else {
                counts.pending += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
