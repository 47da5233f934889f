// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bc_core::{ScanRecord, ScanState};

use crate::sync::{Connectivity, QueueStatus, SyncReport};

/// Format a scan as a single list line.
///
/// Output format:
/// ```text
/// scan-0a1b2c3d  CRATE-1  x30  [pending]  2026-03-01 09:00
/// ```
pub fn format_scan_line(record: &ScanRecord) -> String {
    let mut line = format!(
        "{}  {}  x{}  [{}]  {}",
        record.id,
        record.crate_id,
        record.bread_quantity,
        record.state(),
        record.created_at.format("%Y-%m-%d %H:%M"),
    );
    if record.attempts > 0 && record.state() != ScanState::Synced {
        line.push_str(&format!("  ({} attempts)", record.attempts));
    }
    line
}

/// Format the last error of an unsynced scan, indented under its line.
pub fn format_scan_error(record: &ScanRecord) -> Option<String> {
    if record.synced {
        return None;
    }
    record
        .error
        .as_ref()
        .map(|error| format!("    error: {error}"))
}

/// Format all lines for one scan.
pub fn format_scan(record: &ScanRecord) -> Vec<String> {
    let mut lines = vec![format_scan_line(record)];
    lines.extend(format_scan_error(record));
    lines
}

/// One-line summary of a sync pass.
pub fn format_report(report: &SyncReport) -> String {
    let mut line = format!(
        "Synced {}, failed {}, {} pending",
        report.synced, report.failed, report.pending
    );
    if report.quarantined > 0 {
        line.push_str(&format!(
            ", {} quarantined (use 'bc retry <id>')",
            report.quarantined
        ));
    }
    line
}

/// Lines for `bc status`.
pub fn format_status(
    status: &QueueStatus,
    endpoint: Option<&str>,
    connectivity: Connectivity,
) -> Vec<String> {
    let remote = match endpoint {
        Some(endpoint) => format!("Remote: {endpoint} ({connectivity})"),
        None => "Remote: not configured (scans are only queued)".to_string(),
    };
    vec![
        format!("Storage: {}", status.backend),
        remote,
        format!("Pending: {}", status.pending),
        format!("Quarantined: {}", status.quarantined),
        format!("Synced (kept): {}", status.synced),
        format!("Total: {}", status.total),
    ]
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
