// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use bc_core::ScanRecord;

use super::pending_records;
use crate::commands::testing::TestContext;
use crate::config::Config;

fn ids(records: &[ScanRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

fn context_with_mixed_scans() -> TestContext {
    let t = TestContext::with_config(Config {
        max_attempts: 1,
        ..Config::default()
    });
    for (id, crate_id) in [("s1", "CRATE-1"), ("s2", "CRATE-2"), ("s3", "CRATE-3"), ("s4", "CRATE-4")] {
        t.add_scan(id, crate_id, 10);
    }
    t.ctx.queue.mark_synced("s2").unwrap();
    assert!(t.ctx.queue.record_failure("s3", "validation").unwrap());
    t
}

#[test]
fn pending_excludes_synced_and_quarantined() {
    let t = context_with_mixed_scans();

    let records = pending_records(&t.ctx, false).unwrap();

    assert_eq!(ids(&records), vec!["s1", "s4"]);
}

#[test]
fn pending_all_includes_quarantined_in_order() {
    let t = context_with_mixed_scans();

    let records = pending_records(&t.ctx, true).unwrap();

    assert_eq!(ids(&records), vec!["s1", "s3", "s4"]);
    assert!(records[1].quarantined);
    assert_eq!(records[1].error.as_deref(), Some("validation"));
}

#[test]
fn empty_queue_has_no_pending() {
    let t = TestContext::new();

    assert!(pending_records(&t.ctx, true).unwrap().is_empty());
}
