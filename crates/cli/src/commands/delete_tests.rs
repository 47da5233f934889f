// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use bc_core::StorageKind;
use yare::parameterized;

use super::{clear_impl, run_impl};
use crate::commands::testing::TestContext;
use crate::error::Error;

#[parameterized(sqlite = { StorageKind::Sqlite }, jsonl = { StorageKind::Jsonl })]
fn delete_removes_one_scan(kind: StorageKind) {
    let t = TestContext::with_storage(kind);
    t.add_scan("a", "CRATE-1", 30);
    t.add_scan("b", "CRATE-2", 5);

    run_impl(&t.ctx, "a").unwrap();

    assert!(t.get("a").is_none());
    assert!(t.get("b").is_some());
}

#[test]
fn delete_unknown_scan_is_not_found() {
    let t = TestContext::new();

    let err = run_impl(&t.ctx, "missing").unwrap_err();

    assert!(matches!(err, Error::ScanNotFound(id) if id == "missing"));
}

#[parameterized(
    everything = { false, 3, 0 },
    synced_only = { true, 1, 2 },
)]
fn clear_counts_removed_scans(synced_only: bool, removed: usize, left: usize) {
    let t = TestContext::new();
    t.add_scan("a", "CRATE-1", 30);
    t.add_scan("b", "CRATE-2", 5);
    t.add_scan("c", "CRATE-3", 12);
    t.ctx.queue.mark_synced("b").unwrap();

    assert_eq!(clear_impl(&t.ctx, synced_only).unwrap(), removed);
    assert_eq!(t.ctx.queue.all().unwrap().len(), left);
}
