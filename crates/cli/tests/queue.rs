// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn pending_lists_oldest_first() {
    let temp = init_temp();
    let first = scan_offline(&temp, "CRATE-1", 30);
    let second = scan_offline(&temp, "CRATE-2", 5);

    let output = bc().arg("pending").current_dir(temp.path()).output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let a = stdout.find(&first).unwrap();
    let b = stdout.find(&second).unwrap();
    assert!(a < b, "{stdout}");
    assert!(stdout.contains("[pending]"), "{stdout}");
}

#[test]
fn pending_on_empty_queue() {
    let temp = init_temp();

    bc().arg("pending")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending scans"));
}

#[test]
fn history_lists_newest_first_with_limit() {
    let temp = init_temp();
    scan_offline(&temp, "CRATE-1", 30);
    scan_offline(&temp, "CRATE-2", 5);
    let newest = scan_offline(&temp, "CRATE-3", 8);

    let history = json_output(&temp, &["history", "-n", "2", "-o", "json"]);

    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], newest.as_str());
    assert_eq!(records[1]["crate_id"], "CRATE-2");
}

#[test]
fn delete_removes_scan() {
    let temp = init_temp();
    let id = scan_offline(&temp, "CRATE-1", 30);

    bc().args(["delete", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {id}")));

    let pending = json_output(&temp, &["pending", "-o", "json"]);
    assert!(pending.as_array().unwrap().is_empty());
}

#[test]
fn delete_unknown_scan_fails() {
    let temp = init_temp();

    bc().args(["delete", "scan-00000000"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan not found: scan-00000000"));
}

#[test]
fn clear_removes_everything() {
    let temp = init_temp();
    scan_offline(&temp, "CRATE-1", 30);
    scan_offline(&temp, "CRATE-2", 5);

    bc().arg("clear")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 scan(s)"));
}

#[test]
fn clear_synced_keeps_pending() {
    let temp = init_temp();
    let id = scan_offline(&temp, "CRATE-1", 30);

    bc().args(["clear", "--synced"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 0 synced scan(s)"));

    let pending = json_output(&temp, &["pending", "-o", "json"]);
    assert_eq!(pending[0]["id"], id.as_str());
}
