// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

fn record(id: &str) -> ScanRecord {
    ScanRecord::new(
        id.to_string(),
        format!("CRATE-{id}"),
        24,
        json!({"crate_id_input": format!("CRATE-{id}"), "bread_quantity": 24}),
        Utc::now(),
    )
}

#[test]
fn open_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("scans.db");

    SqliteStore::open(&path).unwrap();

    assert!(path.exists());
}

#[test]
fn reopen_keeps_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scans.db");

    let mut store = SqliteStore::open(&path).unwrap();
    store.insert(&record("a")).unwrap();
    drop(store);

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("a").unwrap().unwrap().crate_id, "CRATE-a");
}

#[test]
fn payload_and_timestamp_survive_storage() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut r = record("a");
    r.payload = json!({"crate_id_input": "CRATE-a", "nested": {"location": "dock 2"}});
    store.insert(&r).unwrap();

    let loaded = store.get("a").unwrap().unwrap();
    assert_eq!(loaded.payload, r.payload);
    assert_eq!(loaded.created_at, r.created_at);
}

#[test]
fn duplicate_insert_maps_to_duplicate_scan() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.insert(&record("a")).unwrap();

    let err = store.insert(&record("a")).unwrap_err();
    assert!(matches!(err, Error::DuplicateScan(id) if id == "a"));
}

#[test]
fn corrupted_timestamp_is_reported() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.insert(&record("a")).unwrap();
    store
        .conn
        .execute("UPDATE scans SET created_at = 'yesterday'", [])
        .unwrap();

    assert!(store.get("a").is_err());
}

#[test]
fn migration_adds_retry_columns_to_old_schema() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE scans (
             seq INTEGER PRIMARY KEY AUTOINCREMENT,
             id TEXT NOT NULL UNIQUE,
             crate_id TEXT NOT NULL,
             bread_quantity INTEGER NOT NULL,
             payload TEXT NOT NULL,
             created_at TEXT NOT NULL,
             synced INTEGER NOT NULL DEFAULT 0,
             error TEXT
         );
         INSERT INTO scans (id, crate_id, bread_quantity, payload, created_at)
         VALUES ('old', 'CRATE-9', 12, '{}', '2026-01-05T08:00:00+00:00');",
    )
    .unwrap();

    run_migrations(&conn).unwrap();
    let store = SqliteStore { conn };

    let loaded = store.get("old").unwrap().unwrap();
    assert_eq!(loaded.attempts, 0);
    assert!(!loaded.quarantined);
    assert_eq!(store.pending().unwrap().len(), 1);
}

#[test]
fn migrations_are_idempotent() {
    let store = SqliteStore::open_in_memory().unwrap();
    run_migrations(&store.conn).unwrap();
    run_migrations(&store.conn).unwrap();
}

#[test]
fn migration_surfaces_table_info_errors() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE legacy (id TEXT);
         CREATE VIEW scans AS SELECT id FROM legacy;
         DROP TABLE legacy;",
    )
    .unwrap();

    let err = migrate_add_retry_columns(&conn).unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}
