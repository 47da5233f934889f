// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    scan_not_found = { Error::ScanNotFound("scan-1234abcd".into()), "scan-1234abcd" },
    duplicate_scan = { Error::DuplicateScan("a".into()), "never reused" },
    storage_unavailable = { Error::StorageUnavailable("disk full".into()), "disk full" },
    invalid_storage_kind = { Error::InvalidStorageKind("redis".into()), "auto, sqlite, jsonl" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn storage_collapses_io_errors() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let err = Error::from(io_err).storage();
    assert!(matches!(err, Error::StorageUnavailable(ref msg) if msg.contains("read-only")));
}

#[test]
fn storage_keeps_domain_errors() {
    let err = Error::DuplicateScan("a".into()).storage();
    assert!(matches!(err, Error::DuplicateScan(_)));
}
