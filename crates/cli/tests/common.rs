// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The `bc` binary with the caller's environment overrides removed.
pub fn bc() -> Command {
    let mut cmd = cargo_bin_cmd!("bc");
    cmd.env_remove("BREADCRATE_DIR")
        .env_remove("BREADCRATE_ENDPOINT")
        .env_remove("BREADCRATE_TOKEN")
        .env_remove("BC_TIMINGS")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create an initialized temp directory without a remote
pub fn init_temp() -> TempDir {
    init_temp_with(&[])
}

/// Helper to create an initialized temp directory with extra init args
pub fn init_temp_with(args: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    bc().arg("init")
        .args(args)
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to queue a scan offline and return its ID
pub fn scan_offline(temp: &TempDir, crate_id: &str, quantity: u32) -> String {
    let output = bc()
        .args(["scan", crate_id, "-q", &quantity.to_string(), "--offline", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["scan"]["id"].as_str().unwrap().to_string()
}

/// Run a command in the temp dir and parse its JSON stdout
pub fn json_output(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = bc().args(args).current_dir(temp.path()).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}
