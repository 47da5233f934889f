// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;
use yare::parameterized;

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["bc"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn scan_defaults_quantity() {
    match parse(&["scan", "CRATE-1"]) {
        Command::Scan {
            crate_id,
            quantity,
            offline,
            output,
            refs,
        } => {
            assert_eq!(crate_id, "CRATE-1");
            assert_eq!(quantity, DEFAULT_BREAD_QUANTITY);
            assert!(!offline);
            assert_eq!(output, OutputFormat::Text);
            assert!(refs.order.is_none());
        }
        _ => panic!("expected scan"),
    }
}

#[test]
fn scan_with_references() {
    match parse(&[
        "scan", "CRATE-2", "-q", "5", "--order", "DO-17", "--batch", "DB-3", "--source",
        "bakery", "--location", "dock 2", "--offline", "-o", "json",
    ]) {
        Command::Scan {
            quantity,
            refs,
            offline,
            output,
            ..
        } => {
            assert_eq!(quantity, 5);
            assert_eq!(refs.order.as_deref(), Some("DO-17"));
            assert_eq!(refs.batch.as_deref(), Some("DB-3"));
            assert_eq!(refs.source.as_deref(), Some("bakery"));
            assert_eq!(refs.location.as_deref(), Some("dock 2"));
            assert!(offline);
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("expected scan"),
    }
}

#[test]
fn init_parses_storage_kind() {
    match parse(&["init", "--storage", "jsonl", "--endpoint", "https://x.test/prod"]) {
        Command::Init { endpoint, storage } => {
            assert_eq!(storage, Some(StorageKind::Jsonl));
            assert_eq!(endpoint.as_deref(), Some("https://x.test/prod"));
        }
        _ => panic!("expected init"),
    }
}

#[parameterized(
    negative_quantity = { &["scan", "CRATE-1", "-q", "-3"] },
    bad_storage = { &["init", "--storage", "indexeddb"] },
    retry_without_id = { &["retry"] },
    unknown_output = { &["pending", "-o", "yaml"] },
)]
fn rejected_arguments(args: &[&str]) {
    let mut argv = vec!["bc"];
    argv.extend_from_slice(args);
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn history_limit_default() {
    match parse(&["history"]) {
        Command::History { limit, .. } => assert_eq!(limit, 20),
        _ => panic!("expected history"),
    }
}
