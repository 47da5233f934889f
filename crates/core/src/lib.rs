// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bc-core: Shared library for the breadcrate scan queue
//!
//! This crate provides the scan record model, the crate-data payload, and the
//! durable local stores used by the `bc` CLI to keep crate scans safe while
//! the submission endpoint is unreachable.

pub mod error;
pub mod jsonl;
pub mod payload;
pub mod scan;
pub mod store;

pub use error::{Error, Result};
pub use payload::CratePayload;
pub use scan::{ScanCounts, ScanRecord, ScanState};
pub use store::{open_store, Backend, JsonlStore, ScanStore, SqliteStore, StorageKind};
