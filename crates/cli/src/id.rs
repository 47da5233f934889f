// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Prefix shared by all scan ids.
pub const SCAN_ID_PREFIX: &str = "scan";

/// Generate a scan ID from crate id, quantity, and capture time.
/// Format: scan-{hash} where hash is the first 8 hex chars of
/// SHA256(crate id + quantity + timestamp with nanoseconds)
pub fn generate_id(crate_id: &str, quantity: u32, created_at: &DateTime<Utc>) -> String {
    let input = format!(
        "{}:{}:{}",
        crate_id,
        quantity,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]); // First 8 hex chars (4 bytes)
    format!("{}-{}", SCAN_ID_PREFIX, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_id<F>(
    crate_id: &str,
    quantity: u32,
    created_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(crate_id, quantity, created_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
