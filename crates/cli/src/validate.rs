// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

// Input length limits
pub const MAX_CRATE_ID_LENGTH: usize = 64;
pub const MAX_REFERENCE_LENGTH: usize = 200;

fn crate_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$").ok())
        .as_ref()
}

/// Validate a scanned crate id and return it trimmed.
pub fn validate_crate_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let well_formed = crate_id_pattern().is_some_and(|re| re.is_match(trimmed));
    if trimmed.is_empty() || trimmed.len() > MAX_CRATE_ID_LENGTH || !well_formed {
        return Err(Error::InvalidCrateId(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional reference field, treating blank as absent.
pub fn normalize_reference(field: &'static str, value: Option<String>) -> Result<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.len() > MAX_REFERENCE_LENGTH {
        return Err(Error::FieldTooLong {
            field,
            actual: trimmed.len(),
            max: MAX_REFERENCE_LENGTH,
        });
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
