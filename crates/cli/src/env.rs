// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns `true` if `BC_TIMINGS` is set (any value).
pub fn bc_timings() -> bool {
    std::env::var(vars::BC_TIMINGS).is_ok()
}

/// Returns the value of `BREADCRATE_DIR` if set.
pub fn work_dir() -> Option<PathBuf> {
    non_empty(vars::BREADCRATE_DIR).map(PathBuf::from)
}

/// Returns the bearer token from `BREADCRATE_TOKEN` if set.
pub fn token() -> Option<String> {
    non_empty(vars::BREADCRATE_TOKEN)
}

/// Returns the endpoint override from `BREADCRATE_ENDPOINT` if set.
pub fn endpoint() -> Option<String> {
    non_empty(vars::BREADCRATE_ENDPOINT)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
