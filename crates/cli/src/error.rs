// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::SyncError;

/// All possible errors that can occur in the bcrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'bc init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("scan not found: {0}")]
    ScanNotFound(String),

    #[error("invalid crate id: '{0}'\n  hint: crate ids are 1-64 letters, digits, '-', '_', '.' or '/'")]
    InvalidCrateId(String),

    #[error("no remote endpoint configured\n  hint: run 'bc init --endpoint <url>' or set BREADCRATE_ENDPOINT")]
    EndpointRequired,

    #[error("invalid endpoint '{0}'\n  hint: endpoints must start with http:// or https://")]
    InvalidEndpoint(String),

    #[error("{field} too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("another sync is running (lock held on {0})")]
    SyncLocked(String),

    #[error("a sync pass is already running")]
    SyncInProgress,

    #[error("http client error: {0}")]
    Http(String),

    #[error("{0}")]
    Store(bc_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bcrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<bc_core::Error> for Error {
    fn from(e: bc_core::Error) -> Self {
        match e {
            bc_core::Error::ScanNotFound(id) => Error::ScanNotFound(id),
            bc_core::Error::Io(e) => Error::Io(e),
            bc_core::Error::Json(e) => Error::Json(e),
            other => Error::Store(other),
        }
    }
}

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        match e {
            SyncError::Store(e) => e.into(),
            SyncError::InProgress => Error::SyncInProgress,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
