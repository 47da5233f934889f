// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bc-core operations.

use thiserror::Error;

/// All possible errors that can occur in bc-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("scan not found: {0}")]
    ScanNotFound(String),

    #[error("duplicate scan id: {0}\n  hint: scan ids are assigned once and never reused")]
    DuplicateScan(String),

    #[error("storage unavailable: {0}\n  hint: check that the .breadcrate directory is writable")]
    StorageUnavailable(String),

    #[error("invalid storage kind: '{0}'\n  hint: valid kinds are: auto, sqlite, jsonl")]
    InvalidStorageKind(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Collapses low-level store failures into [`Error::StorageUnavailable`].
    ///
    /// Domain errors such as [`Error::DuplicateScan`] pass through unchanged.
    pub fn storage(self) -> Self {
        match self {
            Error::Database(e) => Error::StorageUnavailable(e.to_string()),
            Error::Io(e) => Error::StorageUnavailable(e.to_string()),
            other => other,
        }
    }
}

/// A specialized Result type for bc-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
