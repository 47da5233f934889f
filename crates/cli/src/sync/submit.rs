// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Submission of scans to the crate-data endpoint.
//!
//! [`Submitter`] is the seam between the queue and the network; tests drive
//! the queue with in-memory submitters.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bc_core::ScanRecord;
use serde_json::Value;

use crate::error::{Error, Result};

/// Path of the submission function under the configured endpoint.
pub const SUBMIT_PATH: &str = "submitCrateDataToZoho";

/// Why a submission did not succeed. Both kinds are retried the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The endpoint answered but refused the scan.
    #[error("{0}")]
    Rejected(String),

    /// The endpoint could not be reached.
    #[error("network error: {0}")]
    Network(String),
}

/// Future returned by [`Submitter::submit`].
pub type SubmitFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<(), SubmitError>> + Send + 'a>>;

/// Sends one scan payload to the remote endpoint.
pub trait Submitter: Send + Sync {
    fn submit<'a>(&'a self, record: &'a ScanRecord) -> SubmitFuture<'a>;
}

/// Submitter that POSTs payloads over HTTP.
pub struct HttpSubmitter {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(HttpSubmitter {
            client,
            url: submit_url(endpoint),
            token,
        })
    }

    /// Full URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Submitter for HttpSubmitter {
    fn submit<'a>(&'a self, record: &'a ScanRecord) -> SubmitFuture<'a> {
        Box::pin(async move {
            let mut request = self.client.post(&self.url).json(&record.payload);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            interpret_response(status, &body)
        })
    }
}

fn submit_url(endpoint: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), SUBMIT_PATH)
}

/// Classifies an endpoint response.
///
/// A 2xx is a success unless the body says `"success": false`. Anything else
/// is a rejection carrying the body's `error` or `message`, or the status.
pub fn interpret_response(status: u16, body: &str) -> std::result::Result<(), SubmitError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if (200..300).contains(&status) {
        let refused = parsed
            .as_ref()
            .and_then(|v| v.get("success"))
            .and_then(Value::as_bool)
            == Some(false);
        if refused {
            let reason = parsed
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| "submission failed".to_string());
            return Err(SubmitError::Rejected(reason));
        }
        return Ok(());
    }

    let reason = parsed
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    Err(SubmitError::Rejected(reason))
}

fn error_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|key| match body.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    })
}
