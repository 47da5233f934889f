// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use bc_core::{open_store, CratePayload, ScanRecord, StorageKind};
use chrono::Utc;

use super::connectivity::Probe;
use super::queue::{QueuePolicy, ScanQueue};
use super::submit::{SubmitError, SubmitFuture, Submitter};

/// Create an unsynced record with a payload shaped like the real one.
pub fn make_record(id: &str, crate_id: &str, quantity: u32) -> ScanRecord {
    let payload = CratePayload::new(crate_id, quantity)
        .with_device_scan_id(id)
        .to_value()
        .unwrap();
    ScanRecord::new(
        id.to_string(),
        crate_id.to_string(),
        quantity,
        payload,
        Utc::now(),
    )
}

/// Open a queue in `dir` on the given backend.
pub fn open_queue(dir: &Path, kind: StorageKind, policy: QueuePolicy) -> ScanQueue {
    ScanQueue::new(open_store(dir, kind).unwrap(), policy)
}

type Outcome = Box<dyn Fn(&ScanRecord) -> Result<(), SubmitError> + Send + Sync>;

/// Submitter with a scripted outcome per record. Records every call.
pub struct MockSubmitter {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSubmitter {
    /// Accepts every record.
    pub fn succeeding() -> Self {
        Self::with(|_| Ok(()))
    }

    /// Rejects records matching `predicate` with `reason`; accepts the rest.
    pub fn rejecting_when<F>(reason: &str, predicate: F) -> Self
    where
        F: Fn(&ScanRecord) -> bool + Send + Sync + 'static,
    {
        let reason = reason.to_string();
        Self::with(move |r| {
            if predicate(r) {
                Err(SubmitError::Rejected(reason.clone()))
            } else {
                Ok(())
            }
        })
    }

    /// Fails every record as unreachable.
    pub fn offline() -> Self {
        Self::with(|_| Err(SubmitError::Network("connection refused".into())))
    }

    pub fn with<F>(outcome: F) -> Self
    where
        F: Fn(&ScanRecord) -> Result<(), SubmitError> + Send + Sync + 'static,
    {
        MockSubmitter {
            outcome: Box::new(outcome),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Ids submitted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Submitter for MockSubmitter {
    fn submit<'a>(&'a self, record: &'a ScanRecord) -> SubmitFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(record.id.clone());
            (self.outcome)(record)
        })
    }
}

/// Probe that replays a script of results, repeating the last one.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<bool>>,
    last: Mutex<bool>,
}

impl ScriptedProbe {
    pub fn new(script: &[bool]) -> Self {
        ScriptedProbe {
            script: Mutex::new(script.iter().copied().collect()),
            last: Mutex::new(false),
        }
    }
}

impl Probe for ScriptedProbe {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            let next = self.script.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();
            if let Some(value) = next {
                *last = value;
            }
            *last
        })
    }
}

/// Serve a single canned HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(
    status: u16,
    body: &str,
) -> (String, tokio::task::JoinHandle<String>) {
    let (url, handle) = serve_sequence(&[(status, body)]).await;
    (url, tokio::spawn(async move { handle.await.unwrap().remove(0) }))
}

/// Serve one canned response per connection, in order.
///
/// Returns the base URL and a handle resolving to the raw requests.
pub async fn serve_sequence(
    responses: &[(u16, &str)],
) -> (String, tokio::task::JoinHandle<Vec<String>>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let responses: Vec<String> = responses
        .iter()
        .map(|(status, body)| {
            format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            )
        })
        .collect();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            requests.push(String::from_utf8_lossy(&buf).into_owned());
        }
        requests
    });

    (format!("http://{addr}"), handle)
}

fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// A local URL nothing is listening on.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
