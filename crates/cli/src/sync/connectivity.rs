// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! [`ConnectivityMonitor`] polls a [`Probe`] on an interval and publishes
//! online/offline transitions on a broadcast channel. Any number of
//! subscribers may listen; each sees every transition.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Connectivity state values for the atomic state field.
const STATE_UNKNOWN: u8 = 0;
const STATE_ONLINE: u8 = 1;
const STATE_OFFLINE: u8 = 2;

/// Capacity of the transition channel. Slow subscribers skip old events.
const EVENT_CAPACITY: usize = 16;

/// Last observed reachability of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Not probed yet.
    Unknown,
    Online,
    Offline,
}

impl Connectivity {
    fn from_u8(value: u8) -> Self {
        match value {
            STATE_ONLINE => Connectivity::Online,
            STATE_OFFLINE => Connectivity::Offline,
            _ => Connectivity::Unknown,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Connectivity::Unknown => STATE_UNKNOWN,
            Connectivity::Online => STATE_ONLINE,
            Connectivity::Offline => STATE_OFFLINE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Connectivity::Unknown => "unknown",
            Connectivity::Online => "online",
            Connectivity::Offline => "offline",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A connectivity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

/// Reachability check against the remote endpoint.
pub trait Probe: Send + Sync {
    /// Resolves to true if the endpoint is reachable.
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Probe that treats any HTTP response as online.
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(HttpProbe {
            client,
            url: endpoint.to_string(),
        })
    }
}

impl Probe for HttpProbe {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            match self.client.get(&self.url).send().await {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!(error = %e, "connectivity probe failed");
                    false
                }
            }
        })
    }
}

/// Polls a probe and broadcasts transitions.
pub struct ConnectivityMonitor<P> {
    probe: P,
    interval: Duration,
    state: AtomicU8,
    events: broadcast::Sender<ConnectivityEvent>,
    cancel_token: CancellationToken,
}

impl<P: Probe> ConnectivityMonitor<P> {
    pub fn new(probe: P, interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        ConnectivityMonitor {
            probe,
            interval,
            state: AtomicU8::new(STATE_UNKNOWN),
            events,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Registers a new listener. Only transitions after this call are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> Connectivity {
        Connectivity::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Token that stops [`run`](Self::run) when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Probes once and publishes a transition if the state changed.
    pub async fn poll_once(&self) -> Option<ConnectivityEvent> {
        let next = if self.probe.probe().await {
            Connectivity::Online
        } else {
            Connectivity::Offline
        };
        let previous = Connectivity::from_u8(self.state.swap(next.as_u8(), Ordering::AcqRel));
        if previous == next {
            return None;
        }

        let event = match next {
            Connectivity::Online => ConnectivityEvent::Online,
            _ => ConnectivityEvent::Offline,
        };
        tracing::info!(from = %previous, to = %next, "connectivity changed");
        // No subscribers is not an error.
        let _ = self.events.send(event);
        Some(event)
    }

    /// Polls until cancelled.
    pub async fn run(&self) {
        loop {
            if self.cancel_token.is_cancelled() {
                break;
            }
            self.poll_once().await;

            tokio::select! {
                _ = self.cancel_token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        tracing::debug!("connectivity monitor stopped");
    }
}
