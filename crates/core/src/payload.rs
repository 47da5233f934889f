// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request body for the crate-data submission endpoint.
//!
//! The queue treats payloads as opaque JSON; this type only exists so that
//! callers build them with the field names the endpoint expects.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Body of a `submitCrateDataToZoho` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CratePayload {
    pub crate_id_input: String,
    pub bread_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scan_id: Option<String>,
    #[serde(default)]
    pub is_offline_scan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_order_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_batch_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CratePayload {
    /// Creates a payload for the given crate and quantity.
    pub fn new(crate_id: impl Into<String>, bread_quantity: u32) -> Self {
        CratePayload {
            crate_id_input: crate_id.into(),
            bread_quantity,
            ..Default::default()
        }
    }

    /// Tags the payload with the scan id that produced it.
    pub fn with_device_scan_id(mut self, id: impl Into<String>) -> Self {
        self.device_scan_id = Some(id.into());
        self
    }

    /// Marks whether the scan was captured without connectivity.
    pub fn offline(mut self, is_offline: bool) -> Self {
        self.is_offline_scan = is_offline;
        self
    }

    pub fn with_stock_source(mut self, source: Option<String>) -> Self {
        self.stock_source = source;
        self
    }

    pub fn with_dispatch_order(mut self, order_ref: Option<String>) -> Self {
        self.dispatch_order_ref = order_ref;
        self
    }

    pub fn with_donation_batch(mut self, batch_ref: Option<String>) -> Self {
        self.donation_batch_ref = batch_ref;
        self
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Converts into the opaque JSON value stored on a scan record.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
