//! Order Model
//!
//! The order aggregate: an externally-keyed shell holding an
//! insertion-ordered map of SKU lines. Fulfillment progress lives on the
//! line; the Pending/Fulfilled status is derived on read, never stored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fulfillment state of a SKU line, derived from scanned vs requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentStatus {
    Pending,
    Fulfilled,
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single product line item within an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuLine {
    pub title: String,
    pub color: String,
    /// Fulfillment target for this line
    pub quantity_requested: u32,
    /// Monotonic scan counter; only the scan operation advances it
    pub quantity_scanned: u32,
    /// Thousands-formatted label price, "0" when the source cell was blank
    pub price: String,
    /// Unix millis of the most recent scan, absent until first scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan_timestamp: Option<i64>,
}

impl SkuLine {
    /// Fulfilled once the scan counter has reached the requested quantity
    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        if self.quantity_scanned >= self.quantity_requested {
            FulfillmentStatus::Fulfilled
        } else {
            FulfillmentStatus::Pending
        }
    }
}

/// Order aggregate keyed by the external order serial
///
/// Shell fields (`state`, `city`, `payment`, `status`) are set when the
/// order id is first seen during an import and never touched by later rows
/// for the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// SKU lines in first-import order
    pub skus: IndexMap<String, SkuLine>,
    pub state: String,
    pub city: String,
    /// Thousands-formatted paid amount, absent when the source cell was blank
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
    /// Order-level lifecycle tag; currently always Pending (no transition path)
    pub status: FulfillmentStatus,
}

impl Order {
    /// Fresh shell with an empty SKU map
    pub fn shell(state: String, city: String, payment: Option<String>) -> Self {
        Self {
            skus: IndexMap::new(),
            state,
            city,
            payment,
            status: FulfillmentStatus::Pending,
        }
    }
}

/// Flattened (order, sku) projection for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSkuRow {
    #[serde(rename = "id")]
    pub order_id: String,
    pub sku: String,
    pub title: String,
    pub color: String,
    pub quantity: u32,
    pub scanned: u32,
    pub status: FulfillmentStatus,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_timestamp: Option<i64>,
    pub state: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<String>,
}
