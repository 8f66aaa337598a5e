//! Scan tracking
//!
//! Applies one barcode scan to a specific (order, SKU) pair: validates the
//! identifiers, bumps the monotonic counter, stamps the scan time, and
//! reports the derived status.

use serde::Serialize;
use shared::models::FulfillmentStatus;
use shared::util::now_millis;
use thiserror::Error;

use crate::orders::store::{OrderStore, StoreError};

/// Scan failures
#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    /// Caller omitted one of the identifiers
    #[error("order id and SKU code are required")]
    InvalidInput,

    #[error("{0}")]
    NotFound(#[from] StoreError),
}

/// Outcome of a recorded scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub new_count: u32,
    pub status: FulfillmentStatus,
}

/// Record one fulfillment scan against `(order, sku)`.
///
/// Counting past the requested quantity is allowed; the status simply stays
/// Fulfilled.
pub fn scan(store: &OrderStore, order_id: &str, sku_id: &str) -> Result<ScanOutcome, ScanError> {
    if order_id.trim().is_empty() || sku_id.trim().is_empty() {
        return Err(ScanError::InvalidInput);
    }

    let (new_count, status) = store.increment_scan(order_id, sku_id, now_millis())?;
    Ok(ScanOutcome { new_count, status })
}
