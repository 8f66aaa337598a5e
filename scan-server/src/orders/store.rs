//! In-memory order store
//!
//! Holds the order/SKU aggregate behind a single `RwLock`. One lock for the
//! whole map keeps multi-row imports from interleaving with concurrent
//! scans (no lost increments, no torn reads of an order's SKU map), and
//! lets readers take consistent snapshots.
//!
//! # Semantics
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `apply_import` | commits a validated batch under one write lock |
//! | `increment_scan` | +1 scan counter, stamps the scan timestamp |
//! | `get_order` / `list_order_sku_rows` | cloned snapshots, insertion order |
//!
//! Orders and SKU lines are never deleted; re-importing an existing
//! (order, SKU) pair overwrites the line and resets its scan counter unless
//! the store was built with `preserve_scans_on_reimport`.

use indexmap::IndexMap;
use parking_lot::RwLock;
use shared::models::{FulfillmentStatus, Order, OrderSkuRow, SkuLine};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("SKU {0} not found in order {1}")]
    SkuNotFound(String, String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One normalized spreadsheet row, validated and ready to commit
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub order_id: String,
    pub state: String,
    pub city: String,
    pub payment: Option<String>,
    pub sku_id: String,
    pub title: String,
    pub color: String,
    pub quantity_requested: u32,
    pub price: String,
}

/// Order storage, constructed once at startup and injected into handlers
#[derive(Debug)]
pub struct OrderStore {
    orders: RwLock<IndexMap<String, Order>>,
    /// 重复导入同一 SKU 时保留扫描进度 (默认 false: 重置计数)
    preserve_scans_on_reimport: bool,
}

impl OrderStore {
    pub fn new(preserve_scans_on_reimport: bool) -> Self {
        Self {
            orders: RwLock::new(IndexMap::new()),
            preserve_scans_on_reimport,
        }
    }

    // ========== Import ==========

    /// Commit a validated import batch under a single write-lock acquisition.
    ///
    /// Rows are applied in order: the order shell is created on first sight
    /// of an order id (later rows never touch shell fields), then the SKU
    /// line is written, overwriting any previous line under the same key.
    /// Returns the number of rows committed.
    pub fn apply_import(&self, batch: Vec<NormalizedRow>) -> usize {
        let mut orders = self.orders.write();
        let count = batch.len();
        for row in batch {
            Self::upsert_order_shell(&mut orders, &row);
            self.put_sku_line(&mut orders, row);
        }
        count
    }

    /// Create the order shell if the id is unseen; no-op otherwise.
    fn upsert_order_shell(orders: &mut IndexMap<String, Order>, row: &NormalizedRow) -> bool {
        if orders.contains_key(&row.order_id) {
            return false;
        }
        orders.insert(
            row.order_id.clone(),
            Order::shell(row.state.clone(), row.city.clone(), row.payment.clone()),
        );
        true
    }

    /// Overwrite the SKU line under `(order, sku)`.
    ///
    /// The scan counter and timestamp reset to their initial state unless
    /// the store preserves scans across re-imports. An existing key keeps
    /// its position in the SKU map.
    fn put_sku_line(&self, orders: &mut IndexMap<String, Order>, row: NormalizedRow) {
        let NormalizedRow {
            order_id,
            sku_id,
            title,
            color,
            quantity_requested,
            price,
            ..
        } = row;
        let Some(order) = orders.get_mut(&order_id) else {
            // Shell is always upserted first within apply_import
            return;
        };

        let (quantity_scanned, last_scan_timestamp) = match order.skus.get(&sku_id) {
            Some(prev) if self.preserve_scans_on_reimport => {
                (prev.quantity_scanned, prev.last_scan_timestamp)
            }
            _ => (0, None),
        };

        order.skus.insert(
            sku_id,
            SkuLine {
                title,
                color,
                quantity_requested,
                quantity_scanned,
                price,
                last_scan_timestamp,
            },
        );
    }

    // ========== Scan ==========

    /// Increment the scan counter of `(order, sku)` and stamp the scan time.
    ///
    /// Returns the new counter value and the derived status. No upper bound:
    /// counting past the requested quantity is allowed.
    pub fn increment_scan(
        &self,
        order_id: &str,
        sku_id: &str,
        timestamp: i64,
    ) -> StoreResult<(u32, FulfillmentStatus)> {
        let mut orders = self.orders.write();
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| StoreError::OrderNotFound(order_id.to_string()))?;
        let line = order
            .skus
            .get_mut(sku_id)
            .ok_or_else(|| StoreError::SkuNotFound(sku_id.to_string(), order_id.to_string()))?;

        line.quantity_scanned += 1;
        line.last_scan_timestamp = Some(timestamp);
        Ok((line.quantity_scanned, line.fulfillment_status()))
    }

    // ========== Queries ==========

    /// Snapshot of one order aggregate
    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.orders.read().get(order_id).cloned()
    }

    /// Flattened (order, sku) projections, in insertion order of both maps
    pub fn list_order_sku_rows(&self) -> Vec<OrderSkuRow> {
        let orders = self.orders.read();
        let mut rows = Vec::new();
        for (order_id, order) in orders.iter() {
            for (sku_id, line) in order.skus.iter() {
                rows.push(OrderSkuRow {
                    order_id: order_id.clone(),
                    sku: sku_id.clone(),
                    title: line.title.clone(),
                    color: line.color.clone(),
                    quantity: line.quantity_requested,
                    scanned: line.quantity_scanned,
                    status: line.fulfillment_status(),
                    price: line.price.clone(),
                    scan_timestamp: line.last_scan_timestamp,
                    state: order.state.clone(),
                    city: order.city.clone(),
                    payment: order.payment.clone(),
                });
            }
        }
        rows
    }

    /// Number of orders currently held
    pub fn order_count(&self) -> usize {
        self.orders.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: &str, sku_id: &str, quantity: u32) -> NormalizedRow {
        NormalizedRow {
            order_id: order_id.to_string(),
            state: "Tehran".to_string(),
            city: "Tehran".to_string(),
            payment: Some("420,000".to_string()),
            sku_id: sku_id.to_string(),
            title: "Leather Belt".to_string(),
            color: "Brown".to_string(),
            quantity_requested: quantity,
            price: "150,000".to_string(),
        }
    }

    #[test]
    fn test_apply_import_creates_order_and_line() {
        let store = OrderStore::new(false);
        let count = store.apply_import(vec![row("1001", "SKU-A", 2)]);
        assert_eq!(count, 1);

        let order = store.get_order("1001").unwrap();
        assert_eq!(order.state, "Tehran");
        assert_eq!(order.status, FulfillmentStatus::Pending);
        let line = &order.skus["SKU-A"];
        assert_eq!(line.quantity_requested, 2);
        assert_eq!(line.quantity_scanned, 0);
        assert!(line.last_scan_timestamp.is_none());
        assert_eq!(line.fulfillment_status(), FulfillmentStatus::Pending);
    }

    #[test]
    fn test_shell_fields_stick_from_first_row() {
        let store = OrderStore::new(false);
        let mut second = row("1001", "SKU-B", 1);
        second.state = "Isfahan".to_string();
        second.payment = None;
        store.apply_import(vec![row("1001", "SKU-A", 2), second]);

        let order = store.get_order("1001").unwrap();
        // 后续行不会覆盖 shell 字段
        assert_eq!(order.state, "Tehran");
        assert_eq!(order.payment.as_deref(), Some("420,000"));
        assert_eq!(order.skus.len(), 2);
    }

    #[test]
    fn test_reimport_resets_scan_progress() {
        let store = OrderStore::new(false);
        store.apply_import(vec![row("1001", "SKU-A", 2)]);
        store.increment_scan("1001", "SKU-A", 1_000).unwrap();

        let mut updated = row("1001", "SKU-A", 5);
        updated.color = "Black".to_string();
        store.apply_import(vec![updated]);

        let order = store.get_order("1001").unwrap();
        let line = &order.skus["SKU-A"];
        assert_eq!(line.quantity_requested, 5);
        assert_eq!(line.color, "Black");
        assert_eq!(line.quantity_scanned, 0);
        assert!(line.last_scan_timestamp.is_none());
    }

    #[test]
    fn test_reimport_preserves_scan_progress_when_configured() {
        let store = OrderStore::new(true);
        store.apply_import(vec![row("1001", "SKU-A", 2)]);
        store.increment_scan("1001", "SKU-A", 1_000).unwrap();

        store.apply_import(vec![row("1001", "SKU-A", 5)]);

        let order = store.get_order("1001").unwrap();
        let line = &order.skus["SKU-A"];
        assert_eq!(line.quantity_requested, 5);
        assert_eq!(line.quantity_scanned, 1);
        assert_eq!(line.last_scan_timestamp, Some(1_000));
    }

    #[test]
    fn test_increment_scan_transitions_status() {
        let store = OrderStore::new(false);
        store.apply_import(vec![row("1001", "SKU-A", 2)]);

        let (count, status) = store.increment_scan("1001", "SKU-A", 10).unwrap();
        assert_eq!((count, status), (1, FulfillmentStatus::Pending));

        let (count, status) = store.increment_scan("1001", "SKU-A", 20).unwrap();
        assert_eq!((count, status), (2, FulfillmentStatus::Fulfilled));

        // 超量扫描：计数继续增加，状态保持 Fulfilled
        let (count, status) = store.increment_scan("1001", "SKU-A", 30).unwrap();
        assert_eq!((count, status), (3, FulfillmentStatus::Fulfilled));

        let order = store.get_order("1001").unwrap();
        assert_eq!(order.skus["SKU-A"].last_scan_timestamp, Some(30));
    }

    #[test]
    fn test_increment_scan_unknown_keys() {
        let store = OrderStore::new(false);
        store.apply_import(vec![row("1001", "SKU-A", 2)]);

        assert_eq!(
            store.increment_scan("9999", "SKU-A", 10),
            Err(StoreError::OrderNotFound("9999".to_string()))
        );
        assert_eq!(
            store.increment_scan("1001", "SKU-X", 10),
            Err(StoreError::SkuNotFound(
                "SKU-X".to_string(),
                "1001".to_string()
            ))
        );

        // Failed scans leave the store untouched
        let order = store.get_order("1001").unwrap();
        assert_eq!(order.skus["SKU-A"].quantity_scanned, 0);
    }

    #[test]
    fn test_list_rows_follow_insertion_order() {
        let store = OrderStore::new(false);
        store.apply_import(vec![
            row("2002", "SKU-B", 1),
            row("1001", "SKU-Z", 1),
            row("1001", "SKU-A", 1),
        ]);

        let keys: Vec<(String, String)> = store
            .list_order_sku_rows()
            .into_iter()
            .map(|r| (r.order_id, r.sku))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2002".to_string(), "SKU-B".to_string()),
                ("1001".to_string(), "SKU-Z".to_string()),
                ("1001".to_string(), "SKU-A".to_string()),
            ]
        );
    }

    #[test]
    fn test_reimported_sku_keeps_its_position() {
        let store = OrderStore::new(false);
        store.apply_import(vec![row("1001", "SKU-A", 1), row("1001", "SKU-B", 1)]);
        store.apply_import(vec![row("1001", "SKU-A", 9)]);

        let skus: Vec<String> = store
            .list_order_sku_rows()
            .into_iter()
            .map(|r| r.sku)
            .collect();
        assert_eq!(skus, vec!["SKU-A".to_string(), "SKU-B".to_string()]);
    }

    #[test]
    fn test_order_count() {
        let store = OrderStore::new(false);
        assert_eq!(store.order_count(), 0);
        store.apply_import(vec![row("1001", "SKU-A", 1), row("2002", "SKU-A", 1)]);
        assert_eq!(store.order_count(), 2);
    }
}
