//! Spreadsheet import normalization
//!
//! Takes the decoded table (rows of column-label → cell maps), validates
//! the header against the required column set, coerces every cell to its
//! target type, and commits the whole batch to the store in one shot.
//!
//! # All-or-nothing
//!
//! Nothing is written until every row has normalized cleanly: a missing
//! column or an unparseable cell aborts the import with zero mutations.
//! The commit itself happens under a single store write lock, so a
//! concurrent scan can never observe a half-applied import.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orders::store::{NormalizedRow, OrderStore};
use crate::utils::format::format_thousands;

// ========== Required Columns ==========

pub const COL_ORDER_SERIAL: &str = "order serial";
pub const COL_SKU_CODE: &str = "SKU code";
pub const COL_PRODUCT_TITLE: &str = "product title";
pub const COL_COLOR: &str = "color";
pub const COL_REQUESTED_QUANTITY: &str = "requested quantity";
pub const COL_LABEL_PRICE: &str = "label price";
pub const COL_PROVINCE: &str = "province";
pub const COL_CITY: &str = "city";
pub const COL_AMOUNT_PAID: &str = "amount paid";

/// Every column an import must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_ORDER_SERIAL,
    COL_SKU_CODE,
    COL_PRODUCT_TITLE,
    COL_COLOR,
    COL_REQUESTED_QUANTITY,
    COL_LABEL_PRICE,
    COL_PROVINCE,
    COL_CITY,
    COL_AMOUNT_PAID,
];

/// A decoded spreadsheet row: column label → cell value
pub type SheetRow = IndexMap<String, CellValue>;

/// Dynamically-typed spreadsheet cell
///
/// Decoders hand cells over as text, number, or empty (JSON string, number,
/// or null). A label missing from a row also reads as [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Stringify a cell the way a spreadsheet displays it: integral numbers
    /// lose the trailing ".0", text passes through trimmed.
    fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

// ========== Errors ==========

/// Import failures; any of these aborts the import with zero mutations
#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    /// Required header labels absent from the decoded table
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A cell could not be coerced to its target type (`row` is 1-based)
    #[error("row {row}, column \"{column}\": {reason}")]
    Cell {
        row: usize,
        column: String,
        reason: String,
    },
}

fn cell_error(row: usize, column: &str, reason: String) -> ImportError {
    ImportError::Cell {
        row,
        column: column.to_string(),
        reason,
    }
}

// ========== Coercion ==========

/// Quantity cell → non-negative integer; blank counts as 0.
fn coerce_quantity(cell: &CellValue, row: usize) -> Result<u32, ImportError> {
    let value = match cell {
        CellValue::Empty => return Ok(0),
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            cell_error(
                row,
                COL_REQUESTED_QUANTITY,
                format!("cannot parse \"{}\" as a quantity", s.trim()),
            )
        })?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(cell_error(
            row,
            COL_REQUESTED_QUANTITY,
            format!("quantity must be a non-negative number, got {}", value),
        ));
    }
    Ok(value as u32)
}

/// Amount cell → thousands-formatted integer string; blank yields `None`.
///
/// Fractional parts are dropped, matching how the source sheets carry
/// amounts (integer rial values stored as floats).
fn coerce_amount(cell: &CellValue, row: usize, column: &str) -> Result<Option<String>, ImportError> {
    let value = match cell {
        CellValue::Empty => return Ok(None),
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            cell_error(
                row,
                column,
                format!("cannot parse \"{}\" as an amount", s.trim()),
            )
        })?,
    };
    if !value.is_finite() {
        return Err(cell_error(
            row,
            column,
            "amount must be a finite number".to_string(),
        ));
    }
    Ok(Some(format_thousands(value as i64)))
}

// ========== Normalization ==========

/// Validate the header and normalize every row.
///
/// Header labels are taken from the first row — the decoded table is
/// uniform, so a label absent there is absent from the whole sheet.
pub fn normalize_rows(rows: &[SheetRow]) -> Result<Vec<NormalizedRow>, ImportError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let header = &rows[0];
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !header.contains_key(**column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut batch = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let row_no = idx + 1;
        let cell = |column: &str| row.get(column).cloned().unwrap_or(CellValue::Empty);

        let price = coerce_amount(&cell(COL_LABEL_PRICE), row_no, COL_LABEL_PRICE)?
            .unwrap_or_else(|| "0".to_string());
        let payment = coerce_amount(&cell(COL_AMOUNT_PAID), row_no, COL_AMOUNT_PAID)?;
        let quantity_requested = coerce_quantity(&cell(COL_REQUESTED_QUANTITY), row_no)?;

        batch.push(NormalizedRow {
            order_id: cell(COL_ORDER_SERIAL).to_text(),
            state: cell(COL_PROVINCE).to_text(),
            city: cell(COL_CITY).to_text(),
            payment,
            sku_id: cell(COL_SKU_CODE).to_text(),
            title: cell(COL_PRODUCT_TITLE).to_text(),
            color: cell(COL_COLOR).to_text(),
            quantity_requested,
            price,
        });
    }
    Ok(batch)
}

/// Normalize and commit a decoded table; returns the number of rows processed.
pub fn import_rows(store: &OrderStore, rows: &[SheetRow]) -> Result<usize, ImportError> {
    let batch = normalize_rows(rows)?;
    Ok(store.apply_import(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FulfillmentStatus;

    /// Build rows from JSON, the same shape the import endpoint receives
    fn rows(value: serde_json::Value) -> Vec<SheetRow> {
        serde_json::from_value(value).unwrap()
    }

    fn full_row() -> serde_json::Value {
        serde_json::json!({
            "order serial": 1001,
            "SKU code": "SKU-A",
            "product title": "Leather Belt",
            "color": "Brown",
            "requested quantity": 2,
            "label price": 150000.0,
            "province": "Tehran",
            "city": "Tehran",
            "amount paid": 420000.0,
        })
    }

    #[test]
    fn test_import_single_row() {
        let store = OrderStore::new(false);
        let count = import_rows(&store, &rows(serde_json::json!([full_row()]))).unwrap();
        assert_eq!(count, 1);

        let order = store.get_order("1001").unwrap();
        assert_eq!(order.state, "Tehran");
        assert_eq!(order.payment.as_deref(), Some("420,000"));

        let line = &order.skus["SKU-A"];
        assert_eq!(line.title, "Leather Belt");
        assert_eq!(line.quantity_requested, 2);
        assert_eq!(line.quantity_scanned, 0);
        assert_eq!(line.price, "150,000");
        assert_eq!(line.fulfillment_status(), FulfillmentStatus::Pending);
    }

    #[test]
    fn test_numeric_order_serial_is_stringified() {
        let store = OrderStore::new(false);
        import_rows(&store, &rows(serde_json::json!([full_row()]))).unwrap();
        // 1001 (number) → "1001", 不是 "1001.0"
        assert!(store.get_order("1001").is_some());
    }

    #[test]
    fn test_missing_columns_named_and_nothing_committed() {
        let store = OrderStore::new(false);
        let mut row = full_row();
        row.as_object_mut().unwrap().remove("province");
        row.as_object_mut().unwrap().remove("amount paid");

        let err = import_rows(&store, &rows(serde_json::json!([row]))).unwrap_err();
        match &err {
            ImportError::MissingColumns(cols) => {
                assert!(cols.contains(&"province".to_string()));
                assert!(cols.contains(&"amount paid".to_string()));
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
        assert!(store.list_order_sku_rows().is_empty());
    }

    #[test]
    fn test_blank_cells_use_defaults() {
        let store = OrderStore::new(false);
        let mut row = full_row();
        let obj = row.as_object_mut().unwrap();
        obj["requested quantity"] = serde_json::Value::Null;
        obj["label price"] = serde_json::Value::Null;
        obj["amount paid"] = serde_json::Value::Null;

        import_rows(&store, &rows(serde_json::json!([row]))).unwrap();

        let order = store.get_order("1001").unwrap();
        assert!(order.payment.is_none());
        let line = &order.skus["SKU-A"];
        assert_eq!(line.quantity_requested, 0);
        assert_eq!(line.price, "0");
    }

    #[test]
    fn test_numeric_text_cells_are_parsed() {
        let store = OrderStore::new(false);
        let mut row = full_row();
        let obj = row.as_object_mut().unwrap();
        obj["requested quantity"] = serde_json::json!(" 3 ");
        obj["label price"] = serde_json::json!("89000.5");

        import_rows(&store, &rows(serde_json::json!([row]))).unwrap();

        let line = &store.get_order("1001").unwrap().skus["SKU-A"];
        assert_eq!(line.quantity_requested, 3);
        // 小数部分被丢弃
        assert_eq!(line.price, "89,000");
    }

    #[test]
    fn test_bad_cell_aborts_whole_import() {
        let store = OrderStore::new(false);
        let mut bad = full_row();
        bad.as_object_mut().unwrap()["requested quantity"] = serde_json::json!("three");

        // 第一行有效，第二行损坏：整批导入放弃，不留下部分提交
        let err = import_rows(&store, &rows(serde_json::json!([full_row(), bad]))).unwrap_err();
        match err {
            ImportError::Cell { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, COL_REQUESTED_QUANTITY);
            }
            other => panic!("expected Cell error, got {:?}", other),
        }
        assert!(store.list_order_sku_rows().is_empty());
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let store = OrderStore::new(false);
        let mut row = full_row();
        row.as_object_mut().unwrap()["requested quantity"] = serde_json::json!(-1);

        let err = import_rows(&store, &rows(serde_json::json!([row]))).unwrap_err();
        assert!(matches!(err, ImportError::Cell { row: 1, .. }));
    }

    #[test]
    fn test_empty_table_processes_zero_rows() {
        let store = OrderStore::new(false);
        assert_eq!(import_rows(&store, &[]).unwrap(), 0);
    }

    #[test]
    fn test_error_message_names_missing_columns() {
        let err = ImportError::MissingColumns(vec!["province".to_string(), "city".to_string()]);
        assert_eq!(err.to_string(), "missing required columns: province, city");
    }
}
