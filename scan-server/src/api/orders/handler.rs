//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::{LogSeverity, Order, OrderSkuRow};

use crate::core::ServerState;
use crate::orders::import::{self, SheetRow};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Import summary returned to the uploader
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub processed_count: usize,
}

/// List all orders, flattened to (order, sku) rows
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<OrderSkuRow>>>> {
    let rows = state.store().list_order_sku_rows();
    Ok(ok_with_message(rows, "Orders retrieved successfully"))
}

/// Get one order aggregate by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state
        .store()
        .get_order(&id)
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok_with_message(order, "Order retrieved successfully"))
}

/// Import a decoded spreadsheet (rows of column → cell maps)
///
/// All-or-nothing: a missing column or unparseable cell rejects the whole
/// table. Both outcomes land in the operation log.
pub async fn import(
    State(state): State<ServerState>,
    Json(rows): Json<Vec<SheetRow>>,
) -> AppResult<Json<AppResponse<ImportSummary>>> {
    match import::import_rows(state.store(), &rows) {
        Ok(processed_count) => {
            state.event_log().append(
                "Spreadsheet imported successfully",
                LogSeverity::Success,
                Some(format!("processed_count: {}", processed_count)),
            );
            Ok(ok_with_message(
                ImportSummary { processed_count },
                format!(
                    "File processed successfully. {} rows imported.",
                    processed_count
                ),
            ))
        }
        Err(e) => {
            state.event_log().append(
                "Spreadsheet import failed",
                LogSeverity::Error,
                Some(e.to_string()),
            );
            Err(AppError::validation(e.to_string()))
        }
    }
}
