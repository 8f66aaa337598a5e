//! Scan API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::LogSeverity;
use validator::Validate;

use crate::core::ServerState;
use crate::orders::fulfillment::{self, ScanError, ScanOutcome};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Scan request payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "orderId is required"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "sku is required"))]
    pub sku: String,
}

/// Record one fulfillment scan
pub async fn scan(
    State(state): State<ServerState>,
    Json(payload): Json<ScanRequest>,
) -> AppResult<Json<AppResponse<ScanOutcome>>> {
    if payload.validate().is_err() {
        state.event_log().append(
            "Scan failed",
            LogSeverity::Error,
            Some("Missing required fields".to_string()),
        );
        return Err(AppError::validation("orderId and sku are required"));
    }

    match fulfillment::scan(state.store(), &payload.order_id, &payload.sku) {
        Ok(outcome) => {
            state.event_log().append(
                "Item scanned successfully",
                LogSeverity::Success,
                Some(format!(
                    "order_id: {}, sku: {}",
                    payload.order_id, payload.sku
                )),
            );
            Ok(ok_with_message(outcome, "Scan recorded successfully"))
        }
        Err(ScanError::InvalidInput) => {
            state.event_log().append(
                "Scan failed",
                LogSeverity::Error,
                Some("Missing required fields".to_string()),
            );
            Err(AppError::validation("orderId and sku are required"))
        }
        Err(ScanError::NotFound(e)) => {
            state.event_log().append(
                "Scan failed",
                LogSeverity::Error,
                Some(format!(
                    "Order {} or SKU {} not found",
                    payload.order_id, payload.sku
                )),
            );
            Err(AppError::not_found(e.to_string()))
        }
    }
}
