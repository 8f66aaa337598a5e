//! Log API Handlers

use axum::{Json, extract::State};
use shared::models::LogEntry;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// List all operation log entries, oldest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<LogEntry>>>> {
    let entries = state.event_log().list();
    Ok(ok_with_message(entries, "Logs retrieved successfully"))
}
