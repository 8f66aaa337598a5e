//! 健康检查和系统状态路由

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::util::now_millis;

use crate::core::ServerState;
use crate::utils::{AppResponse, ok_with_message};

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/system/status", get(system_status))
}

#[derive(Serialize)]
pub struct SystemStatus {
    status: &'static str,
    message: &'static str,
    /// Unix millis
    timestamp: i64,
    stats: SystemStats,
}

#[derive(Serialize)]
pub struct SystemStats {
    total_orders: usize,
    total_logs: usize,
}

/// Connectivity probe
pub async fn ping() -> Json<AppResponse<()>> {
    Json(AppResponse {
        success: true,
        message: "pong".to_string(),
        data: None,
    })
}

/// System status and statistics
pub async fn system_status(State(state): State<ServerState>) -> Json<AppResponse<SystemStatus>> {
    ok_with_message(
        SystemStatus {
            status: "operational",
            message: "System is running normally",
            timestamp: now_millis(),
            stats: SystemStats {
                total_orders: state.store().order_count(),
                total_logs: state.event_log().len(),
            },
        },
        "Status retrieved successfully",
    )
}
