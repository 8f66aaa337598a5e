//! Scan API Module

pub mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Scan router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/scan", post(handler::scan))
}
