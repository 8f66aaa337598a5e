//! Log API Module

pub mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Log router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/logs", get(handler::list))
}
