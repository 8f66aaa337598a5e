//! Order API Module
//!
//! Read access to the order aggregate plus the spreadsheet import endpoint.

pub mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Flattened (order, sku) rows
        .route("/", get(handler::list))
        // Bulk import of decoded spreadsheet rows
        .route("/import", post(handler::import))
        // Order detail
        .route("/{id}", get(handler::get_by_id))
}
