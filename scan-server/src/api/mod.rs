//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 连通性探测和系统状态
//! - [`orders`] - 订单查询与表格导入接口
//! - [`scan`] - 拣货扫描接口
//! - [`logs`] - 操作日志查询接口

pub mod health;
pub mod logs;
pub mod orders;
pub mod scan;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    // 浏览器前端直接访问 API：CORS 全放开
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(scan::router())
        .merge(logs::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
