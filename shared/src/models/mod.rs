//! Data models
//!
//! # 模块结构
//!
//! - [`order`] - 订单聚合与 SKU 行
//! - [`log`] - 操作日志条目

pub mod log;
pub mod order;

pub use log::{LogEntry, LogSeverity};
pub use order::{FulfillmentStatus, Order, OrderSkuRow, SkuLine};
