//! Scan Server - 订单拣货扫描系统后端
//!
//! # 架构概述
//!
//! 本模块是 Scan Server 的主入口，提供以下核心功能：
//!
//! - **订单存储** (`orders::store`): 进程内订单/SKU 聚合存储
//! - **表格导入** (`orders::import`): 解码后的表格行归一化与批量提交
//! - **扫描跟踪** (`orders::fulfillment`): 拣货扫描计数与状态推导
//! - **操作日志** (`logs`): 追加式操作日志
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! scan-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── orders/        # 订单领域：存储、导入、扫描
//! ├── logs/          # 操作日志
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod logs;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use logs::EventLog;
pub use orders::OrderStore;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: load `.env`, then initialize logging.
///
/// `RUST_LOG` selects the log level, `LOG_DIR` enables daily file output.
pub fn setup_environment() -> anyhow::Result<()> {
    // .env is optional in production deployments
    let _ = dotenv::dotenv();

    let level = std::env::var("RUST_LOG").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____
  / ___/_________ _____
  \__ \/ ___/ __ `/ __ \
 ___/ / /__/ /_/ / / / /
/____/\___/\__,_/_/ /_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
