use std::sync::Arc;

use crate::core::Config;
use crate::logs::EventLog;
use crate::orders::OrderStore;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是请求处理的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。存储和日志都在这里构造并
/// 注入，handler 不访问任何全局可变状态，测试可以为每个用例创建
/// 独立实例。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<OrderStore> | 订单/SKU 聚合存储 |
/// | event_log | Arc<EventLog> | 追加式操作日志 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单存储
    pub store: Arc<OrderStore>,
    /// 操作日志
    pub event_log: Arc<EventLog>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 方法代替
    pub fn new(config: Config, store: Arc<OrderStore>, event_log: Arc<EventLog>) -> Self {
        Self {
            config,
            store,
            event_log,
        }
    }

    /// 初始化服务器状态
    pub fn initialize(config: &Config) -> Self {
        let store = Arc::new(OrderStore::new(config.import_preserve_scans));
        let event_log = Arc::new(EventLog::new());
        Self::new(config.clone(), store, event_log)
    }

    /// 获取订单存储
    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// 获取操作日志
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }
}
