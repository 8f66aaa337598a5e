/// 服务器配置 - 扫描服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | IMPORT_PRESERVE_SCANS | false | 重复导入同一 SKU 时保留扫描计数 |
/// | LOG_DIR | (无) | 日志文件目录，未设置时仅输出到控制台 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 IMPORT_PRESERVE_SCANS=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 重复导入同一 (订单, SKU) 时保留扫描进度
    ///
    /// 默认关闭：重复导入会把 `quantity_scanned` 重置为 0（与原始
    /// 上传行为一致）。开启后重新导入只更新标题/颜色/数量/价格。
    pub import_preserve_scans: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            import_preserve_scans: std::env::var("IMPORT_PRESERVE_SCANS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
