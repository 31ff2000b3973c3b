// ==========================================
// 生产偏差看板 - 配置层
// ==========================================
// 职责: 看板配置加载、覆写、校验
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod config_manager;
pub mod dashboard_config;

// 重导出核心配置管理器
pub use config_manager::{env_keys, ConfigError, ConfigManager, ConfigResult};
pub use dashboard_config::{
    DashboardConfig, LogFormat, LoggingConfig, MAX_LOOKBACK_DAYS, SUPPORTED_LOCALES,
};
