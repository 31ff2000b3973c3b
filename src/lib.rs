// ==========================================
// 生产偏差看板 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv + comfy-table
// 系统定位: 只读分析看板（计划量 vs 实际量偏差）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "tr");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据 / 数据集准备
pub mod importer;

// 引擎层 - 查询核心（纯函数）
pub mod engine;

// 配置层 - 看板配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 看板接口
pub mod api;

// 应用层 - UI 状态与终端渲染
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DeviationClass, RoundingMode, Scope, ZeroPlannedPolicy, ALL_SENTINEL};

// 领域实体
pub use domain::{AggregatedPoint, ChartPoint, Dataset, DetailRow, OrderRecord, RawOrderRecord, Selection};

// 导入
pub use importer::{DatasetPreparer, ImportError, ImportResult, LoadReport};

// 引擎
pub use engine::{
    classify_deviation, AggregationEngine, DetailEngine, DeviationClassifier, DeviationThresholds,
    FilterEngine,
};

// API
pub use api::{ApiError, ApiResult, DashboardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产偏差看板";
