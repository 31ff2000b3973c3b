// ==========================================
// 生产偏差看板 - 配置项定义
// ==========================================
// 存储: JSON 文件（缺省键取默认值）
// ==========================================

use crate::domain::types::{RoundingMode, ZeroPlannedPolicy};
use crate::engine::deviation::DeviationThresholds;
use serde::{Deserialize, Serialize};

/// 支持的界面语言
pub const SUPPORTED_LOCALES: &[&str] = &["tr", "en", "zh-CN"];

/// 默认窗口回看天数上限（约 100 年）
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 界面语言（tr / en / zh-CN）
    pub locale: String,

    /// 默认日期窗口回溯天数
    pub lookback_days: i64,

    /// 偏差着色阈值
    pub deviation_thresholds: DeviationThresholds,

    /// 偏差百分比舍入模式
    pub rounding_mode: RoundingMode,

    /// 零计划量处理策略
    pub zero_planned_policy: ZeroPlannedPolicy,

    /// 明细面板每页行数
    pub detail_page_size: usize,

    pub logging: LoggingConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: "tr".to_string(),
            lookback_days: 90,
            deviation_thresholds: DeviationThresholds::default(),
            rounding_mode: RoundingMode::default(),
            zero_planned_policy: ZeroPlannedPolicy::default(),
            detail_page_size: 10,
            logging: LoggingConfig::default(),
        }
    }
}

// ==========================================
// LoggingConfig - 日志配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 默认过滤级别（RUST_LOG 优先）
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}
