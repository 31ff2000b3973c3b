// ==========================================
// 生产偏差看板 - 领域类型定义
// ==========================================
// 职责: 选择范围 / 偏差等级 / 舍入模式 / 零计划量策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// "全部" 哨兵值（下拉框第一项）
pub const ALL_SENTINEL: &str = "ALL";

/// 哨兵标签，边界层识别为 ALL（区分大小写，"All" 等按普通取值处理）
pub const ALL_SENTINEL_ALIASES: &[&str] = &["ALL", "Tümü", "全部"];

// ==========================================
// 选择范围 (Scope)
// ==========================================
// 业务单元 / 产品组过滤条件: 全部 或 单个取值
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    All,
    Only(String),
}

impl Scope {
    /// 从 UI 字符串解析（ALL 及其本地化别名 → Scope::All）
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if ALL_SENTINEL_ALIASES.contains(&trimmed) {
            Scope::All
        } else {
            Scope::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Scope::All)
    }

    /// 判断取值是否落在范围内
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Only(expected) => expected == value,
        }
    }

    /// 下拉框展示值
    pub fn as_option(&self) -> &str {
        match self {
            Scope::All => ALL_SENTINEL,
            Scope::Only(v) => v,
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::All
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_option())
    }
}

// ==========================================
// 偏差等级 (Deviation Class)
// ==========================================
// 仅用于展示着色: LOW=绿 / MEDIUM=黄 / HIGH=红 / UNKNOWN=灰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviationClass {
    Low,
    Medium,
    High,
    Unknown, // NaN 输入
}

impl DeviationClass {
    /// 图表着色
    pub fn color(&self) -> &'static str {
        match self {
            DeviationClass::Low => "green",
            DeviationClass::Medium => "yellow",
            DeviationClass::High => "red",
            DeviationClass::Unknown => "grey",
        }
    }
}

impl fmt::Display for DeviationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviationClass::Low => write!(f, "LOW"),
            DeviationClass::Medium => write!(f, "MEDIUM"),
            DeviationClass::High => write!(f, "HIGH"),
            DeviationClass::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ==========================================
// 舍入模式 (Rounding Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    HalfEven, // 银行家舍入（默认）
    HalfUp,   // 远离零舍入
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::HalfEven
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfEven => write!(f, "HALF_EVEN"),
            RoundingMode::HalfUp => write!(f, "HALF_UP"),
        }
    }
}

// ==========================================
// 零计划量策略 (Zero Planned Policy)
// ==========================================
// plannedQuantity == 0 时偏差无定义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZeroPlannedPolicy {
    Abort,   // 整体导入失败（默认）
    SkipRow, // 跳过该行并记入导入报告
}

impl Default for ZeroPlannedPolicy {
    fn default() -> Self {
        ZeroPlannedPolicy::Abort
    }
}

impl fmt::Display for ZeroPlannedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroPlannedPolicy::Abort => write!(f, "ABORT"),
            ZeroPlannedPolicy::SkipRow => write!(f, "SKIP_ROW"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse_sentinel() {
        assert_eq!(Scope::parse("ALL"), Scope::All);
        assert_eq!(Scope::parse(" Tümü "), Scope::All);
        assert_eq!(Scope::parse("A"), Scope::Only("A".to_string()));
    }

    #[test]
    fn test_scope_parse_keeps_lookalike_values() {
        // 数据中名为 All / all 的产品组必须可被单独选中
        assert_eq!(Scope::parse("All"), Scope::Only("All".to_string()));
        assert_eq!(Scope::parse("all"), Scope::Only("all".to_string()));
        assert!(!Scope::parse("All").matches("P1"));
    }

    #[test]
    fn test_scope_matches() {
        assert!(Scope::All.matches("anything"));
        assert!(Scope::Only("A".to_string()).matches("A"));
        assert!(!Scope::Only("A".to_string()).matches("B"));
    }

    #[test]
    fn test_rounding_mode_serde() {
        let json = serde_json::to_string(&RoundingMode::HalfUp).unwrap();
        assert_eq!(json, "\"HALF_UP\"");
        let mode: RoundingMode = serde_json::from_str("\"HALF_EVEN\"").unwrap();
        assert_eq!(mode, RoundingMode::HalfEven);
    }
}
