// ==========================================
// 生产偏差看板 - 查询选择与聚合点
// ==========================================

use crate::domain::types::{DeviationClass, Scope};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

// ==========================================
// Selection - 查询选择（每次交互重建，不持久化）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub business_unit: Scope,
    pub product_group: Scope,
    pub start_date: NaiveDate, // 含
    pub end_date: NaiveDate,   // 含
}

impl Selection {
    pub fn new(
        business_unit: Scope,
        product_group: Scope,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            business_unit,
            product_group,
            start_date,
            end_date,
        }
    }

    /// 默认选择: ALL / ALL，[today - lookback_days, today]
    ///
    /// 超出日期范围时起始日截断为 NaiveDate::MIN
    pub fn default_window(today: NaiveDate, lookback_days: i64) -> Self {
        let start = TimeDelta::try_days(lookback_days)
            .and_then(|delta| today.checked_sub_signed(delta))
            .unwrap_or(NaiveDate::MIN);
        Self::new(Scope::All, Scope::All, start, today)
    }

    /// 日期区间是否为空（start > end）
    pub fn is_empty_range(&self) -> bool {
        self.start_date > self.end_date
    }

    /// 日期是否落在闭区间内
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==========================================
// AggregatedPoint - 按日聚合点
// ==========================================
// 每个不同 order_date 一个点，升序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    pub date: NaiveDate,
    pub total_produced_quantity: f64,
    pub mean_deviation_pct: f64,
    pub cumulative_produced_quantity: f64,
}

// ==========================================
// ChartPoint - 图表点（聚合点 + 着色等级）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub point: AggregatedPoint,
    pub deviation_class: DeviationClass,
}
