// ==========================================
// 生产偏差看板 - 聚合引擎
// ==========================================
// 职责: 按 order_date 分组求和 / 求均值 + 累计产量
// 红线: 累计量必须在升序排序之后计算
// ==========================================

use crate::domain::order::OrderRecord;
use crate::domain::selection::AggregatedPoint;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::instrument;

/// 分组累加器
#[derive(Debug, Default)]
struct DayBucket {
    produced_sum: f64,
    deviation_sum: f64,
    count: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 按日聚合
    ///
    /// # 规则
    /// - 按精确 order_date 分组（不是 month）
    /// - total = sum(produced)，mean = mean(deviation_pct)
    /// - 日期升序，cumulative = total 的前缀和
    /// - 空输入 → 空输出
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn aggregate(&self, rows: &[&OrderRecord]) -> Vec<AggregatedPoint> {
        // BTreeMap 保证键升序
        let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for row in rows {
            let bucket = buckets.entry(row.order_date).or_default();
            bucket.produced_sum += row.produced_quantity;
            bucket.deviation_sum += row.deviation_pct;
            bucket.count += 1;
        }

        let mut cumulative = 0.0;
        buckets
            .into_iter()
            .map(|(date, bucket)| {
                cumulative += bucket.produced_sum;
                AggregatedPoint {
                    date,
                    total_produced_quantity: bucket.produced_sum,
                    mean_deviation_pct: bucket.deviation_sum / bucket.count as f64,
                    cumulative_produced_quantity: cumulative,
                }
            })
            .collect()
    }
}
