// ==========================================
// 生产偏差看板 - 过滤引擎
// ==========================================
// 职责: 产品组选项联动 + 布尔掩码过滤
// 输入: 只读数据集 + Selection
// 输出: 按原顺序的记录引用
// ==========================================

use crate::domain::dataset::{distinct_with_sentinel, Dataset};
use crate::domain::order::OrderRecord;
use crate::domain::selection::Selection;
use crate::domain::types::Scope;
use tracing::{instrument, trace};

// ==========================================
// FilterEngine - 过滤引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// 产品组选项（随业务单元联动）
    ///
    /// # 规则
    /// - ALL → 全局产品组列表（含 ALL）
    /// - 其他 → ALL + 该业务单元下出现过的产品组（首次出现顺序）
    pub fn list_product_groups(&self, dataset: &Dataset, business_unit: &Scope) -> Vec<String> {
        match business_unit {
            Scope::All => dataset.product_groups().to_vec(),
            Scope::Only(unit) => distinct_with_sentinel(
                dataset
                    .records()
                    .iter()
                    .filter(|r| &r.production_place == unit)
                    .map(|r| r.product_name.as_str()),
            ),
        }
    }

    /// 过滤记录
    ///
    /// # 规则（AND 组合，保持原顺序）
    /// 1. 业务单元相等（ALL 跳过）
    /// 2. 产品组相等（ALL 跳过）
    /// 3. order_date ∈ [start_date, end_date]
    /// - start_date > end_date → 空结果（非错误）
    #[instrument(skip(self, dataset), fields(rows = dataset.len()))]
    pub fn filter<'a>(&self, dataset: &'a Dataset, selection: &Selection) -> Vec<&'a OrderRecord> {
        if selection.is_empty_range() {
            trace!("日期区间为空");
            return Vec::new();
        }

        let matched: Vec<&OrderRecord> = dataset
            .records()
            .iter()
            .filter(|r| selection.business_unit.matches(&r.production_place))
            .filter(|r| selection.product_group.matches(&r.product_name))
            .filter(|r| selection.contains_date(r.order_date))
            .collect();

        trace!(matched = matched.len(), "过滤完成");
        matched
    }
}
