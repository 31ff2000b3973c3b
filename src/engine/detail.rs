// ==========================================
// 生产偏差看板 - 明细查询
// ==========================================
// 红线: 明细取自完整数据集，不受当前过滤条件影响
// ==========================================

use crate::domain::dataset::Dataset;
use crate::domain::order::DetailRow;

#[derive(Debug, Default, Clone, Copy)]
pub struct DetailEngine;

impl DetailEngine {
    pub fn new() -> Self {
        Self
    }

    /// 按产品名精确匹配，投影为五个展示字段；无匹配 → 空
    pub fn detail(&self, dataset: &Dataset, product_name: &str) -> Vec<DetailRow> {
        dataset
            .records()
            .iter()
            .filter(|r| r.product_name == product_name)
            .map(|r| r.to_detail_row())
            .collect()
    }
}
