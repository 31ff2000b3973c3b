// ==========================================
// 生产偏差看板 - 数据集
// ==========================================
// 红线: 启动时构建一次，之后只读（通过 Arc 共享）
// ==========================================

use crate::domain::order::OrderRecord;
use crate::domain::types::ALL_SENTINEL;
use std::collections::HashSet;

/// 不可变数据集
///
/// 字段全部私有，构建后无任何修改入口。
/// 业务单元 / 产品组选项列表在构建时派生，首项为 ALL 哨兵，
/// 其余按首次出现顺序去重。
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    business_units: Vec<String>,
    product_groups: Vec<String>,
}

impl Dataset {
    /// 由已准备的记录构建数据集
    pub fn new(records: Vec<OrderRecord>) -> Self {
        let business_units =
            distinct_with_sentinel(records.iter().map(|r| r.production_place.as_str()));
        let product_groups =
            distinct_with_sentinel(records.iter().map(|r| r.product_name.as_str()));

        Self {
            records,
            business_units,
            product_groups,
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 业务单元选项（含 ALL）
    pub fn business_units(&self) -> &[String] {
        &self.business_units
    }

    /// 产品组选项（含 ALL）
    pub fn product_groups(&self) -> &[String] {
        &self.product_groups
    }
}

/// 首次出现顺序去重，并在首位插入 ALL 哨兵
pub(crate) fn distinct_with_sentinel<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut out = vec![ALL_SENTINEL.to_string()];
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
