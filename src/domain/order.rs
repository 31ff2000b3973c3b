// ==========================================
// 生产偏差看板 - 生产订单领域模型
// ==========================================
// 输入列: orderDate / productionPlace / productName /
//         plannedUoM / plannedQuantity / producedQuantity
// 派生列: month / deviation_pct（加载时计算一次，之后只读）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawOrderRecord - 原始订单记录
// ==========================================
// 用途: 字段映射层输出，日期仍为原始字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrderRecord {
    pub order_date: String,       // 订单日期（未解析）
    pub production_place: String, // 业务单元
    pub product_name: String,     // 产品 / 物料名称（产品组）
    pub planned_uom: String,      // 计量单位
    pub planned_quantity: f64,    // 计划量（配方量）
    pub produced_quantity: f64,   // 实际产量

    // 元信息
    pub row_number: usize, // 源文件行号（1 起，不含表头）
}

// ==========================================
// OrderRecord - 已准备的订单记录
// ==========================================
// 红线: deviation_pct 为派生数据，不可外部提供或修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub production_place: String,
    pub product_name: String,
    pub planned_uom: String,
    pub planned_quantity: f64,
    pub produced_quantity: f64,

    // ===== 派生字段 =====
    pub month: String,      // YYYY-MM
    pub deviation_pct: f64, // 保留两位小数
}

impl OrderRecord {
    /// 投影为明细面板的五个展示字段
    pub fn to_detail_row(&self) -> DetailRow {
        DetailRow {
            product_name: self.product_name.clone(),
            planned_uom: self.planned_uom.clone(),
            planned_quantity: self.planned_quantity,
            produced_quantity: self.produced_quantity,
            deviation_pct: self.deviation_pct,
        }
    }
}

// ==========================================
// DetailRow - 明细行（表格 / 明细面板共用投影）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub product_name: String,
    pub planned_uom: String,
    pub planned_quantity: f64,
    pub produced_quantity: f64,
    pub deviation_pct: f64,
}
