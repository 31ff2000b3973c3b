// ==========================================
// 生产偏差看板 - 字段派生服务实现
// ==========================================
// 职责: month / deviation_pct 派生
// ==========================================

use crate::domain::types::RoundingMode;
use chrono::NaiveDate;

/// 偏差百分比保留小数位
pub const DEVIATION_DECIMALS: i32 = 2;

pub struct DerivationService {
    rounding_mode: RoundingMode,
}

impl DerivationService {
    pub fn new(rounding_mode: RoundingMode) -> Self {
        Self { rounding_mode }
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// 派生 month
    ///
    /// # 规则
    /// - YYYY-MM 截断
    pub fn derive_month(&self, order_date: NaiveDate) -> String {
        order_date.format("%Y-%m").to_string()
    }

    /// 派生 deviation_pct
    ///
    /// # 规则
    /// - round(((produced - planned) / planned) * 100, 2)
    /// - planned == 0 → None（偏差无定义，调用方转换为 DivisionByZero）
    pub fn derive_deviation_pct(&self, planned: f64, produced: f64) -> Option<f64> {
        if planned == 0.0 {
            return None;
        }
        let raw = ((produced - planned) / planned) * 100.0;
        Some(round_to(raw, DEVIATION_DECIMALS, self.rounding_mode))
    }
}

impl Default for DerivationService {
    fn default() -> Self {
        Self::new(RoundingMode::default())
    }
}

/// 按指定模式保留 decimals 位小数
///
/// 先放大再取整，与常见表格库一致（二进制表示下的 x.xx5 可能不是精确中点）
pub fn round_to(value: f64, decimals: i32, mode: RoundingMode) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let rounded = match mode {
        RoundingMode::HalfEven => scaled.round_ties_even(),
        RoundingMode::HalfUp => scaled.round(),
    };
    rounded / factor
}
