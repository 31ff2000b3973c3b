// ==========================================
// 生产偏差看板 - 选择条件校验器
// ==========================================
// 职责: UI 原始字符串 → 类型化 Selection
// 约束: 校验只发生在边界，查询引擎不处理非法输入
// ==========================================

use chrono::NaiveDate;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::selection::Selection;
use crate::domain::types::Scope;
use crate::importer::DataCleaner;

/// 解析范围（空白视为非法，ALL 及本地化别名 → Scope::All）
pub fn parse_scope(field: &str, value: &str) -> ApiResult<Scope> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(Scope::parse(value))
}

/// 解析日期（与导入层接受相同格式，日粒度）
pub fn parse_date(field: &str, value: &str) -> ApiResult<NaiveDate> {
    DataCleaner
        .parse_order_date(value)
        .ok_or_else(|| ApiError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// 解析完整选择条件
///
/// start > end 不视为错误（查询结果为空）
pub fn parse_selection(
    business_unit: &str,
    product_group: &str,
    start_date: &str,
    end_date: &str,
) -> ApiResult<Selection> {
    Ok(Selection::new(
        parse_scope("business_unit", business_unit)?,
        parse_scope("product_group", product_group)?,
        parse_date("start_date", start_date)?,
        parse_date("end_date", end_date)?,
    ))
}
