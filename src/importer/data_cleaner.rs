// ==========================================
// 生产偏差看板 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 日期标准化
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};

/// 纯日期格式（按优先级）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%d.%m.%Y"];

/// 带时间的格式（只取日期部分）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

pub struct DataCleaner;

impl DataCleaner {
    /// 去除首尾空白
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 解析订单日期（日粒度，丢弃时分秒）
    ///
    /// # 返回
    /// - Some(NaiveDate): 任一已知格式解析成功
    /// - None: 无法解析（调用方转换为 MalformedDate）
    pub fn parse_order_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }
}
