// ==========================================
// 生产偏差看板 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 流程: 解析 → 映射 → 准备（派生）
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// SourceRow - 源文件数据行
// ==========================================
// row_number: 数据行序号（1 起，不含表头；空行也占用序号）
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

impl SourceRow {
    pub fn get(&self, column: &str) -> Option<&String> {
        self.fields.get(column)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为源数据行（列名 → 值）
    ///
    /// # 返回
    /// - Ok(Vec<SourceRow>): 已跳过空行，行号保留源文件位置
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<SourceRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper {
    /// 将原始行记录映射为 RawOrderRecord
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 行号（用于错误定位）
    fn map_to_raw_order(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawOrderRecord>;
}
