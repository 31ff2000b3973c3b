// ==========================================
// 生产偏差看板 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, SourceRow};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// 检查文件存在且扩展名在允许列表内，返回小写扩展名
fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(ext)
}

/// 表头 + 数据行 → 源数据行
///
/// 行号在跳过空白行之前分配，错误定位与源文件一致
fn zip_rows<I>(headers: &[String], rows: I) -> Vec<SourceRow>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut records = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let fields: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(row.into_iter().map(|v| v.trim().to_string()))
            .collect();

        if fields.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(SourceRow {
            row_number: idx + 1,
            fields,
        });
    }
    records
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> ImportResult<Vec<SourceRow>> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let records = zip_rows(&headers, rows);
        debug!(rows = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → 字符串
    ///
    /// 日期单元格统一转为 YYYY-MM-DD，避免序列号浮点数流入日期解析
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::DateTime(_) | Data::DateTimeIso(_) => cell
                .as_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| cell.to_string()),
            _ => cell.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> ImportResult<Vec<SourceRow>> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let data_rows = rows.map(|row| row.iter().map(Self::cell_to_string).collect::<Vec<_>>());

        let records = zip_rows(&headers, data_rows);
        debug!(sheet = %sheet_name, rows = records.len(), "Excel 解析完成");
        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(
        &self,
        file_path: &Path,
    ) -> ImportResult<Vec<SourceRow>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "orderDate,productionPlace,productName,plannedUoM,plannedQuantity,producedQuantity",
            "2024-01-01,A,P1,kg,100,110",
            "2024-01-02,B,P2,kg,200,200",
        ]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("productName"), Some(&"P1".to_string()));
        assert_eq!(records[1].get("producedQuantity"), Some(&"200".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["productName,plannedQuantity", "P1,2.5", ",", "P2,3.0"]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        // 应跳过空行，后续行保留原行号
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_number, 1);
        assert_eq!(records[1].row_number, 3);
        assert_eq!(records[1].get("productName"), Some(&"P2".to_string()));
    }

    #[test]
    fn test_zip_rows_numbers_before_skipping() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            vec!["".to_string(), " ".to_string()],
            vec!["x".to_string(), "1".to_string()],
            vec!["".to_string(), "".to_string()],
            vec!["y".to_string(), " 2 ".to_string()],
        ];

        let records = zip_rows(&headers, rows);

        let numbers: Vec<usize> = records.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert_eq!(records[1].get("b"), Some(&"2".to_string()));
    }

    #[test]
    fn test_cell_to_string_dates_and_values() {
        // 序列号 45366 = 2024-03-15
        let date = Data::DateTime(ExcelDateTime::new(
            45366.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        assert_eq!(ExcelParser::cell_to_string(&date), "2024-03-15");

        let iso = Data::DateTimeIso("2024-03-16T00:00:00".to_string());
        assert_eq!(ExcelParser::cell_to_string(&iso), "2024-03-16");

        assert_eq!(ExcelParser::cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Int(7)), "7");
        assert_eq!(
            ExcelParser::cell_to_string(&Data::String("P1".to_string())),
            "P1"
        );
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_excel_parser_invalid_workbook() {
        for suffix in [".xlsx", ".xls"] {
            let mut temp_file = Builder::new().suffix(suffix).tempfile().unwrap();
            temp_file.write_all(b"not a workbook").unwrap();
            temp_file.flush().unwrap();

            let result = ExcelParser.parse_to_raw_records(temp_file.path());
            assert!(
                matches!(result, Err(ImportError::ExcelParseError(_))),
                "{} should fail as Excel: {:?}",
                suffix,
                result
            );

            // 通用解析器按扩展名分派到 Excel 分支
            let result = UniversalFileParser.parse_to_raw_records(temp_file.path());
            assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
        }
    }

    #[test]
    fn test_excel_parser_empty_file() {
        let temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let result = ExcelParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_excel_parser_rejects_csv_extension() {
        let temp_file = csv_file(&["productName", "P1"]);
        let result = ExcelParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "csv"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
