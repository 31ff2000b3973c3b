// ==========================================
// 生产偏差看板 - 字段映射器实现
// ==========================================
// 阶段 1: 源字段 → 标准字段映射 + 类型转换
// 别名: 英文源列名 / snake_case / 土耳其语列标题
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// 标准字段名
pub const ORDER_DATE: &str = "orderDate";
pub const PRODUCTION_PLACE: &str = "productionPlace";
pub const PRODUCT_NAME: &str = "productName";
pub const PLANNED_UOM: &str = "plannedUoM";
pub const PLANNED_QUANTITY: &str = "plannedQuantity";
pub const PRODUCED_QUANTITY: &str = "producedQuantity";

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_order(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RawOrderRecord> {
        Ok(RawOrderRecord {
            order_date: self.require_string(row, ORDER_DATE, row_number)?,
            production_place: self.require_string(row, PRODUCTION_PLACE, row_number)?,
            product_name: self.require_string(row, PRODUCT_NAME, row_number)?,
            // 单位允许为空
            planned_uom: self.get_string(row, PLANNED_UOM).unwrap_or_default(),
            planned_quantity: self.require_f64(row, PLANNED_QUANTITY, row_number)?,
            produced_quantity: self.require_f64(row, PRODUCED_QUANTITY, row_number)?,
            row_number,
        })
    }
}

impl FieldMapper {
    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            ORDER_DATE => &["orderDate", "order_date", "Tarih"],
            PRODUCTION_PLACE => &["productionPlace", "production_place", "İşletme"],
            PRODUCT_NAME => &["productName", "product_name", "Ürün-Malzeme Adı"],
            PLANNED_UOM => &["plannedUoM", "planned_uom", "Birim"],
            PLANNED_QUANTITY => &["plannedQuantity", "planned_quantity", "Reçete Miktarı"],
            PRODUCED_QUANTITY => &["producedQuantity", "produced_quantity", "Fiili Miktar"],
            _ => &[],
        }
    }

    /// 提取字符串字段（空白视为缺失），按别名顺序尝试
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require_string(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    /// 解析必填浮点数（需为有限值）
    fn require_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = self.require_string(row, key, row_number)?;
        let parsed = value
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为浮点数: {}", value),
            })?;

        if !parsed.is_finite() {
            return Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("数值非有限: {}", value),
            });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_field_mapper_basic() {
        let row = row(&[
            ("orderDate", "2024-01-01"),
            ("productionPlace", "A"),
            ("productName", "P1"),
            ("plannedUoM", "kg"),
            ("plannedQuantity", "100"),
            ("producedQuantity", "110.5"),
        ]);

        let record = FieldMapper.map_to_raw_order(&row, 1).unwrap();

        assert_eq!(record.order_date, "2024-01-01");
        assert_eq!(record.production_place, "A");
        assert_eq!(record.planned_quantity, 100.0);
        assert_eq!(record.produced_quantity, 110.5);
        assert_eq!(record.row_number, 1);
    }

    #[test]
    fn test_field_mapper_turkish_headers() {
        let row = row(&[
            ("orderDate", "2024-01-01"),
            ("productionPlace", "A"),
            ("Ürün-Malzeme Adı", "  P1  "),
            ("Birim", "kg"),
            ("Reçete Miktarı", "50"),
            ("Fiili Miktar", "40"),
        ]);

        let record = FieldMapper.map_to_raw_order(&row, 3).unwrap();

        assert_eq!(record.product_name, "P1");
        assert_eq!(record.planned_uom, "kg");
        assert_eq!(record.planned_quantity, 50.0);
    }

    #[test]
    fn test_field_mapper_missing_required_field() {
        let row = row(&[("orderDate", "2024-01-01"), ("productionPlace", "A")]);

        let result = FieldMapper.map_to_raw_order(&row, 7);

        match result {
            Err(ImportError::MissingField { row, field }) => {
                assert_eq!(row, 7);
                assert_eq!(field, "productName");
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_field_mapper_invalid_number() {
        let row = row(&[
            ("orderDate", "2024-01-01"),
            ("productionPlace", "A"),
            ("productName", "P1"),
            ("plannedQuantity", "invalid"),
            ("producedQuantity", "1"),
        ]);

        let result = FieldMapper.map_to_raw_order(&row, 1);

        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { ref field, .. }) if field == "plannedQuantity"
        ));
    }
}
