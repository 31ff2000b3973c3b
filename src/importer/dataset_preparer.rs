// ==========================================
// 生产偏差看板 - 数据集准备器
// ==========================================
// 流程: 解析 → 映射 → 日期标准化 → 派生 → 构建只读数据集
// 启动时执行一次
// ==========================================

use crate::domain::dataset::Dataset;
use crate::domain::order::{OrderRecord, RawOrderRecord};
use crate::domain::types::{RoundingMode, ZeroPlannedPolicy};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::derivation::DerivationService;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, ORDER_DATE};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper as _, FileParser};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// LoadReport - 导入报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub accepted_rows: usize,
    pub skipped: Vec<SkippedRow>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: String,
}

// ==========================================
// DatasetPreparer
// ==========================================
pub struct DatasetPreparer {
    cleaner: DataCleaner,
    derivation: DerivationService,
    zero_planned_policy: ZeroPlannedPolicy,
}

impl DatasetPreparer {
    pub fn new(rounding_mode: RoundingMode, zero_planned_policy: ZeroPlannedPolicy) -> Self {
        Self {
            cleaner: DataCleaner,
            derivation: DerivationService::new(rounding_mode),
            zero_planned_policy,
        }
    }

    /// 准备单行记录
    ///
    /// # 错误
    /// - MalformedDate: 日期无法解析
    /// - DivisionByZero: 计划量为零
    pub fn prepare_record(&self, raw: &RawOrderRecord) -> ImportResult<OrderRecord> {
        let order_date = self
            .cleaner
            .parse_order_date(&raw.order_date)
            .ok_or_else(|| ImportError::MalformedDate {
                row: raw.row_number,
                field: ORDER_DATE.to_string(),
                value: raw.order_date.clone(),
            })?;

        let deviation_pct = self
            .derivation
            .derive_deviation_pct(raw.planned_quantity, raw.produced_quantity)
            .ok_or_else(|| ImportError::DivisionByZero {
                row: raw.row_number,
                product_name: raw.product_name.clone(),
            })?;

        Ok(OrderRecord {
            order_date,
            production_place: self.cleaner.clean_text(&raw.production_place),
            product_name: self.cleaner.clean_text(&raw.product_name),
            planned_uom: self.cleaner.clean_text(&raw.planned_uom),
            planned_quantity: raw.planned_quantity,
            produced_quantity: raw.produced_quantity,
            month: self.derivation.derive_month(order_date),
            deviation_pct,
        })
    }

    /// 准备数据集（严格模式）
    ///
    /// 任一行失败即整体失败，不做行级跳过。
    pub fn prepare(&self, raw_records: &[RawOrderRecord]) -> ImportResult<Dataset> {
        let records = raw_records
            .iter()
            .map(|raw| self.prepare_record(raw))
            .collect::<ImportResult<Vec<_>>>()?;
        Ok(Dataset::new(records))
    }

    /// 按零计划量策略准备数据集
    ///
    /// - Abort: 等价于 prepare
    /// - SkipRow: 零计划量行跳过并计入报告；日期错误仍整体失败
    pub fn prepare_with_policy(
        &self,
        raw_records: &[RawOrderRecord],
    ) -> ImportResult<(Dataset, Vec<SkippedRow>)> {
        let mut records = Vec::with_capacity(raw_records.len());
        let mut skipped = Vec::new();

        for raw in raw_records {
            match self.prepare_record(raw) {
                Ok(record) => records.push(record),
                Err(err @ ImportError::DivisionByZero { .. })
                    if self.zero_planned_policy == ZeroPlannedPolicy::SkipRow =>
                {
                    warn!(row_number = raw.row_number, error = %err, "跳过零计划量行");
                    skipped.push(SkippedRow {
                        row_number: raw.row_number,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok((Dataset::new(records), skipped))
    }

    /// 从文件加载数据集（解析 → 映射 → 准备）
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn load_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<(Dataset, LoadReport)> {
        let start_time = Instant::now();
        let path = file_path.as_ref();
        info!(policy = %self.zero_planned_policy, rounding = %self.derivation.rounding_mode(), "开始加载数据集");

        // === 步骤 1: 解析文件 ===
        let raw_rows = UniversalFileParser.parse_to_raw_records(path)?;
        let total_rows = raw_rows.len();
        debug!(total_rows, "文件解析完成");

        // === 步骤 2: 字段映射（沿用解析器分配的源文件行号）===
        let mapper = FieldMapper;
        let raw_records = raw_rows
            .iter()
            .map(|row| mapper.map_to_raw_order(&row.fields, row.row_number))
            .collect::<ImportResult<Vec<_>>>()?;

        // === 步骤 3: 派生 + 构建数据集 ===
        let (dataset, skipped) = self.prepare_with_policy(&raw_records)?;

        let report = LoadReport {
            total_rows,
            accepted_rows: dataset.len(),
            skipped,
            elapsed_ms: start_time.elapsed().as_millis(),
        };
        info!(
            total = report.total_rows,
            accepted = report.accepted_rows,
            skipped = report.skipped.len(),
            business_units = dataset.business_units().len() - 1,
            product_groups = dataset.product_groups().len() - 1,
            elapsed_ms = report.elapsed_ms as u64,
            "数据集加载完成"
        );

        Ok((dataset, report))
    }
}

impl Default for DatasetPreparer {
    fn default() -> Self {
        Self::new(RoundingMode::default(), ZeroPlannedPolicy::default())
    }
}
