// ==========================================
// 生产偏差看板 - 导入层
// ==========================================
// 职责: 外部表格导入，生成只读数据集
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dataset_preparer;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use dataset_preparer::{DatasetPreparer, LoadReport, SkippedRow};
pub use derivation::{round_to, DerivationService};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, FileParser, SourceRow};
