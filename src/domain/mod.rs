// ==========================================
// 生产偏差看板 - 领域层
// ==========================================
// 职责: 订单记录 / 数据集 / 查询选择 / 领域类型
// ==========================================

pub mod dataset;
pub mod order;
pub mod selection;
pub mod types;

// 重导出核心类型
pub use dataset::Dataset;
pub use order::{DetailRow, OrderRecord, RawOrderRecord};
pub use selection::{AggregatedPoint, ChartPoint, Selection};
pub use types::{DeviationClass, RoundingMode, Scope, ZeroPlannedPolicy, ALL_SENTINEL};
