// ==========================================
// 生产偏差看板 - 查询引擎层
// ==========================================
// 职责: 纯函数查询管道（过滤 / 聚合 / 等级判定 / 明细）
// 约束: 不持有可变状态，不依赖任何 UI 框架
// ==========================================

pub mod aggregation;
pub mod detail;
pub mod deviation;
pub mod filter;

// 重导出核心引擎
pub use aggregation::AggregationEngine;
pub use detail::DetailEngine;
pub use deviation::{classify_deviation, DeviationClassifier, DeviationThresholds};
pub use filter::FilterEngine;
