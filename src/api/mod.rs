// ==========================================
// 生产偏差看板 - API 层
// ==========================================
// 职责: 提供看板查询接口，供 UI 事件层调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use dashboard_api::{ChartSeries, DashboardApi, DashboardView, DetailPanel, TableRow};
pub use error::{ApiError, ApiResult};
