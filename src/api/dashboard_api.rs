// ==========================================
// 生产偏差看板 - 看板 API
// ==========================================
// 职责: 组合查询引擎输出，生成表格 / 图表 / 明细面板视图模型
// 架构: UI 事件层 → DashboardApi → 查询引擎（纯函数）
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::error::ApiResult;
use crate::api::validator;
use crate::config::DashboardConfig;
use crate::domain::dataset::Dataset;
use crate::domain::order::{DetailRow, OrderRecord};
use crate::domain::selection::{ChartPoint, Selection};
use crate::domain::types::{DeviationClass, Scope};
use crate::engine::{AggregationEngine, DetailEngine, DeviationClassifier, FilterEngine};

// ==========================================
// 视图模型
// ==========================================

/// 表格行（完整记录 + 着色等级）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(flatten)]
    pub record: OrderRecord,
    pub deviation_class: DeviationClass,
}

/// 累计产量图表序列
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 最大累计量（用于条形缩放）
    pub fn max_cumulative(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.point.cumulative_produced_quantity)
            .fold(0.0, f64::max)
    }
}

/// 一次查询的完整视图
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub rows: Vec<TableRow>,
    pub chart: ChartSeries,
}

/// 明细面板（分页）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub product_name: String,
    pub rows: Vec<DetailRow>,
    pub page: usize,       // 1 起
    pub page_count: usize, // 至少 1
    pub total_rows: usize,
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 持有只读数据集的共享引用；所有方法都是数据集与参数的纯函数。
pub struct DashboardApi {
    dataset: Arc<Dataset>,
    filter_engine: FilterEngine,
    aggregation_engine: AggregationEngine,
    detail_engine: DetailEngine,
    classifier: DeviationClassifier,
    detail_page_size: usize,
    lookback_days: i64,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - dataset: 启动时加载的只读数据集
    /// - config: 看板配置（阈值 / 分页 / 默认窗口）
    pub fn new(dataset: Arc<Dataset>, config: &DashboardConfig) -> Self {
        Self {
            dataset,
            filter_engine: FilterEngine::new(),
            aggregation_engine: AggregationEngine::new(),
            detail_engine: DetailEngine::new(),
            classifier: DeviationClassifier::new(config.deviation_thresholds),
            detail_page_size: config.detail_page_size.max(1),
            lookback_days: config.lookback_days,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    // ==========================================
    // 控件选项
    // ==========================================

    /// 业务单元下拉选项（含 ALL）
    pub fn business_unit_options(&self) -> Vec<String> {
        self.dataset.business_units().to_vec()
    }

    /// 产品组下拉选项（随业务单元联动）
    pub fn product_group_options(&self, business_unit: &Scope) -> Vec<String> {
        self.filter_engine
            .list_product_groups(&self.dataset, business_unit)
    }

    // ==========================================
    // 选择条件
    // ==========================================

    /// 默认选择: ALL / ALL / 最近 lookback_days 天
    pub fn default_selection(&self, today: NaiveDate) -> Selection {
        Selection::default_window(today, self.lookback_days)
    }

    /// 校验 UI 原始字符串并构建选择条件
    pub fn parse_selection(
        &self,
        business_unit: &str,
        product_group: &str,
        start_date: &str,
        end_date: &str,
    ) -> ApiResult<Selection> {
        validator::parse_selection(business_unit, product_group, start_date, end_date)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 执行一次完整查询（表格 + 图表）
    #[instrument(skip(self), fields(dataset_rows = self.dataset.len()))]
    pub fn query(&self, selection: &Selection) -> DashboardView {
        let filtered = self.filter_engine.filter(&self.dataset, selection);

        let chart = ChartSeries {
            points: self
                .aggregation_engine
                .aggregate(&filtered)
                .into_iter()
                .map(|point| ChartPoint {
                    deviation_class: self.classifier.classify(point.mean_deviation_pct),
                    point,
                })
                .collect(),
        };

        let rows: Vec<TableRow> = filtered
            .into_iter()
            .map(|record| TableRow {
                deviation_class: self.classifier.classify(record.deviation_pct),
                record: record.clone(),
            })
            .collect();

        debug!(rows = rows.len(), points = chart.points.len(), "查询完成");
        DashboardView { rows, chart }
    }

    /// 明细行（完整数据集，不分页）
    pub fn detail(&self, product_name: &str) -> Vec<DetailRow> {
        self.detail_engine.detail(&self.dataset, product_name)
    }

    /// 明细面板（分页）
    ///
    /// # 参数
    /// - page: 页码（1 起）；超出范围时钳制到 [1, page_count]
    pub fn detail_panel(&self, product_name: &str, page: usize) -> DetailPanel {
        let all_rows = self.detail(product_name);
        let total_rows = all_rows.len();
        let page_count = total_rows.div_ceil(self.detail_page_size).max(1);
        let page = page.clamp(1, page_count);

        let rows = all_rows
            .into_iter()
            .skip((page - 1) * self.detail_page_size)
            .take(self.detail_page_size)
            .collect();

        DetailPanel {
            product_name: product_name.to_string(),
            rows,
            page,
            page_count,
            total_rows,
        }
    }

    /// 偏差等级（按配置阈值）
    pub fn classify(&self, pct: f64) -> DeviationClass {
        self.classifier.classify(pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, place: &str, product: &str, planned: f64, produced: f64, dev: f64) -> OrderRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        OrderRecord {
            order_date: date,
            production_place: place.to_string(),
            product_name: product.to_string(),
            planned_uom: "kg".to_string(),
            planned_quantity: planned,
            produced_quantity: produced,
            month: "2024-01".to_string(),
            deviation_pct: dev,
        }
    }

    fn api_with(records: Vec<OrderRecord>, page_size: usize) -> DashboardApi {
        let config = DashboardConfig {
            detail_page_size: page_size,
            ..DashboardConfig::default()
        };
        DashboardApi::new(Arc::new(Dataset::new(records)), &config)
    }

    #[test]
    fn test_query_colors_chart_points_by_mean_deviation() {
        let api = api_with(
            vec![
                record(1, "A", "P1", 100.0, 160.0, 60.0),
                record(1, "A", "P1", 100.0, 140.0, 40.0),
                record(2, "A", "P1", 100.0, 100.0, 0.0),
            ],
            10,
        );
        let sel = api
            .parse_selection("ALL", "ALL", "2024-01-01", "2024-01-31")
            .unwrap();

        let view = api.query(&sel);

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].deviation_class, DeviationClass::High);
        assert_eq!(view.chart.points.len(), 2);
        // (60 + 40) / 2 = 50 → HIGH
        assert_eq!(view.chart.points[0].deviation_class, DeviationClass::High);
        assert_eq!(view.chart.points[1].deviation_class, DeviationClass::Low);
        assert_eq!(view.chart.max_cumulative(), 400.0);
    }

    #[test]
    fn test_detail_panel_pagination() {
        let records = (1..=25)
            .map(|d| record(d, "A", "P1", 10.0, d as f64, 0.0))
            .collect();
        let api = api_with(records, 10);

        let first = api.detail_panel("P1", 1);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.total_rows, 25);
        assert_eq!(first.rows.len(), 10);

        let last = api.detail_panel("P1", 3);
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.rows[0].produced_quantity, 21.0);

        // 超出范围钳制
        assert_eq!(api.detail_panel("P1", 99).page, 3);
        assert_eq!(api.detail_panel("P1", 0).page, 1);
    }

    #[test]
    fn test_detail_panel_no_match() {
        let api = api_with(vec![record(1, "A", "P1", 1.0, 1.0, 0.0)], 10);
        let panel = api.detail_panel("nope", 1);
        assert!(panel.rows.is_empty());
        assert_eq!(panel.page_count, 1);
        assert_eq!(panel.total_rows, 0);
    }

    #[test]
    fn test_default_selection_uses_lookback() {
        let api = api_with(Vec::new(), 10);
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let sel = api.default_selection(today);
        assert_eq!((sel.end_date - sel.start_date).num_days(), 90);
    }
}
