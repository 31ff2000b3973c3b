// ==========================================
// 生产偏差看板 - 终端渲染
// ==========================================
// 职责: AppState → 文本（comfy-table 表格 + 条形图 + 明细面板）
// 说明: 渲染函数只读状态，不触发查询以外的副作用
// ==========================================

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::api::{ChartSeries, DetailPanel, TableRow};
use crate::app::state::AppState;
use crate::domain::order::DetailRow;
use crate::domain::types::{DeviationClass, Scope};
use crate::i18n::{t, t_with_args};

/// 图表条形最大宽度（字符）
const BAR_WIDTH: usize = 40;

// ==========================================
// Labels - 本地化标签
// ==========================================

/// 渲染所需的全部本地化文本
#[derive(Debug, Clone)]
pub struct Labels {
    pub all: String,
    pub prompt: String,
    pub business_unit: String,
    pub product_group: String,
    pub date_range: String,
    pub row: String,
    pub product_name: String,
    pub uom: String,
    pub planned_quantity: String,
    pub produced_quantity: String,
    pub deviation_pct: String,
    pub empty: String,
    pub chart_title: String,
    pub chart_x_axis: String,
    pub chart_series: String,
    pub chart_class: String,
    pub detail_product_name: String,
    pub detail_uom: String,
    pub detail_planned_quantity: String,
    pub detail_produced_quantity: String,
    pub detail_deviation_pct: String,
}

impl Labels {
    /// 按当前语言解析
    pub fn from_locale() -> Self {
        Self {
            all: t("common.all"),
            prompt: t("common.prompt"),
            business_unit: t("controls.business_unit"),
            product_group: t("controls.product_group"),
            date_range: t("controls.date_range"),
            row: t("table.row"),
            product_name: t("table.product_name"),
            uom: t("table.uom"),
            planned_quantity: t("table.planned_quantity"),
            produced_quantity: t("table.produced_quantity"),
            deviation_pct: t("table.deviation_pct"),
            empty: t("table.empty"),
            chart_title: t("chart.title"),
            chart_x_axis: t("chart.x_axis"),
            chart_series: t("chart.series"),
            chart_class: t("chart.deviation_class"),
            detail_product_name: t("detail.product_name"),
            detail_uom: t("detail.uom"),
            detail_planned_quantity: t("detail.planned_quantity"),
            detail_produced_quantity: t("detail.produced_quantity"),
            detail_deviation_pct: t("detail.deviation_pct"),
        }
    }

    fn scope(&self, scope: &Scope) -> String {
        match scope {
            Scope::All => self.all.clone(),
            Scope::Only(v) => v.clone(),
        }
    }
}

// ==========================================
// 渲染入口
// ==========================================

/// 渲染完整看板（控件摘要 + 表格 + 图表 + 明细面板）
pub fn render_dashboard(state: &AppState, labels: &Labels) -> String {
    let selection = state.selection();
    let mut out = String::new();

    out.push_str(&format!(
        "{}: {}   {}: {}   {}: {} .. {}\n\n",
        labels.business_unit,
        labels.scope(&selection.business_unit),
        labels.product_group,
        labels.scope(&selection.product_group),
        labels.date_range,
        selection.start_date,
        selection.end_date,
    ));

    out.push_str(&render_table(&state.view().rows, labels));
    out.push_str("\n\n");
    out.push_str(&render_chart(&state.view().chart, labels));
    out.push('\n');
    out.push_str(&render_detail(state.detail_panel().as_ref(), labels));
    out.push('\n');
    out
}

/// 渲染过滤结果表格（行号 1 起，与 select 命令一致）
pub fn render_table(rows: &[TableRow], labels: &Labels) -> String {
    if rows.is_empty() {
        return labels.empty.clone();
    }

    let mut table = base_table();
    table.set_header(vec![
        labels.row.as_str(),
        labels.product_name.as_str(),
        labels.uom.as_str(),
        labels.planned_quantity.as_str(),
        labels.produced_quantity.as_str(),
        labels.deviation_pct.as_str(),
    ]);

    for (index, row) in rows.iter().enumerate() {
        let record = &row.record;
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&record.product_name),
            Cell::new(&record.planned_uom),
            Cell::new(format_quantity(record.planned_quantity)),
            Cell::new(format_quantity(record.produced_quantity)),
            Cell::new(format_pct(record.deviation_pct)).fg(class_color(row.deviation_class)),
        ]);
    }
    align_numeric(&mut table, &[0, 3, 4, 5]);

    table.to_string()
}

/// 渲染累计产量图表（每个日期一根条形，按平均偏差着色）
pub fn render_chart(chart: &ChartSeries, labels: &Labels) -> String {
    let mut out = format!("{}\n", labels.chart_title);
    if chart.is_empty() {
        out.push_str(&labels.empty);
        return out;
    }

    let max = chart.max_cumulative();
    let mut table = base_table();
    table.set_header(vec![
        labels.chart_x_axis.as_str(),
        labels.chart_series.as_str(),
        "",
        labels.chart_class.as_str(),
    ]);

    for chart_point in &chart.points {
        let point = &chart_point.point;
        let color = class_color(chart_point.deviation_class);
        table.add_row(vec![
            Cell::new(point.date),
            Cell::new(format_quantity(point.cumulative_produced_quantity)),
            Cell::new(bar(point.cumulative_produced_quantity, max)).fg(color),
            Cell::new(chart_point.deviation_class).fg(color),
        ]);
    }
    align_numeric(&mut table, &[1]);

    out.push_str(&table.to_string());
    out
}

/// 渲染明细面板（Empty 时显示提示文本）
pub fn render_detail(panel: Option<&DetailPanel>, labels: &Labels) -> String {
    let panel = match panel {
        Some(panel) => panel,
        None => return labels.prompt.clone(),
    };

    let mut out = format!(
        "{}\n",
        t_with_args("detail.title", &[("product", panel.product_name.as_str())])
    );
    out.push_str(&render_detail_rows(&panel.rows, labels));
    out.push('\n');
    let page = panel.page.to_string();
    let pages = panel.page_count.to_string();
    out.push_str(&t_with_args(
        "detail.page",
        &[("page", page.as_str()), ("pages", pages.as_str())],
    ));
    out
}

fn render_detail_rows(rows: &[DetailRow], labels: &Labels) -> String {
    let mut table = base_table();
    table.set_header(vec![
        labels.detail_product_name.as_str(),
        labels.detail_uom.as_str(),
        labels.detail_planned_quantity.as_str(),
        labels.detail_produced_quantity.as_str(),
        labels.detail_deviation_pct.as_str(),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.product_name),
            Cell::new(&row.planned_uom),
            Cell::new(format_quantity(row.planned_quantity)),
            Cell::new(format_quantity(row.produced_quantity)),
            Cell::new(format_pct(row.deviation_pct)),
        ]);
    }
    align_numeric(&mut table, &[2, 3, 4]);
    table.to_string()
}

// ==========================================
// 辅助函数
// ==========================================

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_numeric(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// 偏差等级 → 终端颜色
pub fn class_color(class: DeviationClass) -> Color {
    match class {
        DeviationClass::Low => Color::Green,
        DeviationClass::Medium => Color::Yellow,
        DeviationClass::High => Color::Red,
        DeviationClass::Unknown => Color::Grey,
    }
}

fn format_quantity(value: f64) -> String {
    format!("{:.2}", value)
}

fn format_pct(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// 按比例生成条形
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH as f64).round().max(0.0) as usize;
    "█".repeat(width.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderRecord;
    use crate::domain::selection::{AggregatedPoint, ChartPoint};
    use chrono::NaiveDate;

    fn labels() -> Labels {
        Labels {
            all: "ALL".into(),
            prompt: "click a row".into(),
            business_unit: "unit".into(),
            product_group: "group".into(),
            date_range: "range".into(),
            row: "#".into(),
            product_name: "product".into(),
            uom: "uom".into(),
            planned_quantity: "planned".into(),
            produced_quantity: "produced".into(),
            deviation_pct: "dev".into(),
            empty: "no rows".into(),
            chart_title: "chart".into(),
            chart_x_axis: "date".into(),
            chart_series: "cumulative".into(),
            chart_class: "class".into(),
            detail_product_name: "sku".into(),
            detail_uom: "uom".into(),
            detail_planned_quantity: "planned".into(),
            detail_produced_quantity: "produced".into(),
            detail_deviation_pct: "dev".into(),
        }
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(50.0, 100.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(100.0, 100.0).chars().count(), BAR_WIDTH);
        assert!(bar(10.0, 0.0).is_empty());
    }

    #[test]
    fn test_render_table_rows_and_empty() {
        let labels = labels();
        assert_eq!(render_table(&[], &labels), "no rows");

        let row = TableRow {
            record: OrderRecord {
                order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                production_place: "A".into(),
                product_name: "Widget".into(),
                planned_uom: "kg".into(),
                planned_quantity: 100.0,
                produced_quantity: 110.0,
                month: "2024-01".into(),
                deviation_pct: 10.0,
            },
            deviation_class: DeviationClass::Medium,
        };
        let text = render_table(&[row], &labels);
        assert!(text.contains("Widget"));
        assert!(text.contains("110.00"));
        assert!(text.contains("10.00"));
    }

    #[test]
    fn test_render_chart_lists_dates() {
        let chart = ChartSeries {
            points: vec![ChartPoint {
                point: AggregatedPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    total_produced_quantity: 200.0,
                    mean_deviation_pct: 0.0,
                    cumulative_produced_quantity: 350.0,
                },
                deviation_class: DeviationClass::Low,
            }],
        };
        let text = render_chart(&chart, &labels());
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("350.00"));
        assert!(text.contains("LOW"));
    }

    #[test]
    fn test_render_detail_empty_shows_prompt() {
        assert_eq!(render_detail(None, &labels()), "click a row");
    }
}
